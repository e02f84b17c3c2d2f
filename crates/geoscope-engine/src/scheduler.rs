//! Per-tier update throttle.
//!
//! Far entities consume scheduler time an order of magnitude less often
//! than near ones, which bounds aggregate per-tick cost roughly
//! independently of how the population skews toward distant entities.

use geoscope_core::enums::DetailTier;
use geoscope_core::lod::LodConfig;
use geoscope_core::types::TimeMillis;

/// Whether an entity in `tier` is due for a refresh at `now_ms`.
///
/// `last_refresh_ms` of `None` means never refreshed: always due unless
/// culled. The interval boundary is inclusive: an entity refreshed exactly
/// one interval ago is due. Culled entities are never due.
pub fn due_for_refresh(
    config: &LodConfig,
    tier: DetailTier,
    now_ms: TimeMillis,
    last_refresh_ms: Option<TimeMillis>,
) -> bool {
    let Some(interval_ms) = config.refresh_interval_ms(tier) else {
        return false;
    };
    match last_refresh_ms {
        None => true,
        Some(last) => now_ms.saturating_sub(last) >= interval_ms as i64,
    }
}
