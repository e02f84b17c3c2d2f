//! Headless host: drives the feed and the registry at a fixed cadence.
//!
//! Stands in for the real application shell during development: there is
//! no renderer attached, so render commands are drained and counted. Knobs
//! come from the environment: GEOSCOPE_ENTITIES, GEOSCOPE_SECONDS,
//! GEOSCOPE_SEED.

use std::time::{Duration, Instant};

use log::{info, warn};

use geoscope_core::render::RenderLog;
use geoscope_core::types::Geodetic;
use geoscope_engine::{EntityRegistry, RegistryConfig};
use geoscope_feed::{FeedConfig, TelemetryFeed};

/// Scheduling pass cadence: 20 Hz, matching the near-tier refresh interval.
const TICK_INTERVAL: Duration = Duration::from_millis(50);

fn env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let entity_count = env_u64("GEOSCOPE_ENTITIES", 200) as usize;
    let run_secs = env_u64("GEOSCOPE_SECONDS", 10);
    let seed = env_u64("GEOSCOPE_SEED", 42);

    let mut feed = TelemetryFeed::new(FeedConfig {
        seed,
        entity_count,
        ..FeedConfig::default()
    });

    let mut registry = EntityRegistry::with_wgs84(RegistryConfig {
        stats_enabled: true,
        ..RegistryConfig::default()
    });
    for (id, kind) in feed.roster() {
        if let Err(error) = registry.create(id, kind) {
            warn!("skipping entity: {error}");
        }
    }

    // Observer high above the center of the spawn region, so the
    // population spreads across all detail tiers.
    if let Err(error) = registry.set_viewpoint(Geodetic::new(125.0, 30.0, 800_000.0)) {
        warn!("viewpoint rejected: {error}");
        return;
    }

    info!(
        "running {} entities for {}s at {:?} per tick",
        registry.len(),
        run_secs,
        TICK_INTERVAL
    );

    let start = Instant::now();
    let deadline = start + Duration::from_secs(run_secs);
    let mut next_tick_time = start;
    let mut sink = RenderLog::new();
    let mut commands_total: usize = 0;
    let mut ticks: u64 = 0;

    while Instant::now() < deadline {
        let now_ms = start.elapsed().as_millis() as i64;

        let batch = feed.advance(now_ms).to_vec();
        let errors = registry.apply_updates(&batch);
        for error in &errors {
            warn!("rejected record: {error}");
        }

        registry.tick(now_ms, &mut sink);
        commands_total += sink.drain().len();
        ticks += 1;

        next_tick_time += TICK_INTERVAL;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_INTERVAL * 2 {
            // Too far behind; reset to avoid a catch-up spiral.
            next_tick_time = now;
        }
    }

    info!(
        "done: {} ticks, {} render commands, {}/{} entities visible",
        ticks,
        commands_total,
        registry.visible_count(),
        registry.len()
    );
}
