//! Entity registry: owns the live population and drives the per-tick
//! scheduling pass.
//!
//! The registry is single-threaded by construction: every mutating entry
//! point takes `&mut self`, so telemetry ingress and the tick pass cannot
//! interleave. A tick always runs to completion over the current
//! population; no operation blocks or suspends.

use std::collections::HashMap;

use glam::DVec3;
use hecs::World;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use geoscope_core::constants::STATS_INTERVAL_MS;
use geoscope_core::enums::{DetailTier, EntityKind};
use geoscope_core::error::RegistryError;
use geoscope_core::lod::LodConfig;
use geoscope_core::records::StateUpdate;
use geoscope_core::render::{RenderCommand, RenderSink};
use geoscope_core::stats::{StatsWindow, TickReport};
use geoscope_core::types::{Attitude, EntityId, Geodetic, TimeMillis};
use geoscope_geodesy::{Geodesy, GeodesyError, Wgs84};

use crate::attachments::AttachmentSet;
use crate::scheduler;
use crate::transform::TransformState;

/// Registry configuration.
#[derive(Debug, Clone, Default)]
pub struct RegistryConfig {
    /// Distance thresholds and refresh intervals.
    pub lod: LodConfig,
    /// Emit a per-second statistics line via `log::info!`.
    pub stats_enabled: bool,
}

/// Identity component: external id and kind.
#[derive(Debug, Clone, Copy)]
struct Meta {
    id: EntityId,
    kind: EntityKind,
}

/// Per-entity scheduling state maintained by the tick pass.
#[derive(Debug, Clone, Copy)]
struct LodState {
    /// Classifier output for `last_distance_m`, both written at the same
    /// tick. May be stale between ticks, never inconsistent.
    tier: DetailTier,
    last_distance_m: f64,
    /// Host clock of the last permitted refresh. `None` = never refreshed.
    last_refresh_ms: Option<TimeMillis>,
    /// Visibility as last pushed to the renderer.
    shown: bool,
    /// Tier as last pushed to the renderer's representation selector.
    propagated_tier: Option<DetailTier>,
}

impl LodState {
    fn new() -> Self {
        Self {
            tier: DetailTier::Mid,
            last_distance_m: 0.0,
            last_refresh_ms: None,
            shown: true,
            propagated_tier: None,
        }
    }
}

/// Read-only view of one managed entity, for hosts and tests.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityStatus {
    pub kind: EntityKind,
    pub tier: DetailTier,
    pub last_distance_m: f64,
    pub shown: bool,
    pub position: Geodetic,
    pub attitude: Attitude,
    pub scale: f64,
    pub has_pending: bool,
}

/// The registry. Owns the entity population and the injected geodesy
/// service; pushes render commands into a caller-supplied sink.
pub struct EntityRegistry<G: Geodesy = Wgs84> {
    world: World,
    index: HashMap<EntityId, hecs::Entity>,
    geodesy: G,
    config: RegistryConfig,
    viewpoint_ecef: DVec3,
    // Per-second statistics window.
    window_start_ms: Option<TimeMillis>,
    window_ticks: u32,
    window_refreshes: u32,
    last_window: StatsWindow,
}

impl<G: Geodesy> EntityRegistry<G> {
    /// Create a registry with an injected geodesy service. The service is
    /// shared by reference for the registry's lifetime, never re-created
    /// per call.
    pub fn new(config: RegistryConfig, geodesy: G) -> Self {
        Self {
            world: World::new(),
            index: HashMap::new(),
            geodesy,
            config,
            viewpoint_ecef: DVec3::ZERO,
            window_start_ms: None,
            window_ticks: 0,
            window_refreshes: 0,
            last_window: StatsWindow::default(),
        }
    }

    // --- Lifecycle ---

    /// Register a new entity. Fails with `DuplicateEntity` if the id is
    /// already live; the existing entity is untouched.
    pub fn create(&mut self, id: EntityId, kind: EntityKind) -> Result<(), RegistryError> {
        if self.index.contains_key(&id) {
            warn!("create: entity {id} already exists");
            return Err(RegistryError::DuplicateEntity(id));
        }
        let entity = self.world.spawn((
            Meta { id, kind },
            TransformState::new(),
            LodState::new(),
            AttachmentSet::for_kind(kind),
        ));
        self.index.insert(id, entity);
        debug!("created entity {id} ({kind:?})");
        Ok(())
    }

    /// Remove an entity. Unknown ids are a no-op.
    pub fn remove(&mut self, id: EntityId) {
        match self.index.remove(&id) {
            Some(entity) => {
                let _ = self.world.despawn(entity);
                debug!("removed entity {id}");
            }
            None => debug!("remove: entity {id} not found, ignoring"),
        }
    }

    /// Remove every entity.
    pub fn clear(&mut self) {
        self.world.clear();
        self.index.clear();
    }

    // --- Telemetry ingress ---

    /// Apply one state record. Only flips logical state and dirty flags;
    /// recomputation happens when the tick pass deems the entity due.
    pub fn apply_update(&mut self, update: &StateUpdate) -> Result<(), RegistryError> {
        let Some(&entity) = self.index.get(&update.entity_id) else {
            warn!("update for unknown entity {}", update.entity_id);
            return Err(RegistryError::UnknownEntity(update.entity_id));
        };
        if !update.is_finite() {
            warn!("invalid record for entity {}", update.entity_id);
            return Err(RegistryError::InvalidRecord {
                entity_id: update.entity_id,
                reason: "non-finite coordinates or attitude".into(),
            });
        }
        if let Ok(transform) = self.world.query_one_mut::<&mut TransformState>(entity) {
            transform.set_position(update.position);
            transform.set_attitude(update.attitude);
        }
        Ok(())
    }

    /// Apply a batch of records, in array order, each independently.
    /// Per-record failures are collected and returned; the rest of the
    /// batch still applies.
    pub fn apply_updates(&mut self, updates: &[StateUpdate]) -> Vec<RegistryError> {
        let mut errors = Vec::new();
        for update in updates {
            if let Err(error) = self.apply_update(update) {
                errors.push(error);
            }
        }
        errors
    }

    /// Set an entity's model scale.
    pub fn set_scale(&mut self, id: EntityId, scale: f64) -> Result<(), RegistryError> {
        let Some(&entity) = self.index.get(&id) else {
            return Err(RegistryError::UnknownEntity(id));
        };
        if !scale.is_finite() || scale <= 0.0 {
            return Err(RegistryError::InvalidRecord {
                entity_id: id,
                reason: format!("scale must be a positive finite number, got {scale}"),
            });
        }
        if let Ok(transform) = self.world.query_one_mut::<&mut TransformState>(entity) {
            transform.set_scale(scale);
        }
        Ok(())
    }

    /// Manually show or hide an entity. The change is pushed to the
    /// renderer immediately (the only ingress with an immediate output
    /// side effect); a culled entity stays hidden regardless.
    pub fn set_entity_visible(
        &mut self,
        id: EntityId,
        visible: bool,
        sink: &mut impl RenderSink,
    ) -> Result<(), RegistryError> {
        let Some(&entity) = self.index.get(&id) else {
            return Err(RegistryError::UnknownEntity(id));
        };
        if let Ok((transform, lod)) = self
            .world
            .query_one_mut::<(&mut TransformState, &mut LodState)>(entity)
        {
            if transform.set_visible(visible) {
                let effective = visible && lod.tier.is_visible();
                if lod.shown != effective {
                    lod.shown = effective;
                    sink.submit(RenderCommand::Visibility {
                        entity_id: id,
                        visible: effective,
                    });
                }
            }
        }
        Ok(())
    }

    // --- Viewpoint ---

    /// Set the viewpoint from an ECEF position. Stable for the duration
    /// of a tick; update it between ticks.
    pub fn set_viewpoint_ecef(&mut self, position: DVec3) {
        self.viewpoint_ecef = position;
    }

    /// Set the viewpoint from a geodetic position.
    pub fn set_viewpoint(&mut self, position: Geodetic) -> Result<(), GeodesyError> {
        self.viewpoint_ecef = self.geodesy.to_ecef(position)?;
        Ok(())
    }

    pub fn viewpoint_ecef(&self) -> DVec3 {
        self.viewpoint_ecef
    }

    /// The injected geodesy service.
    pub fn geodesy(&self) -> &G {
        &self.geodesy
    }

    // --- The per-tick scheduling pass ---

    /// Run one scheduling pass over every live entity: compute distance to
    /// the viewpoint, classify it into a tier, hide/show across the far cut
    /// point, and, when the throttle allows, apply pending transform
    /// updates and propagate the tier to the entity's attachments.
    ///
    /// Failures never abort the pass; affected entities keep their previous
    /// visual state and are reported in the returned `TickReport`.
    pub fn tick(&mut self, now_ms: TimeMillis, sink: &mut impl RenderSink) -> TickReport {
        let mut report = TickReport {
            now_ms,
            ..TickReport::default()
        };

        for (_, (meta, transform, lod, attachments)) in self.world.query_mut::<(
            &Meta,
            &mut TransformState,
            &mut LodState,
            &mut AttachmentSet,
        )>() {
            report.total += 1;

            // 1. Distance from entity to viewpoint in the common ECEF frame.
            let distance_m = match self.geodesy.to_ecef(transform.position()) {
                Ok(ecef) => self.geodesy.distance_m(ecef, self.viewpoint_ecef),
                Err(error) => {
                    warn!("distance for entity {} failed: {error}", meta.id);
                    report.errors.push(RegistryError::Geodesy {
                        entity_id: meta.id,
                        message: error.to_string(),
                    });
                    // Keep previous tier and distance; retry next tick.
                    report.tier_counts[lod.tier.index()] += 1;
                    if lod.shown {
                        report.visible += 1;
                    }
                    continue;
                }
            };

            // 2. Classify and store distance + tier together.
            let tier = self.config.lod.classify(distance_m);
            lod.last_distance_m = distance_m;
            lod.tier = tier;
            report.tier_counts[tier.index()] += 1;

            // 3. Beyond the far cut point: hide once and skip.
            if tier == DetailTier::Culled {
                if lod.shown {
                    lod.shown = false;
                    sink.submit(RenderCommand::Visibility {
                        entity_id: meta.id,
                        visible: false,
                    });
                }
                continue;
            }

            // 4. Back under the far cut point: show once, unless manually
            //    hidden.
            let wants_shown = transform.is_visible();
            if wants_shown != lod.shown {
                lod.shown = wants_shown;
                sink.submit(RenderCommand::Visibility {
                    entity_id: meta.id,
                    visible: wants_shown,
                });
            }
            if lod.shown {
                report.visible += 1;
            }

            // 5. Refresh if the per-tier throttle allows it.
            if !scheduler::due_for_refresh(&self.config.lod, tier, now_ms, lod.last_refresh_ms) {
                continue;
            }
            match transform.apply_pending(&self.geodesy) {
                Ok(delta) => {
                    if let Some(matrix) = delta.world {
                        sink.submit(RenderCommand::WorldTransform {
                            entity_id: meta.id,
                            matrix,
                        });
                    }
                    if let Some(matrix) = delta.local {
                        sink.submit(RenderCommand::LocalTransform {
                            entity_id: meta.id,
                            matrix,
                        });
                    }
                    if lod.propagated_tier != Some(tier) {
                        lod.propagated_tier = Some(tier);
                        sink.submit(RenderCommand::DetailTier {
                            entity_id: meta.id,
                            tier,
                        });
                    }
                    if let Some(detail) = attachments.retier(tier) {
                        sink.submit(RenderCommand::AttachmentDetail {
                            entity_id: meta.id,
                            detail,
                        });
                    }
                    lod.last_refresh_ms = Some(now_ms);
                    report.refreshed += 1;
                }
                Err(error) => {
                    // Dirty flags stay set; the next due tick retries.
                    warn!("transform refresh for entity {} failed: {error}", meta.id);
                    report.errors.push(RegistryError::Geodesy {
                        entity_id: meta.id,
                        message: error.to_string(),
                    });
                }
            }
        }

        self.track_stats(now_ms, &report);
        report
    }

    // --- Attachment master switches ---

    /// Show or hide the sensor volumes of every surface entity.
    pub fn set_sensor_suites_visible(&mut self, visible: bool, sink: &mut impl RenderSink) {
        self.set_attachments_visible(EntityKind::Surface, visible, sink);
    }

    /// Show or hide the track lines of every air entity.
    pub fn set_track_lines_visible(&mut self, visible: bool, sink: &mut impl RenderSink) {
        self.set_attachments_visible(EntityKind::Air, visible, sink);
    }

    fn set_attachments_visible(
        &mut self,
        kind: EntityKind,
        visible: bool,
        sink: &mut impl RenderSink,
    ) {
        for (_, (meta, attachments)) in self.world.query_mut::<(&Meta, &mut AttachmentSet)>() {
            if meta.kind == kind && attachments.set_visible(visible) {
                sink.submit(RenderCommand::AttachmentVisibility {
                    entity_id: meta.id,
                    visible,
                });
            }
        }
    }

    // --- Queries ---

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of entities currently shown to the renderer.
    pub fn visible_count(&self) -> usize {
        self.world
            .query::<&LodState>()
            .iter()
            .filter(|(_, lod)| lod.shown)
            .count()
    }

    /// Read-only view of one entity, or `None` if the id is not live.
    pub fn status(&self, id: EntityId) -> Option<EntityStatus> {
        let entity = *self.index.get(&id)?;
        let mut query = self
            .world
            .query_one::<(&Meta, &TransformState, &LodState)>(entity)
            .ok()?;
        let (meta, transform, lod) = query.get()?;
        Some(EntityStatus {
            kind: meta.kind,
            tier: lod.tier,
            last_distance_m: lod.last_distance_m,
            shown: lod.shown,
            position: transform.position(),
            attitude: transform.attitude(),
            scale: transform.scale(),
            has_pending: transform.has_pending(),
        })
    }

    // --- Diagnostics ---

    /// Enable or disable the per-second statistics line.
    pub fn set_stats_enabled(&mut self, enabled: bool) {
        self.config.stats_enabled = enabled;
    }

    /// The most recently completed one-second statistics window.
    pub fn stats_window(&self) -> StatsWindow {
        self.last_window
    }

    fn track_stats(&mut self, now_ms: TimeMillis, report: &TickReport) {
        self.window_ticks += 1;
        self.window_refreshes += report.refreshed as u32;

        let start = *self.window_start_ms.get_or_insert(now_ms);
        if now_ms - start < STATS_INTERVAL_MS {
            return;
        }
        self.last_window = StatsWindow {
            ticks_per_sec: self.window_ticks,
            refreshes_per_sec: self.window_refreshes,
        };
        if self.config.stats_enabled {
            info!(
                "ticks/s {} | refreshes/s {} | visible {}/{} | tiers near={} mid={} far={} culled={}",
                self.last_window.ticks_per_sec,
                self.last_window.refreshes_per_sec,
                report.visible,
                report.total,
                report.tier_counts[0],
                report.tier_counts[1],
                report.tier_counts[2],
                report.tier_counts[3],
            );
        }
        self.window_start_ms = Some(now_ms);
        self.window_ticks = 0;
        self.window_refreshes = 0;
    }
}

impl EntityRegistry<Wgs84> {
    /// Registry on the standard WGS84 ellipsoid.
    pub fn with_wgs84(config: RegistryConfig) -> Self {
        Self::new(config, Wgs84)
    }
}
