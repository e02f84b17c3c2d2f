//! Simulated telemetry producer.
//!
//! Stands in for the upstream data source during development and load
//! testing: a population of surface and air entities in seeded circular
//! motion, emitted as timestamped `StateUpdate` batches. Strictly outside
//! the core: it only produces records; the host forwards them to the
//! registry. Same seed = same batches.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use geoscope_core::enums::EntityKind;
use geoscope_core::records::StateUpdate;
use geoscope_core::types::{Attitude, EntityId, Geodetic, TimeMillis};

/// Configuration for the simulated feed.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// RNG seed for determinism. Same seed = same motion.
    pub seed: u64,
    /// Number of entities to simulate. Even indices are surface
    /// vehicles, odd indices airborne.
    pub entity_count: usize,
    /// South-west corner of the spawn region (degrees).
    pub origin: Geodetic,
    /// Extent of the spawn region in degrees of longitude/latitude.
    pub extent_deg: f64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            entity_count: 200,
            origin: Geodetic::new(120.0, 25.0, 0.0),
            extent_deg: 10.0,
        }
    }
}

/// Cruise altitude assigned to airborne entities at spawn (meters).
const AIR_SPAWN_ALTITUDE_M: f64 = 10_000.0;

/// Airborne altitude bounds; vertical velocity reflects at the limits.
const AIR_MIN_ALTITUDE_M: f64 = 1_000.0;
const AIR_MAX_ALTITUDE_M: f64 = 50_000.0;

/// Per-entity circular motion parameters.
#[derive(Debug, Clone)]
struct Motion {
    center_lon_deg: f64,
    center_lat_deg: f64,
    radius_deg: f64,
    angle_deg: f64,
    /// Signed angular velocity (degrees/second); sign picks the direction.
    angular_velocity_deg_s: f64,
    /// Vertical velocity (m/s), airborne entities only.
    vertical_velocity_m_s: f64,
}

/// The feed: owns the simulated population and its motion state.
pub struct TelemetryFeed {
    rng: ChaCha8Rng,
    states: Vec<StateUpdate>,
    motions: Vec<Motion>,
    last_advance_ms: Option<TimeMillis>,
}

impl TelemetryFeed {
    pub fn new(config: FeedConfig) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut states = Vec::with_capacity(config.entity_count);
        let mut motions = Vec::with_capacity(config.entity_count);

        for index in 0..config.entity_count {
            let kind = if index % 2 == 0 {
                EntityKind::Surface
            } else {
                EntityKind::Air
            };
            let lon = config.origin.lon_deg + rng.gen_range(0.0..config.extent_deg);
            let lat = config.origin.lat_deg + rng.gen_range(0.0..config.extent_deg);
            let alt = match kind {
                EntityKind::Surface => 0.0,
                EntityKind::Air => AIR_SPAWN_ALTITUDE_M,
            };

            states.push(StateUpdate {
                entity_id: index as EntityId,
                kind,
                position: Geodetic::new(lon, lat, alt),
                attitude: Attitude::new(
                    rng.gen_range(0.0..360.0),
                    rng.gen_range(-10.0..10.0),
                    rng.gen_range(-5.0..5.0),
                ),
                timestamp_ms: 0,
            });

            motions.push(Motion {
                center_lon_deg: lon,
                center_lat_deg: lat,
                radius_deg: rng.gen_range(0.5..2.5),
                angle_deg: rng.gen_range(0.0..360.0),
                angular_velocity_deg_s: if rng.gen_bool(0.5) { 5.0 } else { -5.0 },
                vertical_velocity_m_s: match kind {
                    EntityKind::Air => rng.gen_range(-10.0..10.0),
                    EntityKind::Surface => 0.0,
                },
            });
        }

        log::debug!("feed initialized with {} entities", states.len());

        Self {
            rng,
            states,
            motions,
            last_advance_ms: None,
        }
    }

    /// The simulated population, for registering with a registry.
    pub fn roster(&self) -> impl Iterator<Item = (EntityId, EntityKind)> + '_ {
        self.states.iter().map(|s| (s.entity_id, s.kind))
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Advance the simulation to `now_ms` and return the resulting batch.
    pub fn advance(&mut self, now_ms: TimeMillis) -> &[StateUpdate] {
        let mut dt_secs = match self.last_advance_ms {
            Some(last) => (now_ms - last) as f64 / 1000.0,
            None => 0.0,
        };
        self.last_advance_ms = Some(now_ms);
        // Clamp a long gap (first call, host stall) to a sane step.
        if dt_secs > 1.0 {
            dt_secs = 0.1;
        }

        for (state, motion) in self.states.iter_mut().zip(&mut self.motions) {
            motion.angle_deg =
                (motion.angle_deg + motion.angular_velocity_deg_s * dt_secs).rem_euclid(360.0);
            let angle_rad = motion.angle_deg.to_radians();

            state.position.lon_deg = motion.center_lon_deg + motion.radius_deg * angle_rad.cos();
            state.position.lat_deg = motion.center_lat_deg + motion.radius_deg * angle_rad.sin();

            if state.kind == EntityKind::Air {
                state.position.alt_m += motion.vertical_velocity_m_s * dt_secs;
                if state.position.alt_m < AIR_MIN_ALTITUDE_M {
                    state.position.alt_m = AIR_MIN_ALTITUDE_M;
                    motion.vertical_velocity_m_s = motion.vertical_velocity_m_s.abs();
                } else if state.position.alt_m > AIR_MAX_ALTITUDE_M {
                    state.position.alt_m = AIR_MAX_ALTITUDE_M;
                    motion.vertical_velocity_m_s = -motion.vertical_velocity_m_s.abs();
                }
            }

            // Heading follows the motion direction around the circle.
            let heading = angle_rad.sin().atan2(angle_rad.cos()).to_degrees();
            state.attitude.heading_deg = heading.rem_euclid(360.0);

            // Bounded pitch/roll jitter.
            state.attitude.pitch_deg =
                (state.attitude.pitch_deg + self.rng.gen_range(-1.0..1.0) * dt_secs)
                    .clamp(-15.0, 15.0);
            state.attitude.roll_deg =
                (state.attitude.roll_deg + self.rng.gen_range(-2.0..2.0) * dt_secs)
                    .clamp(-20.0, 20.0);

            state.timestamp_ms = now_ms;
        }

        &self.states
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoscope_engine::{EntityRegistry, RegistryConfig};

    #[test]
    fn test_same_seed_same_batches() {
        let mut feed_a = TelemetryFeed::new(FeedConfig::default());
        let mut feed_b = TelemetryFeed::new(FeedConfig::default());

        for step in 0..10 {
            let now = step * 100;
            let json_a = serde_json::to_string(feed_a.advance(now)).unwrap();
            let json_b = serde_json::to_string(feed_b.advance(now)).unwrap();
            assert_eq!(json_a, json_b, "feeds diverged with the same seed");
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut feed_a = TelemetryFeed::new(FeedConfig {
            seed: 1,
            ..FeedConfig::default()
        });
        let mut feed_b = TelemetryFeed::new(FeedConfig {
            seed: 2,
            ..FeedConfig::default()
        });
        let json_a = serde_json::to_string(feed_a.advance(100)).unwrap();
        let json_b = serde_json::to_string(feed_b.advance(100)).unwrap();
        assert_ne!(json_a, json_b);
    }

    #[test]
    fn test_kind_alternates_by_index() {
        let feed = TelemetryFeed::new(FeedConfig {
            entity_count: 6,
            ..FeedConfig::default()
        });
        let roster: Vec<_> = feed.roster().collect();
        assert_eq!(roster.len(), 6);
        for (id, kind) in roster {
            let expected = if id % 2 == 0 {
                EntityKind::Surface
            } else {
                EntityKind::Air
            };
            assert_eq!(kind, expected);
        }
    }

    #[test]
    fn test_air_altitude_stays_bounded() {
        let mut feed = TelemetryFeed::new(FeedConfig {
            entity_count: 20,
            ..FeedConfig::default()
        });
        for step in 0..5_000 {
            let batch = feed.advance(step * 100);
            for state in batch {
                if state.kind == EntityKind::Air {
                    assert!(state.position.alt_m >= AIR_MIN_ALTITUDE_M);
                    assert!(state.position.alt_m <= AIR_MAX_ALTITUDE_M);
                }
                assert!(state.is_finite());
            }
        }
    }

    #[test]
    fn test_batches_apply_cleanly_to_a_registry() {
        let mut feed = TelemetryFeed::new(FeedConfig {
            entity_count: 50,
            ..FeedConfig::default()
        });
        let mut registry = EntityRegistry::with_wgs84(RegistryConfig::default());
        for (id, kind) in feed.roster() {
            registry.create(id, kind).unwrap();
        }

        let batch = feed.advance(100).to_vec();
        let errors = registry.apply_updates(&batch);
        assert!(errors.is_empty());
        assert_eq!(registry.len(), 50);
    }
}
