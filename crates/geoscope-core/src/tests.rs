#[cfg(test)]
mod tests {
    use crate::enums::{DetailTier, EntityKind};
    use crate::lod::{LodConfig, LodConfigError};
    use crate::records::StateUpdate;
    use crate::render::{AttachmentDetail, RenderCommand, RenderLog, RenderSink};
    use crate::types::{Attitude, Geodetic};

    // ---- Classifier ----

    #[test]
    fn test_classify_tier_boundaries() {
        let config = LodConfig::default();

        assert_eq!(config.classify(0.0), DetailTier::Near);
        assert_eq!(config.classify(499_999.0), DetailTier::Near);
        assert_eq!(config.classify(500_000.0), DetailTier::Mid);
        assert_eq!(config.classify(1_999_999.0), DetailTier::Mid);
        assert_eq!(config.classify(2_000_000.0), DetailTier::Far);
        assert_eq!(config.classify(4_999_999.0), DetailTier::Far);
        assert_eq!(config.classify(5_000_000.0), DetailTier::Culled);
        assert_eq!(config.classify(f64::INFINITY), DetailTier::Culled);
    }

    #[test]
    fn test_classify_is_monotonic() {
        let config = LodConfig::default();
        let mut last = DetailTier::Near;
        for step in 0..600 {
            let tier = config.classify(step as f64 * 10_000.0);
            assert!(tier >= last, "tier regressed at {} m", step * 10_000);
            last = tier;
        }
    }

    #[test]
    fn test_refresh_interval_table() {
        let config = LodConfig::default();
        assert_eq!(config.refresh_interval_ms(DetailTier::Near), Some(50));
        assert_eq!(config.refresh_interval_ms(DetailTier::Mid), Some(100));
        assert_eq!(config.refresh_interval_ms(DetailTier::Far), Some(200));
        assert_eq!(config.refresh_interval_ms(DetailTier::Culled), None);
    }

    #[test]
    fn test_config_rejects_non_ascending_thresholds() {
        let result = LodConfig::new(2_000_000.0, 500_000.0, 5_000_000.0, [50, 100, 200]);
        assert!(matches!(result, Err(LodConfigError::ThresholdOrder { .. })));

        let result = LodConfig::new(-1.0, 1.0, 2.0, [50, 100, 200]);
        assert!(matches!(result, Err(LodConfigError::ThresholdOrder { .. })));
    }

    #[test]
    fn test_config_rejects_zero_interval() {
        let result = LodConfig::new(500.0, 1000.0, 2000.0, [50, 0, 200]);
        assert!(matches!(
            result,
            Err(LodConfigError::ZeroInterval { tier: 1 })
        ));
    }

    #[test]
    fn test_custom_thresholds_shift_boundaries() {
        let config = LodConfig::new(100.0, 200.0, 300.0, [10, 20, 40]).unwrap();
        assert_eq!(config.classify(99.0), DetailTier::Near);
        assert_eq!(config.classify(100.0), DetailTier::Mid);
        assert_eq!(config.classify(299.0), DetailTier::Far);
        assert_eq!(config.classify(300.0), DetailTier::Culled);
    }

    // ---- Tier helpers ----

    #[test]
    fn test_tier_index_and_visibility() {
        assert_eq!(DetailTier::Near.index(), 0);
        assert_eq!(DetailTier::Mid.index(), 1);
        assert_eq!(DetailTier::Far.index(), 2);
        assert_eq!(DetailTier::Culled.index(), 3);

        assert!(DetailTier::Near.is_visible());
        assert!(DetailTier::Far.is_visible());
        assert!(!DetailTier::Culled.is_visible());
    }

    // ---- Serde round-trips for boundary types ----

    #[test]
    fn test_entity_kind_serde() {
        for kind in [EntityKind::Surface, EntityKind::Air] {
            let json = serde_json::to_string(&kind).unwrap();
            let back: EntityKind = serde_json::from_str(&json).unwrap();
            assert_eq!(kind, back);
        }
    }

    #[test]
    fn test_detail_tier_serde() {
        for tier in [
            DetailTier::Near,
            DetailTier::Mid,
            DetailTier::Far,
            DetailTier::Culled,
        ] {
            let json = serde_json::to_string(&tier).unwrap();
            let back: DetailTier = serde_json::from_str(&json).unwrap();
            assert_eq!(tier, back);
        }
    }

    #[test]
    fn test_state_update_serde() {
        let update = StateUpdate {
            entity_id: 42,
            kind: EntityKind::Air,
            position: Geodetic::new(124.5, 31.2, 10_000.0),
            attitude: Attitude::new(270.0, -5.0, 2.5),
            timestamp_ms: 1_700_000_000_000,
        };
        let json = serde_json::to_string(&update).unwrap();
        let back: StateUpdate = serde_json::from_str(&json).unwrap();
        assert_eq!(update, back);
    }

    #[test]
    fn test_state_update_finiteness() {
        let mut update = StateUpdate {
            entity_id: 1,
            kind: EntityKind::Surface,
            position: Geodetic::new(120.0, 25.0, 0.0),
            attitude: Attitude::default(),
            timestamp_ms: 0,
        };
        assert!(update.is_finite());

        update.position.lat_deg = f64::NAN;
        assert!(!update.is_finite());

        update.position.lat_deg = 25.0;
        update.attitude.roll_deg = f64::INFINITY;
        assert!(!update.is_finite());
    }

    #[test]
    fn test_render_command_serde() {
        let commands = vec![
            RenderCommand::Visibility {
                entity_id: 7,
                visible: false,
            },
            RenderCommand::DetailTier {
                entity_id: 7,
                tier: DetailTier::Mid,
            },
            RenderCommand::AttachmentDetail {
                entity_id: 7,
                detail: AttachmentDetail::SensorMesh {
                    azimuth_step_deg: 20,
                    elevation_step_deg: 20,
                },
            },
        ];
        let json = serde_json::to_string(&commands).unwrap();
        let back: Vec<RenderCommand> = serde_json::from_str(&json).unwrap();
        assert_eq!(commands, back);
    }

    // ---- Render log ----

    #[test]
    fn test_render_log_preserves_order_and_drains() {
        let mut log = RenderLog::new();
        log.submit(RenderCommand::Visibility {
            entity_id: 1,
            visible: true,
        });
        log.submit(RenderCommand::DetailTier {
            entity_id: 1,
            tier: DetailTier::Near,
        });

        assert_eq!(log.commands().len(), 2);
        assert!(matches!(
            log.commands()[0],
            RenderCommand::Visibility { entity_id: 1, .. }
        ));

        let drained = log.drain();
        assert_eq!(drained.len(), 2);
        assert!(log.commands().is_empty());
    }
}
