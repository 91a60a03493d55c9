#[cfg(test)]
mod tests {
    use glam::Vec2;

    use crate::commands::{DirectorCommand, SpawnOptions};
    use crate::config::SimConfig;
    use crate::difficulty::{factor_for_level, DifficultyChange, DifficultyScalar};
    use crate::enums::*;
    use crate::error::ConfigError;
    use crate::events::GameEvent;
    use crate::types::{ActorId, FrameTime, Playfield};

    #[test]
    fn test_factor_level_one_is_unity() {
        assert_eq!(factor_for_level(1), 1.0);
        assert_eq!(DifficultyScalar::default().factor, 1.0);
    }

    #[test]
    fn test_factor_formula() {
        // level 5: 1 + 4*0.1 + 4^1.5*0.01 = 1 + 0.4 + 0.08
        let f = factor_for_level(5);
        assert!((f - 1.48).abs() < 1e-5, "got {f}");
        // level 10: 1 + 0.9 + 27*0.01
        let f = factor_for_level(10);
        assert!((f - 2.17).abs() < 1e-5, "got {f}");
    }

    #[test]
    fn test_factor_monotonic_in_level() {
        let mut prev = factor_for_level(1);
        for level in 2..40 {
            let f = factor_for_level(level);
            assert!(f > prev, "factor should grow with level");
            prev = f;
        }
    }

    #[test]
    fn test_level_zero_clamped_to_one() {
        let s = DifficultyScalar::from_level(0);
        assert_eq!(s.level, 1);
        assert_eq!(s.factor, 1.0);
    }

    #[test]
    fn test_scale_interval_floor() {
        let s = DifficultyScalar::from_level(30);
        assert_eq!(s.scale_interval(1000.0), 250.0);
        // Intervals already below the floor are left alone.
        assert_eq!(s.scale_interval(100.0), 100.0);
    }

    #[test]
    fn test_scale_damage_identity_at_level_one() {
        let s = DifficultyScalar::from_level(1);
        assert_eq!(s.scale_damage(10), 10);
        assert_eq!(s.scale_speed(300.0), 300.0);
    }

    #[test]
    fn test_difficulty_change_accepts_both_forms() {
        let raw: DifficultyChange = serde_json::from_str("4").unwrap();
        assert_eq!(raw, DifficultyChange::Level(4));
        let obj: DifficultyChange =
            serde_json::from_str(r#"{"level": 4, "factor": 1.35}"#).unwrap();
        assert_eq!(
            obj,
            DifficultyChange::Scalar {
                level: 4,
                factor: 1.35
            }
        );
        assert_eq!(DifficultyScalar::from(raw), DifficultyScalar::from_level(4));
        assert_eq!(DifficultyScalar::from(obj).factor, 1.35);
    }

    #[test]
    fn test_difficulty_change_bad_factor_recomputed() {
        let change = DifficultyChange::Scalar {
            level: 3,
            factor: f32::NAN,
        };
        assert_eq!(DifficultyScalar::from(change), DifficultyScalar::from_level(3));
    }

    #[test]
    fn test_difficulty_ordering() {
        let three = DifficultyScalar::from_level(3);
        assert!(DifficultyScalar::from_level(2).is_below(&three));
        assert!(!DifficultyScalar::from_level(4).is_below(&three));
        assert!(!three.is_below(&three));
        let softer = DifficultyScalar {
            level: 3,
            factor: three.factor - 0.1,
        };
        assert!(softer.is_below(&three));
        assert!(!three.is_below(&softer));
    }

    #[test]
    fn test_boss_phase_invulnerability() {
        assert!(BossPhase::Entry.is_invulnerable());
        assert!(BossPhase::Retreat.is_invulnerable());
        for phase in BossPhase::COMBAT {
            assert!(!phase.is_invulnerable());
        }
    }

    #[test]
    fn test_boss_phase_order() {
        let mut phase = BossPhase::Phase1;
        let mut seen = vec![phase];
        while let Some(next) = phase.next_combat() {
            assert!(next > phase);
            seen.push(next);
            phase = next;
        }
        assert_eq!(seen, BossPhase::COMBAT.to_vec());
    }

    #[test]
    fn test_pattern_serde_snake_case() {
        let json = serde_json::to_string(&MovementPattern::Sinusoidal).unwrap();
        assert_eq!(json, "\"sinusoidal\"");
        let back: WeaponPattern = serde_json::from_str("\"burst\"").unwrap();
        assert_eq!(back, WeaponPattern::Burst);
    }

    #[test]
    fn test_playfield_margin() {
        let field = Playfield::default();
        assert!(field.contains_with_margin(Vec2::new(850.0, 300.0), 100.0));
        assert!(!field.contains_with_margin(Vec2::new(901.0, 300.0), 100.0));
        assert!(!field.contains_with_margin(Vec2::new(400.0, -101.0), 100.0));
        assert_eq!(field.clamp_y(-20.0, 30.0), 30.0);
        assert_eq!(field.clamp_y(700.0, 30.0), 570.0);
    }

    #[test]
    fn test_frame_time_negative_delta() {
        let t = FrameTime::new(1000.0, -16.0);
        assert_eq!(t.dt_secs(), 0.0);
        assert_eq!(t.now_secs(), 1.0);
    }

    #[test]
    fn test_config_defaults_from_empty_json() {
        let config = SimConfig::from_json_str("{}").unwrap();
        assert_eq!(config, SimConfig::default());
    }

    #[test]
    fn test_config_rejects_bad_playfield() {
        let json = r#"{"playfield": {"min": [0.0, 0.0], "max": [0.0, 600.0]}}"#;
        let err = SimConfig::from_json_str(json).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPlayfield { .. }));
    }

    #[test]
    fn test_config_rejects_malformed_json() {
        let err = SimConfig::from_json_str("{seed: }").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_director_command_serde() {
        let cmd = DirectorCommand::Spawn {
            class: BehaviorClass::Elite,
            x: 820.0,
            y: 200.0,
            options: SpawnOptions {
                health_multiplier: Some(1.5),
                speed_multiplier: None,
            },
        };
        let json = serde_json::to_string(&cmd).unwrap();
        let back: DirectorCommand = serde_json::from_str(&json).unwrap();
        match back {
            DirectorCommand::Spawn { class, options, .. } => {
                assert_eq!(class, BehaviorClass::Elite);
                assert_eq!(options.health_multiplier, Some(1.5));
            }
            other => panic!("unexpected command {other:?}"),
        }

        let json = r#"{"type": "SetDifficulty", "change": 6}"#;
        let cmd: DirectorCommand = serde_json::from_str(json).unwrap();
        assert!(matches!(
            cmd,
            DirectorCommand::SetDifficulty {
                change: DifficultyChange::Level(6)
            }
        ));
    }

    #[test]
    fn test_game_event_tagged() {
        let event = GameEvent::BossDestroyed {
            actor: ActorId(7),
            score_value: 5000,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"BossDestroyed\""));
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
