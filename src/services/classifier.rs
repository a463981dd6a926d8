use crate::models::{ActivityClassification, ActivityKind, ClassifierConfig};

/// Classify activity from a sanitized speed (m/s) and net acceleration (m/s²).
///
/// Pure and total: every non-negative pair maps to a classification. Branches
/// are evaluated in a fixed order and the first match wins, so boundary values
/// (e.g. speed exactly at `walking_speed_max`) land in the documented branch.
pub fn classify(
    speed_mps: f64,
    acceleration_mps2: f64,
    config: &ClassifierConfig,
) -> ActivityClassification {
    let (kind, confidence) =
        // IDLE: very low speed and acceleration
        if speed_mps < config.idle_speed_threshold
            && acceleration_mps2 < config.idle_accel_threshold
        {
            (ActivityKind::Idle, config.idle_confidence)
        }
        // WALKING: low to moderate speed, moderate acceleration
        else if speed_mps >= config.idle_speed_threshold
            && speed_mps < config.walking_speed_max
            && acceleration_mps2 >= config.walking_accel_min
            && acceleration_mps2 <= config.walking_accel_max
        {
            (ActivityKind::Walking, config.walking_confidence)
        }
        // RUNNING: moderate to high speed, higher acceleration
        else if speed_mps >= config.walking_speed_max
            && speed_mps < config.running_speed_max
            && acceleration_mps2 >= config.running_accel_min
            && acceleration_mps2 <= config.running_accel_max
        {
            (ActivityKind::Running, config.running_confidence)
        }
        // VEHICLE: high speed, smooth movement
        else if speed_mps >= config.running_speed_max {
            (ActivityKind::Vehicle, config.vehicle_confidence)
        }
        // Acceleration fell outside the expected band for its speed range:
        // reclassify by speed alone at reduced confidence.
        else if speed_mps < config.idle_speed_threshold {
            (ActivityKind::Idle, config.edge_case_idle_confidence)
        } else if speed_mps < config.walking_speed_max {
            (ActivityKind::Walking, config.edge_case_walking_confidence)
        } else if speed_mps < config.running_speed_max {
            (ActivityKind::Running, config.edge_case_running_confidence)
        } else {
            (ActivityKind::Vehicle, config.edge_case_vehicle_confidence)
        };

    log::debug!(
        "[Classifier] speed: {:.2} m/s, accel: {:.2} m/s² → {} ({}%)",
        speed_mps,
        acceleration_mps2,
        kind,
        confidence
    );

    ActivityClassification { kind, confidence }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ClassifierConfig {
        ClassifierConfig::default()
    }

    #[test]
    fn stationary_reading_is_idle() {
        let result = classify(0.2, 0.1, &config());
        assert_eq!(result.kind, ActivityKind::Idle);
        assert_eq!(result.confidence, 95);
    }

    #[test]
    fn moderate_speed_and_accel_is_walking() {
        let result = classify(1.5, 1.0, &config());
        assert_eq!(result.kind, ActivityKind::Walking);
        assert_eq!(result.confidence, 85);
    }

    #[test]
    fn fast_movement_with_matching_accel_is_running() {
        let result = classify(4.0, 2.5, &config());
        assert_eq!(result.kind, ActivityKind::Running);
        assert_eq!(result.confidence, 80);
    }

    #[test]
    fn high_speed_is_vehicle_regardless_of_accel() {
        // Accel 2.0 is outside neither walking nor running ranges at this
        // speed; the speed >= running_speed_max branch catches it first.
        let result = classify(8.0, 2.0, &config());
        assert_eq!(result.kind, ActivityKind::Vehicle);
        assert_eq!(result.confidence, 90);
    }

    #[test]
    fn speed_band_with_unexpected_accel_degrades_confidence() {
        // Walking-band speed but near-zero acceleration.
        let result = classify(1.5, 0.0, &config());
        assert_eq!(result.kind, ActivityKind::Walking);
        assert_eq!(result.confidence, 60);

        // Running-band speed but walking-level acceleration.
        let result = classify(4.0, 0.5, &config());
        assert_eq!(result.kind, ActivityKind::Running);
        assert_eq!(result.confidence, 60);

        // Idle-band speed with high acceleration (shaking in place).
        let result = classify(0.1, 3.0, &config());
        assert_eq!(result.kind, ActivityKind::Idle);
        assert_eq!(result.confidence, 60);
    }

    #[test]
    fn boundary_values_follow_branch_order() {
        let cfg = config();

        // Exactly at idle_speed_threshold: fails the `<` check, lands in the
        // walking branch when acceleration matches.
        let result = classify(cfg.idle_speed_threshold, 1.0, &cfg);
        assert_eq!(result.kind, ActivityKind::Walking);
        assert_eq!(result.confidence, 85);

        // Exactly at walking_speed_max: no longer walking, running if accel fits.
        let result = classify(cfg.walking_speed_max, 2.0, &cfg);
        assert_eq!(result.kind, ActivityKind::Running);
        assert_eq!(result.confidence, 80);

        // Exactly at running_speed_max: vehicle, high confidence.
        let result = classify(cfg.running_speed_max, 2.0, &cfg);
        assert_eq!(result.kind, ActivityKind::Vehicle);
        assert_eq!(result.confidence, 90);

        // Accel exactly at walking_accel_max is inclusive.
        let result = classify(1.0, cfg.walking_accel_max, &cfg);
        assert_eq!(result.kind, ActivityKind::Walking);
        assert_eq!(result.confidence, 85);
    }

    #[test]
    fn classification_is_deterministic() {
        let cfg = config();
        let first = classify(3.3, 1.7, &cfg);
        for _ in 0..100 {
            assert_eq!(classify(3.3, 1.7, &cfg), first);
        }
    }

    #[test]
    fn swapped_config_shifts_thresholds() {
        let cfg = ClassifierConfig {
            running_speed_max: 10.0,
            ..ClassifierConfig::default()
        };
        // 8 m/s is vehicle under defaults but running-band here.
        let result = classify(8.0, 2.0, &cfg);
        assert_eq!(result.kind, ActivityKind::Running);
        assert_eq!(result.confidence, 80);
    }
}
