use serde::{Deserialize, Serialize};

/// Thresholds and confidence levels driving activity classification.
///
/// Immutable after construction: calibration swaps the whole value, individual
/// fields are never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    // Speed thresholds (m/s)
    pub idle_speed_threshold: f64,
    pub walking_speed_max: f64,
    pub running_speed_max: f64,

    // Acceleration thresholds (m/s²)
    pub idle_accel_threshold: f64,
    pub walking_accel_min: f64,
    pub walking_accel_max: f64,
    pub running_accel_min: f64,
    pub running_accel_max: f64,

    // Confidence levels (%)
    pub idle_confidence: u8,
    pub walking_confidence: u8,
    pub running_confidence: u8,
    pub vehicle_confidence: u8,
    pub edge_case_idle_confidence: u8,
    pub edge_case_walking_confidence: u8,
    pub edge_case_running_confidence: u8,
    pub edge_case_vehicle_confidence: u8,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            idle_speed_threshold: 0.5,
            walking_speed_max: 2.5, // ~1-9 km/h
            running_speed_max: 7.0, // ~9-25 km/h

            idle_accel_threshold: 0.3,
            walking_accel_min: 0.3,
            walking_accel_max: 2.0,
            running_accel_min: 1.5,
            running_accel_max: 4.0,

            idle_confidence: 95,
            walking_confidence: 85,
            running_confidence: 80,
            vehicle_confidence: 90,
            edge_case_idle_confidence: 60,
            edge_case_walking_confidence: 60,
            edge_case_running_confidence: 60,
            edge_case_vehicle_confidence: 70,
        }
    }
}
