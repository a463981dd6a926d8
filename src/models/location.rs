use serde::{Deserialize, Serialize};

/// Raw fix as delivered by the platform location stream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    pub latitude: f64,
    pub longitude: f64,
    /// GPS-reported speed in m/s. Absent or negative on many devices while
    /// the receiver is still acquiring.
    #[serde(default)]
    pub speed_mps: Option<f64>,
    /// Unix timestamp in milliseconds.
    pub timestamp_ms: i64,
}

/// Sanitized output of the location filter, one per accepted fix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilteredLocation {
    pub latitude: f64,
    pub longitude: f64,
    /// Always >= 0 and capped at the maximum reasonable speed.
    pub speed_mps: f64,
    /// Distance gained by this fix in meters, >= 0. Zero during warm-up and
    /// while stationary.
    pub distance_delta_m: f64,
    /// Running total for the session in meters.
    pub total_distance_m: f64,
}

/// Raw 3-axis accelerometer sample in g units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccelSample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl AccelSample {
    /// Euclidean norm of the sample vector, in g units.
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}
