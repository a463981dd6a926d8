use crate::models::AccelSample;

const GRAVITY_MPS2: f64 = 9.81;

/// Net acceleration in m/s²: the magnitude of the sample with the 1 g gravity
/// baseline removed. A device at rest reads a magnitude of ~1 g, so the result
/// is ~0 when stationary. Stateless, one output per raw sample, no smoothing.
pub fn net_acceleration(sample: &AccelSample) -> f64 {
    (sample.magnitude() - 1.0).abs() * GRAVITY_MPS2
}
