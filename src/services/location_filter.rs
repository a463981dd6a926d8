use crate::models::{FilteredLocation, LocationFix};

/// Ignore this many fixes after the first one while GPS accuracy stabilizes.
const WARMUP_READINGS: u32 = 5;
/// 50 m/s = 180 km/h, anything above is treated as a GPS artifact.
const MAX_REASONABLE_SPEED_MPS: f64 = 50.0;
/// Movement below 1 m between fixes is treated as stationary drift.
const MIN_DISTANCE_THRESHOLD_M: f64 = 1.0;
/// Gaps longer than this make the calculated speed unreliable.
const MAX_SPEED_CALC_GAP_SECS: f64 = 5.0;

const EARTH_RADIUS_M: f64 = 6_371_000.0;

#[derive(Debug, Clone, Copy)]
struct ReferencePoint {
    latitude: f64,
    longitude: f64,
    timestamp_ms: i64,
}

/// Stateful filter over the raw fix stream: discards warm-up readings,
/// suppresses stationary drift, sanitizes speed, and accumulates distance.
///
/// State progression per session: first fix → warm-up fixes (no distance) →
/// one post-warmup reset fix (reference timestamp restarted so the warm-up gap
/// never inflates a speed calculation) → steady state.
#[derive(Debug, Default)]
pub struct LocationFilter {
    previous: Option<ReferencePoint>,
    total_distance_m: f64,
    update_count: u32,
}

impl LocationFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_distance_m(&self) -> f64 {
        self.total_distance_m
    }

    /// Clear all state back to "no fix seen". Called at session start/stop.
    pub fn reset(&mut self) {
        self.previous = None;
        self.total_distance_m = 0.0;
        self.update_count = 0;
        log::debug!("[LocationFilter] reset");
    }

    /// Process one raw fix and emit its sanitized form.
    pub fn update(&mut self, fix: &LocationFix) -> FilteredLocation {
        self.update_count += 1;

        let reference = ReferencePoint {
            latitude: fix.latitude,
            longitude: fix.longitude,
            timestamp_ms: fix.timestamp_ms,
        };

        // First fix: establish the reference, report 0 speed rather than a
        // potentially wild GPS estimate.
        let Some(previous) = self.previous else {
            self.previous = Some(reference);
            log::debug!("[LocationFilter] first fix, initializing with 0 speed");
            return self.zero_output(fix);
        };

        // Warm-up fixes move the reference without accumulating distance.
        if self.update_count <= 1 + WARMUP_READINGS {
            self.previous = Some(reference);
            log::debug!(
                "[LocationFilter] warmup fix {}/{}",
                self.update_count - 1,
                WARMUP_READINGS
            );
            return self.zero_output(fix);
        }

        // First post-warmup fix: restart the reference timestamp so the next
        // speed calculation does not span the whole warm-up period.
        if self.update_count == 2 + WARMUP_READINGS {
            self.previous = Some(reference);
            log::debug!("[LocationFilter] post-warmup reset");
            return self.zero_output(fix);
        }

        let distance_m = haversine_m(
            previous.latitude,
            previous.longitude,
            fix.latitude,
            fix.longitude,
        );
        let is_stationary = distance_m < MIN_DISTANCE_THRESHOLD_M;

        if !is_stationary {
            self.total_distance_m += distance_m;
        }

        let elapsed_secs = (fix.timestamp_ms - previous.timestamp_ms) as f64 / 1000.0;
        let mut speed_mps = if is_stationary {
            log::debug!("[LocationFilter] below movement threshold, speed forced to 0");
            0.0
        } else {
            match fix.speed_mps {
                None => {
                    if elapsed_secs > MAX_SPEED_CALC_GAP_SECS {
                        log::debug!(
                            "[LocationFilter] gap too large ({:.1}s), speed set to 0",
                            elapsed_secs
                        );
                        0.0
                    } else {
                        calculated_speed(distance_m, elapsed_secs)
                    }
                }
                Some(gps_speed) if gps_speed < 0.0 => {
                    if elapsed_secs > MAX_SPEED_CALC_GAP_SECS {
                        0.0
                    } else {
                        calculated_speed(distance_m, elapsed_secs)
                    }
                }
                Some(gps_speed) if gps_speed > MAX_REASONABLE_SPEED_MPS => {
                    log::debug!(
                        "[LocationFilter] GPS speed implausible ({:.2} m/s), using calculated",
                        gps_speed
                    );
                    if elapsed_secs > MAX_SPEED_CALC_GAP_SECS {
                        0.0
                    } else {
                        calculated_speed(distance_m, elapsed_secs)
                    }
                }
                Some(gps_speed) => gps_speed,
            }
        };

        if speed_mps > MAX_REASONABLE_SPEED_MPS {
            log::debug!(
                "[LocationFilter] capping speed {:.2} → {:.2} m/s",
                speed_mps,
                MAX_REASONABLE_SPEED_MPS
            );
            speed_mps = MAX_REASONABLE_SPEED_MPS;
        }

        self.previous = Some(reference);

        FilteredLocation {
            latitude: fix.latitude,
            longitude: fix.longitude,
            speed_mps,
            distance_delta_m: if is_stationary { 0.0 } else { distance_m },
            total_distance_m: self.total_distance_m,
        }
    }

    fn zero_output(&self, fix: &LocationFix) -> FilteredLocation {
        FilteredLocation {
            latitude: fix.latitude,
            longitude: fix.longitude,
            speed_mps: 0.0,
            distance_delta_m: 0.0,
            total_distance_m: self.total_distance_m,
        }
    }
}

fn calculated_speed(distance_m: f64, elapsed_secs: f64) -> f64 {
    // Out-of-order fixes produce a non-positive elapsed time; a negative
    // speed must never leak out.
    if elapsed_secs <= 0.0 {
        return 0.0;
    }
    distance_m / elapsed_secs
}

/// Great-circle distance in meters between two coordinates (Haversine).
pub fn haversine_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_phi = (lat2 - lat1).to_radians();
    let delta_lambda = (lon2 - lon1).to_radians();

    let a = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}
