use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{ActivityKind, ActivityLogEntry};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Persisted record of one completed workout. Owns its logs and route by
/// value; never mutated after creation, only appended to the store or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: String,
    pub date: DateTime<Utc>,
    pub distance_m: f64,
    /// Formatted elapsed time (MM:SS or HH:MM:SS).
    pub duration: String,
    pub calories: f64,
    pub steps: i64,
    pub logs: Vec<ActivityLogEntry>,
    pub route: Vec<RoutePoint>,
}

/// Aggregate statistics across every stored session.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TotalStats {
    pub total_sessions: i64,
    pub total_distance_m: f64,
    pub total_calories: f64,
    pub total_steps: i64,
}

/// Read-only view of the running session for presentation layers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackerSnapshot {
    pub latitude: f64,
    pub longitude: f64,
    pub speed_mps: f64,
    pub acceleration_mps2: f64,
    pub activity: ActivityKind,
    pub confidence: u8,
    pub duration: String,
    pub distance_m: f64,
    pub steps: i64,
    pub calories: f64,
}
