use serde::{Deserialize, Serialize};

/// Kind of movement inferred from the speed/acceleration pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Idle,
    Walking,
    Running,
    Vehicle,
    Unknown,
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ActivityKind::Idle => "idle",
            ActivityKind::Walking => "walking",
            ActivityKind::Running => "running",
            ActivityKind::Vehicle => "vehicle",
            ActivityKind::Unknown => "unknown",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivityClassification {
    pub kind: ActivityKind,
    /// Percentage in [0, 100].
    pub confidence: u8,
}

/// One-per-second snapshot of the running session, appended to the session log.
/// Entries are never mutated once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLogEntry {
    /// Tick index within the session, starting at 1.
    pub id: u64,
    /// Elapsed time formatted as MM:SS, or HH:MM:SS once the session passes an hour.
    pub duration: String,
    pub distance_m: f64,
    pub steps: i64,
    pub calories: f64,
    pub activity: ActivityKind,
    pub speed_mps: f64,
    pub acceleration_mps2: f64,
    pub confidence: u8,
    pub latitude: f64,
    pub longitude: f64,
}
