//! Workout session tracking engine.
//!
//! Consumes GPS, accelerometer, and step-count streams, classifies the
//! wearer's activity from speed/acceleration thresholds, accumulates distance
//! via the Haversine formula, snapshots a once-per-second activity log, and
//! persists completed sessions to a local append-only store.

pub mod database;
pub mod models;
pub mod services;
pub mod utils;

pub use models::{
    AccelSample, ActivityClassification, ActivityKind, ActivityLogEntry, ClassifierConfig,
    FilteredLocation, LocationFix, RoutePoint, SessionSummary, TotalStats, TrackerSnapshot,
};
pub use services::session_recorder::SessionRecorder;
pub use services::session_store::SessionStore;
pub use services::tracker::{SensorStreams, TrackerError, WorkoutTracker};
