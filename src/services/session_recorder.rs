use chrono::{DateTime, Utc};

use crate::models::{
    AccelSample, ActivityClassification, ActivityLogEntry, ClassifierConfig, FilteredLocation,
    LocationFix, RoutePoint, SessionSummary, TrackerSnapshot,
};
use crate::services::accelerometer;
use crate::services::classifier;
use crate::services::location_filter::LocationFilter;
use crate::services::pedometer::StepCounter;

/// Per-session orchestration state: the filters, the step counter, the latest
/// sensor values, and the append-only activity log.
///
/// The recorder holds no timers and never reads the wall clock for elapsed
/// time; the owner drives it by calling `tick()` once per second, so tests can
/// advance time manually. A snapshot may carry a sensor value up to one sensor
/// interval stale, which is accepted behavior.
#[derive(Debug)]
pub struct SessionRecorder {
    config: ClassifierConfig,
    location_filter: LocationFilter,
    step_counter: StepCounter,
    latest_location: Option<FilteredLocation>,
    latest_acceleration_mps2: f64,
    latest_steps: i64,
    latest_calories: f64,
    logs: Vec<ActivityLogEntry>,
    elapsed_secs: u64,
    started_at: Option<DateTime<Utc>>,
}

impl SessionRecorder {
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            config,
            location_filter: LocationFilter::new(),
            step_counter: StepCounter::new(),
            latest_location: None,
            latest_acceleration_mps2: 0.0,
            latest_steps: 0,
            latest_calories: 0.0,
            logs: Vec::new(),
            elapsed_secs: 0,
            started_at: None,
        }
    }

    /// Replace the classifier thresholds wholesale.
    pub fn set_config(&mut self, config: ClassifierConfig) {
        self.config = config;
    }

    /// Mark the session start. Clears any leftover state from a previous run.
    pub fn start(&mut self, started_at: DateTime<Utc>) {
        self.reset();
        self.started_at = Some(started_at);
        log::info!("[SessionRecorder] session started at {}", started_at);
    }

    pub fn is_active(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn on_location(&mut self, fix: &LocationFix) -> FilteredLocation {
        let filtered = self.location_filter.update(fix);
        self.latest_location = Some(filtered);
        filtered
    }

    pub fn on_acceleration(&mut self, sample: &AccelSample) -> f64 {
        let net = accelerometer::net_acceleration(sample);
        self.latest_acceleration_mps2 = net;
        net
    }

    pub fn set_step_baseline(&mut self, cumulative: i64) {
        self.step_counter.set_baseline(cumulative);
    }

    pub fn on_step_count(&mut self, cumulative: i64) {
        let update = self.step_counter.update(cumulative);
        self.latest_steps = update.steps;
        self.latest_calories = update.calories;
    }

    pub fn current_classification(&self) -> ActivityClassification {
        let speed = self.latest_location.map(|l| l.speed_mps).unwrap_or(0.0);
        classifier::classify(speed, self.latest_acceleration_mps2, &self.config)
    }

    /// Advance elapsed time by one second and append a log entry snapshotting
    /// the latest sensor values. Entries are immutable once appended.
    pub fn tick(&mut self) -> &ActivityLogEntry {
        self.elapsed_secs += 1;
        let classification = self.current_classification();
        let (latitude, longitude, speed) = match self.latest_location {
            Some(loc) => (loc.latitude, loc.longitude, loc.speed_mps),
            None => (0.0, 0.0, 0.0),
        };

        let entry = ActivityLogEntry {
            id: self.elapsed_secs,
            duration: format_elapsed(self.elapsed_secs),
            distance_m: self.location_filter.total_distance_m(),
            steps: self.latest_steps,
            calories: self.latest_calories,
            activity: classification.kind,
            speed_mps: speed,
            acceleration_mps2: self.latest_acceleration_mps2,
            confidence: classification.confidence,
            latitude,
            longitude,
        };
        self.logs.push(entry);
        self.logs.last().expect("entry just pushed")
    }

    pub fn logs(&self) -> &[ActivityLogEntry] {
        &self.logs
    }

    pub fn snapshot(&self) -> TrackerSnapshot {
        let classification = self.current_classification();
        let (latitude, longitude, speed) = match self.latest_location {
            Some(loc) => (loc.latitude, loc.longitude, loc.speed_mps),
            None => (0.0, 0.0, 0.0),
        };
        TrackerSnapshot {
            latitude,
            longitude,
            speed_mps: speed,
            acceleration_mps2: self.latest_acceleration_mps2,
            activity: classification.kind,
            confidence: classification.confidence,
            duration: format_elapsed(self.elapsed_secs),
            distance_m: self.location_filter.total_distance_m(),
            steps: self.latest_steps,
            calories: self.latest_calories,
        }
    }

    /// Build the persisted summary from the accumulated totals and log, then
    /// reset every filter and counter for the next session.
    pub fn finish(&mut self) -> SessionSummary {
        let route: Vec<RoutePoint> = self
            .logs
            .iter()
            .map(|entry| RoutePoint {
                latitude: entry.latitude,
                longitude: entry.longitude,
            })
            .collect();

        let summary = SessionSummary {
            id: uuid::Uuid::new_v4().to_string(),
            date: self.started_at.unwrap_or_else(Utc::now),
            distance_m: self.location_filter.total_distance_m(),
            duration: format_elapsed(self.elapsed_secs),
            calories: self.latest_calories,
            steps: self.latest_steps,
            logs: std::mem::take(&mut self.logs),
            route,
        };

        log::info!(
            "[SessionRecorder] session {} finished: {} / {:.1} m / {} steps",
            summary.id,
            summary.duration,
            summary.distance_m,
            summary.steps
        );

        self.reset();
        summary
    }

    /// Clear all per-session state without producing a summary.
    pub fn reset(&mut self) {
        self.location_filter.reset();
        self.step_counter.reset();
        self.latest_location = None;
        self.latest_acceleration_mps2 = 0.0;
        self.latest_steps = 0;
        self.latest_calories = 0.0;
        self.logs.clear();
        self.elapsed_secs = 0;
        self.started_at = None;
    }
}

/// MM:SS below one hour, HH:MM:SS from one hour on.
pub fn format_elapsed(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}
