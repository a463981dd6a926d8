use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use thiserror::Error;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

use crate::models::{
    AccelSample, ActivityLogEntry, ClassifierConfig, LocationFix, SessionSummary, TotalStats,
    TrackerSnapshot,
};
use crate::services::session_recorder::SessionRecorder;
use crate::services::session_store::SessionStore;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("a session is already active")]
    SessionActive,
    #[error("no active session")]
    NotTracking,
}

/// Sensor streams for one session. A `None` stream means the permission was
/// denied or the sensor is unavailable; tracking proceeds without it.
pub struct SensorStreams {
    pub location: Option<mpsc::Receiver<LocationFix>>,
    pub accelerometer: Option<mpsc::Receiver<AccelSample>>,
    pub step_count: Option<mpsc::Receiver<i64>>,
    /// Cumulative count from the platform's step-history query, used once to
    /// baseline the counter. Without it the first stream reading baselines.
    pub step_baseline: Option<i64>,
}

/// Live session orchestration: consumes the sensor streams and drives the
/// 1 Hz log tick, all feeding one shared recorder. One active session at a
/// time.
///
/// `stop()` aborts and awaits every spawned task before the summary is built,
/// so no sensor callback or tick runs after it returns, on any exit path.
pub struct WorkoutTracker {
    recorder: Arc<Mutex<SessionRecorder>>,
    store: SessionStore,
    tick_interval: Duration,
    tasks: Vec<JoinHandle<()>>,
    running: Arc<AtomicBool>,
}

impl WorkoutTracker {
    pub fn new(store: SessionStore, config: ClassifierConfig, tick_interval: Duration) -> Self {
        Self {
            recorder: Arc::new(Mutex::new(SessionRecorder::new(config))),
            store,
            tick_interval,
            tasks: Vec::new(),
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Begin a session, subscribing to whichever sensor streams are present.
    pub async fn start(&mut self, streams: SensorStreams) -> Result<(), TrackerError> {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(TrackerError::SessionActive);
        }

        {
            let mut recorder = self.recorder.lock().await;
            recorder.start(Utc::now());
            if let Some(baseline) = streams.step_baseline {
                recorder.set_step_baseline(baseline);
            }
        }

        if let Some(mut rx) = streams.location {
            let recorder = Arc::clone(&self.recorder);
            self.tasks.push(tokio::spawn(async move {
                while let Some(fix) = rx.recv().await {
                    recorder.lock().await.on_location(&fix);
                }
            }));
        } else {
            log::warn!("[Tracker] location unavailable, tracking without GPS");
        }

        if let Some(mut rx) = streams.accelerometer {
            let recorder = Arc::clone(&self.recorder);
            self.tasks.push(tokio::spawn(async move {
                while let Some(sample) = rx.recv().await {
                    recorder.lock().await.on_acceleration(&sample);
                }
            }));
        } else {
            log::warn!("[Tracker] accelerometer unavailable");
        }

        if let Some(mut rx) = streams.step_count {
            let recorder = Arc::clone(&self.recorder);
            self.tasks.push(tokio::spawn(async move {
                while let Some(cumulative) = rx.recv().await {
                    recorder.lock().await.on_step_count(cumulative);
                }
            }));
        } else {
            log::warn!("[Tracker] step counter unavailable");
        }

        let recorder = Arc::clone(&self.recorder);
        let tick_interval = self.tick_interval;
        self.tasks.push(tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick_interval);
            // The first tick completes immediately; consume it so log entries
            // start one interval after the session does.
            interval.tick().await;
            loop {
                interval.tick().await;
                recorder.lock().await.tick();
            }
        }));

        log::info!("[Tracker] session started");
        Ok(())
    }

    /// End the session: tear down all sensor/tick tasks, build the summary,
    /// and append it to the store. Returns the summary even when persistence
    /// fails (the failure is logged by the store).
    pub async fn stop(&mut self) -> Result<SessionSummary, TrackerError> {
        if !self.running.swap(false, Ordering::SeqCst) {
            return Err(TrackerError::NotTracking);
        }

        // Unsubscribe everything before touching the recorder so no callback
        // fires after this point.
        for task in self.tasks.drain(..) {
            task.abort();
            let _ = task.await;
        }

        let summary = self.recorder.lock().await.finish();
        self.store.save_session(summary.clone()).await;
        log::info!("[Tracker] session stopped");
        Ok(summary)
    }

    /// Read-only view of the running session.
    pub async fn snapshot(&self) -> TrackerSnapshot {
        self.recorder.lock().await.snapshot()
    }

    /// Copy of the running session's log so far.
    pub async fn session_logs(&self) -> Vec<ActivityLogEntry> {
        self.recorder.lock().await.logs().to_vec()
    }

    pub async fn sessions(&self) -> Vec<SessionSummary> {
        self.store.get_all_sessions().await
    }

    pub async fn delete_session(&self, id: &str) -> bool {
        self.store.delete_session(id).await
    }

    pub async fn clear_sessions(&self) -> bool {
        self.store.clear_all_sessions().await
    }

    pub async fn total_stats(&self) -> TotalStats {
        self.store.total_stats().await
    }
}

impl Drop for WorkoutTracker {
    fn drop(&mut self) {
        // Guaranteed cleanup when the tracker is discarded mid-session.
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}
