use std::path::{Path, PathBuf};

use anyhow::Result;
use rusqlite::Connection;

use crate::database;
use crate::models::{SessionSummary, TotalStats};

const SESSIONS_KEY: &str = "workout_sessions";

/// Append-only session collection held as one JSON array under a single
/// key-value slot.
///
/// Failure policy: storage and serialization errors are logged and surfaced
/// as `false` or an empty result. Callers cannot distinguish "no data" from
/// "storage error"; no operation retries. All SQLite work runs on the
/// blocking pool.
#[derive(Debug, Clone)]
pub struct SessionStore {
    db_path: PathBuf,
}

impl SessionStore {
    /// Open (creating if needed) the store at `db_path`.
    pub fn open(db_path: &Path) -> Result<Self> {
        // Fail loudly at startup; later operations degrade instead.
        database::init_database(db_path)?;
        Ok(Self {
            db_path: db_path.to_path_buf(),
        })
    }

    /// Append a completed session. Returns false if persistence failed.
    pub async fn save_session(&self, summary: SessionSummary) -> bool {
        let db_path = self.db_path.clone();
        let result = tokio::task::spawn_blocking(move || -> Result<String> {
            let conn = Connection::open(&db_path)?;
            let mut sessions = load_sessions(&conn)?;
            let id = summary.id.clone();
            sessions.push(summary);
            store_sessions(&conn, &sessions)?;
            Ok(id)
        })
        .await;

        match result {
            Ok(Ok(id)) => {
                log::info!("[SessionStore] session saved: {}", id);
                true
            }
            Ok(Err(e)) => {
                log::error!("[SessionStore] failed to save session: {}", e);
                false
            }
            Err(e) => {
                log::error!("[SessionStore] save task failed: {}", e);
                false
            }
        }
    }

    /// All stored sessions, most recent first. Empty on any failure.
    pub async fn get_all_sessions(&self) -> Vec<SessionSummary> {
        let db_path = self.db_path.clone();
        let result = tokio::task::spawn_blocking(move || -> Result<Vec<SessionSummary>> {
            let conn = Connection::open(&db_path)?;
            let mut sessions = load_sessions(&conn)?;
            sessions.reverse();
            Ok(sessions)
        })
        .await;

        match result {
            Ok(Ok(sessions)) => {
                log::debug!("[SessionStore] retrieved {} sessions", sessions.len());
                sessions
            }
            Ok(Err(e)) => {
                log::error!("[SessionStore] failed to read sessions: {}", e);
                Vec::new()
            }
            Err(e) => {
                log::error!("[SessionStore] read task failed: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn get_session_by_id(&self, id: &str) -> Option<SessionSummary> {
        let sessions = self.get_all_sessions().await;
        let found = sessions.into_iter().find(|s| s.id == id);
        if found.is_none() {
            log::debug!("[SessionStore] session not found: {}", id);
        }
        found
    }

    /// Remove a session by id. Deleting an id that is not present still
    /// succeeds and leaves the collection unchanged.
    pub async fn delete_session(&self, id: &str) -> bool {
        let db_path = self.db_path.clone();
        let id = id.to_string();
        let result = tokio::task::spawn_blocking(move || -> Result<()> {
            let conn = Connection::open(&db_path)?;
            let mut sessions = load_sessions(&conn)?;
            sessions.retain(|s| s.id != id);
            store_sessions(&conn, &sessions)?;
            Ok(())
        })
        .await;

        match result {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                log::error!("[SessionStore] failed to delete session: {}", e);
                false
            }
            Err(e) => {
                log::error!("[SessionStore] delete task failed: {}", e);
                false
            }
        }
    }

    /// Drop the whole collection.
    pub async fn clear_all_sessions(&self) -> bool {
        let db_path = self.db_path.clone();
        let result = tokio::task::spawn_blocking(move || -> Result<()> {
            let conn = Connection::open(&db_path)?;
            database::queries::kv_delete(&conn, SESSIONS_KEY)?;
            Ok(())
        })
        .await;

        match result {
            Ok(Ok(())) => {
                log::info!("[SessionStore] all sessions cleared");
                true
            }
            Ok(Err(e)) => {
                log::error!("[SessionStore] failed to clear sessions: {}", e);
                false
            }
            Err(e) => {
                log::error!("[SessionStore] clear task failed: {}", e);
                false
            }
        }
    }

    /// Aggregate totals across every stored session. Zeroes on any failure.
    pub async fn total_stats(&self) -> TotalStats {
        let sessions = self.get_all_sessions().await;
        sessions.iter().fold(TotalStats::default(), |acc, session| TotalStats {
            total_sessions: acc.total_sessions + 1,
            total_distance_m: acc.total_distance_m + session.distance_m,
            total_calories: acc.total_calories + session.calories,
            total_steps: acc.total_steps + session.steps,
        })
    }
}

fn load_sessions(conn: &Connection) -> Result<Vec<SessionSummary>> {
    match database::queries::kv_get(conn, SESSIONS_KEY)? {
        Some(blob) => Ok(serde_json::from_slice(&blob)?),
        None => Ok(Vec::new()),
    }
}

fn store_sessions(conn: &Connection, sessions: &[SessionSummary]) -> Result<()> {
    let blob = serde_json::to_vec(sessions)?;
    database::queries::kv_set(conn, SESSIONS_KEY, &blob)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityKind, ActivityLogEntry, RoutePoint};
    use chrono::Utc;

    fn temp_store() -> (std::path::PathBuf, SessionStore) {
        let path =
            std::env::temp_dir().join(format!("stridelog-store-{}.db", uuid::Uuid::new_v4()));
        let store = SessionStore::open(&path).expect("open temp store");
        (path, store)
    }

    fn summary(id: &str, distance: f64, steps: i64) -> SessionSummary {
        SessionSummary {
            id: id.to_string(),
            date: Utc::now(),
            distance_m: distance,
            duration: "10:00".to_string(),
            calories: steps as f64 * 0.04,
            steps,
            logs: vec![ActivityLogEntry {
                id: 1,
                duration: "00:01".to_string(),
                distance_m: distance,
                steps,
                calories: steps as f64 * 0.04,
                activity: ActivityKind::Walking,
                speed_mps: 1.4,
                acceleration_mps2: 0.8,
                confidence: 85,
                latitude: 48.8566,
                longitude: 2.3522,
            }],
            route: vec![RoutePoint {
                latitude: 48.8566,
                longitude: 2.3522,
            }],
        }
    }

    #[tokio::test]
    async fn saved_session_round_trips_unchanged() {
        let (path, store) = temp_store();
        let original = summary("s1", 1234.5, 900);

        assert!(store.save_session(original.clone()).await);
        let loaded = store.get_session_by_id("s1").await.expect("session present");
        assert_eq!(loaded, original);
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn sessions_listed_most_recent_first() {
        let (path, store) = temp_store();
        store.save_session(summary("first", 100.0, 10)).await;
        store.save_session(summary("second", 200.0, 20)).await;
        store.save_session(summary("third", 300.0, 30)).await;

        let all = store.get_all_sessions().await;
        let ids: Vec<&str> = all.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["third", "second", "first"]);
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn delete_removes_only_matching_session() {
        let (path, store) = temp_store();
        store.save_session(summary("keep", 100.0, 10)).await;
        store.save_session(summary("drop", 200.0, 20)).await;

        assert!(store.delete_session("drop").await);
        let all = store.get_all_sessions().await;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, "keep");
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn deleting_absent_id_succeeds_without_changes() {
        let (path, store) = temp_store();
        store.save_session(summary("only", 100.0, 10)).await;

        assert!(store.delete_session("missing").await);
        assert_eq!(store.get_all_sessions().await.len(), 1);
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn clear_empties_the_collection() {
        let (path, store) = temp_store();
        store.save_session(summary("a", 100.0, 10)).await;
        store.save_session(summary("b", 200.0, 20)).await;

        assert!(store.clear_all_sessions().await);
        assert!(store.get_all_sessions().await.is_empty());
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn totals_sum_across_sessions() {
        let (path, store) = temp_store();
        store.save_session(summary("a", 100.0, 10)).await;
        store.save_session(summary("b", 250.0, 40)).await;

        let totals = store.total_stats().await;
        assert_eq!(totals.total_sessions, 2);
        assert_eq!(totals.total_distance_m, 350.0);
        assert_eq!(totals.total_steps, 50);
        assert!((totals.total_calories - 2.0).abs() < 1e-12);
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn empty_store_reads_as_no_data() {
        let (path, store) = temp_store();
        assert!(store.get_all_sessions().await.is_empty());
        assert!(store.get_session_by_id("anything").await.is_none());
        assert_eq!(store.total_stats().await, TotalStats::default());
        let _ = std::fs::remove_file(path);
    }
}
