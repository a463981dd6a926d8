use std::path::PathBuf;
use std::time::Duration;

const ENV_DATA_DIR: &str = "STRIDELOG_DATA_DIR";
const ENV_TICK_MS: &str = "STRIDELOG_TICK_MS";
const ENV_ACCEL_INTERVAL_MS: &str = "STRIDELOG_ACCEL_INTERVAL_MS";

const DEFAULT_TICK_MS: u64 = 1000;
const DEFAULT_ACCEL_INTERVAL_MS: u64 = 1000;

pub fn load_dotenv() {
    let _ = dotenvy::dotenv();
}

pub fn data_dir() -> PathBuf {
    std::env::var(ENV_DATA_DIR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

pub fn db_path() -> PathBuf {
    data_dir().join("stridelog.db")
}

/// Log-snapshot cadence; 1 Hz unless overridden (replays shrink it).
pub fn tick_interval() -> Duration {
    Duration::from_millis(env_ms(ENV_TICK_MS, DEFAULT_TICK_MS))
}

/// Requested accelerometer update interval.
pub fn accel_interval() -> Duration {
    Duration::from_millis(env_ms(ENV_ACCEL_INTERVAL_MS, DEFAULT_ACCEL_INTERVAL_MS))
}

fn env_ms(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .filter(|&ms| ms > 0)
        .unwrap_or(default)
}
