use anyhow::{bail, Context, Result};
use chrono::Utc;
use serde::Deserialize;

use stridelog::models::{AccelSample, ClassifierConfig, LocationFix};
use stridelog::services::route;
use stridelog::utils::config;
use stridelog::{SessionRecorder, SessionStore, SessionSummary};

/// One second of recorded sensor data. Any field may be absent, matching a
/// sensor that produced nothing in that second.
#[derive(Debug, Deserialize)]
struct TraceRow {
    #[serde(default)]
    location: Option<LocationFix>,
    #[serde(default)]
    accelerometer: Option<AccelSample>,
    #[serde(default)]
    step_count: Option<i64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    config::load_dotenv();
    env_logger::init();

    let data_dir = config::data_dir();
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("creating data dir {}", data_dir.display()))?;
    let store = SessionStore::open(&config::db_path())?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["run", trace_path] => run_trace(&store, trace_path).await,
        ["sessions"] => list_sessions(&store).await,
        ["show", id] => show_session(&store, id).await,
        ["delete", id] => {
            if store.delete_session(id).await {
                println!("deleted {}", id);
            } else {
                println!("delete failed");
            }
            Ok(())
        }
        ["clear"] => {
            if store.clear_all_sessions().await {
                println!("all sessions cleared");
            } else {
                println!("clear failed");
            }
            Ok(())
        }
        ["totals"] => {
            let totals = store.total_stats().await;
            println!("sessions:  {}", totals.total_sessions);
            println!("distance:  {}", route::format_distance(totals.total_distance_m));
            println!("calories:  {}", route::format_calories(totals.total_calories));
            println!("steps:     {}", route::format_steps(totals.total_steps));
            Ok(())
        }
        _ => {
            eprintln!("usage: stridelog run <trace.json> | sessions | show <id> | delete <id> | clear | totals");
            bail!("unrecognized arguments");
        }
    }
}

/// Replay a recorded sensor trace through the full pipeline at one row per
/// tick and persist the resulting session.
async fn run_trace(store: &SessionStore, trace_path: &str) -> Result<()> {
    let raw = std::fs::read_to_string(trace_path)
        .with_context(|| format!("reading trace {}", trace_path))?;
    let rows: Vec<TraceRow> = serde_json::from_str(&raw).context("parsing trace")?;

    let mut recorder = SessionRecorder::new(ClassifierConfig::default());
    recorder.start(Utc::now());

    for row in &rows {
        if let Some(fix) = &row.location {
            recorder.on_location(fix);
        }
        if let Some(sample) = &row.accelerometer {
            recorder.on_acceleration(sample);
        }
        if let Some(count) = row.step_count {
            recorder.on_step_count(count);
        }
        recorder.tick();
    }

    let summary = recorder.finish();
    print_summary(&summary);

    if store.save_session(summary).await {
        println!("session saved");
    } else {
        println!("session NOT saved (storage failure)");
    }
    Ok(())
}

async fn list_sessions(store: &SessionStore) -> Result<()> {
    let sessions = store.get_all_sessions().await;
    if sessions.is_empty() {
        println!("no sessions recorded");
        return Ok(());
    }
    for session in sessions {
        println!(
            "{}  {}  {}  {}  {}",
            session.id,
            session.date.format("%Y-%m-%d %H:%M"),
            session.duration,
            route::format_distance(session.distance_m),
            route::format_steps(session.steps),
        );
    }
    Ok(())
}

async fn show_session(store: &SessionStore, id: &str) -> Result<()> {
    match store.get_session_by_id(id).await {
        Some(session) => {
            print_summary(&session);
            let region = route::map_region(&session.route);
            println!(
                "map region: center ({:.5}, {:.5}), span ({:.4}, {:.4})",
                region.latitude, region.longitude, region.latitude_delta, region.longitude_delta
            );
            Ok(())
        }
        None => {
            println!("session not found: {}", id);
            Ok(())
        }
    }
}

fn print_summary(summary: &SessionSummary) {
    println!("session   {}", summary.id);
    println!("date      {}", summary.date.format("%Y-%m-%d %H:%M:%S"));
    println!("duration  {}", summary.duration);
    println!("distance  {}", route::format_distance(summary.distance_m));
    println!("calories  {}", route::format_calories(summary.calories));
    println!("steps     {}", route::format_steps(summary.steps));
    println!("log entries: {}, route points: {}", summary.logs.len(), summary.route.len());
    if let Some(last) = summary.logs.last() {
        println!(
            "final state: {} ({}%) at {:.2} m/s",
            last.activity, last.confidence, last.speed_mps
        );
    }
}
