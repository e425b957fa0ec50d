use super::duration::compute_duration;
use super::filter::filter_trips;
use super::io::load_trips;
use super::stations::compute_stations;
use super::table::TripTable;
use super::temporal::compute_temporal;
use super::types::{DurationStats, FilterSpec, StationStats, TemporalStats, UserStats};
use super::users::compute_users;
use crate::error::Result;
use std::path::Path;
use std::time::{Duration, Instant};

/// Outcome of one statistics pass and how long it took.
#[derive(Debug)]
pub struct PassOutcome<T> {
    pub result: Result<T>,
    pub elapsed: Duration,
}

fn timed<T>(name: &str, pass: impl FnOnce() -> Result<T>) -> PassOutcome<T> {
    let start = Instant::now();
    let result = pass();
    let elapsed = start.elapsed();

    match &result {
        Ok(_) => tracing::debug!(pass = name, ?elapsed, "Statistics pass finished"),
        Err(e) if e.is_empty_result() => {
            tracing::info!(pass = name, "Statistics pass had no records: {e}");
        }
        Err(e) => tracing::warn!(pass = name, "Statistics pass failed: {e}"),
    }

    PassOutcome { result, elapsed }
}

/// All four statistics for one filtered table.
#[derive(Debug)]
pub struct QueryReport {
    pub row_count: usize,
    pub temporal: PassOutcome<TemporalStats>,
    pub stations: PassOutcome<StationStats>,
    pub duration: PassOutcome<DurationStats>,
    pub users: PassOutcome<UserStats>,
}

/// Runs every statistics pass over `table`.
///
/// Passes are independent: an error in one is recorded in its outcome and
/// the remaining passes still run.
pub fn run_query(table: &TripTable) -> QueryReport {
    QueryReport {
        row_count: table.len(),
        temporal: timed("temporal", || compute_temporal(table)),
        stations: timed("stations", || compute_stations(table)),
        duration: timed("duration", || compute_duration(table)),
        users: timed("users", || compute_users(table)),
    }
}

/// Loads a dataset and applies `spec` to it.
///
/// # Errors
///
/// Propagates loader and filter failures.
pub fn load_filtered(path: &Path, spec: &FilterSpec) -> Result<TripTable> {
    let table = load_trips(path)?;
    let filtered = filter_trips(&table, spec)?;
    tracing::info!(
        filter = %spec,
        total = table.len(),
        matching = filtered.len(),
        "Filtered trip dataset"
    );
    Ok(filtered)
}
