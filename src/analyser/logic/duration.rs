use super::table::{TRIP_DURATION, TripTable};
use super::types::DurationStats;
use crate::error::{BikeshareError, Result};

/// Total and mean trip duration in seconds, ignoring null cells.
///
/// An empty table still has a total (zero) but no mean, so `mean_seconds`
/// carries [`BikeshareError::EmptyResult`] in that case. Negative durations
/// are summed as they are.
///
/// # Errors
///
/// Fails only if the duration column cannot be read.
pub fn compute_duration(table: &TripTable) -> Result<DurationStats> {
    let durations: Vec<f64> = table.numbers(TRIP_DURATION)?.into_iter().flatten().collect();

    // `Iterator::sum` over no floats yields -0.0
    let total_seconds = durations.iter().fold(0.0, |acc, d| acc + d);
    let mean_seconds = if durations.is_empty() {
        Err(BikeshareError::EmptyResult("mean trip duration"))
    } else {
        Ok(total_seconds / durations.len() as f64)
    };

    Ok(DurationStats {
        total_seconds,
        mean_seconds,
    })
}
