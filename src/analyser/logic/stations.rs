use super::mode::mode;
use super::table::{END_STATION, START_STATION, TripTable};
use super::types::{StationStats, Trip};
use crate::error::{BikeshareError, Result};

/// Most popular start station, end station, and directed start/end pair.
///
/// # Errors
///
/// [`BikeshareError::EmptyResult`] when the table has no station values.
pub fn compute_stations(table: &TripTable) -> Result<StationStats> {
    let starts = table.text(START_STATION)?;
    let ends = table.text(END_STATION)?;

    let popular_start = mode(starts.iter().flatten().cloned())
        .ok_or(BikeshareError::EmptyResult("most popular start station"))?;
    let popular_end = mode(ends.iter().flatten().cloned())
        .ok_or(BikeshareError::EmptyResult("most popular end station"))?;

    let trips = starts
        .into_iter()
        .zip(ends)
        .filter_map(|(start, end)| Some(Trip { start: start?, end: end? }));
    let popular_trip =
        mode(trips).ok_or(BikeshareError::EmptyResult("most popular trip"))?;

    Ok(StationStats {
        popular_start,
        popular_end,
        popular_trip,
    })
}
