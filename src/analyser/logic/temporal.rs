use super::mode::mode;
use super::table::TripTable;
use super::types::{MONTH_NAMES, TemporalStats, WEEKDAY_NAMES};
use crate::error::{BikeshareError, Result};
use chrono::{Datelike as _, Timelike as _};

/// Most frequent start month, weekday and hour.
///
/// Each dimension is derived from `Start Time` and its mode taken
/// independently; ties go to the value seen first.
///
/// # Errors
///
/// [`BikeshareError::EmptyResult`] when there are no start times to inspect.
pub fn compute_temporal(table: &TripTable) -> Result<TemporalStats> {
    let starts: Vec<_> = table.start_times()?.into_iter().flatten().collect();

    let month = mode(starts.iter().map(|t| t.month0()))
        .and_then(|m| MONTH_NAMES.get(m as usize))
        .ok_or(BikeshareError::EmptyResult("most common month"))?;
    let day = mode(starts.iter().map(|t| t.weekday().num_days_from_monday()))
        .and_then(|d| WEEKDAY_NAMES.get(d as usize))
        .ok_or(BikeshareError::EmptyResult("most common day"))?;
    let hour = mode(starts.iter().map(|t| t.hour()))
        .ok_or(BikeshareError::EmptyResult("most common hour"))?;

    Ok(TemporalStats {
        month: (*month).to_owned(),
        day: (*day).to_owned(),
        hour,
    })
}
