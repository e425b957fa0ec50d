use super::table::TripTable;
use super::types::FilterSpec;
use crate::error::Result;
use chrono::{Datelike as _, NaiveDateTime};
use polars::prelude::*;

fn accepts(spec: &FilterSpec, start: NaiveDateTime) -> bool {
    let month_ok = spec.month.is_none_or(|m| start.month() == m.number());
    let day_ok = spec
        .weekday
        .is_none_or(|d| start.weekday().num_days_from_monday() == d.index());
    month_ok && day_ok
}

/// Narrows `table` to trips whose start time satisfies every restriction in `spec`.
///
/// Returns a new table; the input is left untouched. Rows with a null start
/// time never survive an active restriction.
///
/// # Errors
///
/// Fails only if the start-time column cannot be read or the mask cannot be applied.
pub fn filter_trips(table: &TripTable, spec: &FilterSpec) -> Result<TripTable> {
    if spec.is_unrestricted() {
        return Ok(table.clone());
    }

    let mask: BooleanChunked = table
        .start_times()?
        .into_iter()
        .map(|start| start.is_some_and(|t| accepts(spec, t)))
        .collect();

    let narrowed = table.frame().filter(&mask)?;
    tracing::debug!(
        filter = %spec,
        before = table.len(),
        after = narrowed.height(),
        "Applied trip filter"
    );
    Ok(table.with_frame(narrowed))
}
