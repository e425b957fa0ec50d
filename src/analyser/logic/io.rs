use super::table::TripTable;
use crate::error::{BikeshareError, Result, ResultExt as _};
use polars::prelude::*;
use std::path::Path;

/// Reads a city CSV into a normalised [`TripTable`].
///
/// Dates are parsed while scanning; any timestamps left as text are parsed
/// afterwards by [`TripTable::from_frame`].
///
/// # Errors
///
/// Fails for unsupported extensions, unreadable files, a missing required
/// column or unparseable timestamps.
pub fn load_trips(path: &Path) -> Result<TripTable> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();

    if ext != "csv" {
        return Err(BikeshareError::InvalidChoice {
            field: "dataset extension",
            value: ext,
            expected: "csv",
        });
    }

    if !path.exists() {
        return Err(BikeshareError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("dataset not found: {}", path.display()),
        )));
    }

    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(10000))
        .with_has_header(true)
        .with_try_parse_dates(true)
        .finish()?
        .collect()
        .with_context(|| format!("Failed to read CSV {}", path.display()))?;

    let table = TripTable::from_frame(df)?;
    tracing::info!(
        path = %path.display(),
        rows = table.len(),
        gender = table.schema().has_gender,
        birth_year = table.schema().has_birth_year,
        "Loaded trip dataset"
    );
    Ok(table)
}
