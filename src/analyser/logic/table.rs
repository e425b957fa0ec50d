//! The in-memory trip table.
//!
//! A [`TripTable`] wraps a polars [`DataFrame`] whose trip columns have been
//! normalised to fixed types on construction:
//!
//! | column          | dtype                 |
//! |-----------------|-----------------------|
//! | `Start Time`    | `Datetime(ms)`        |
//! | `End Time`      | `Datetime(ms)`        |
//! | `Start Station` | `String`              |
//! | `End Station`   | `String`              |
//! | `Trip Duration` | `Float64`             |
//! | `User Type`     | `String`              |
//! | `Gender`        | `String` (optional)   |
//! | `Birth Year`    | `Float64` (optional)  |
//!
//! The table is never mutated after construction; filtering builds a new one.

use super::types::{DatasetSchema, TripRecord};
use crate::error::{BikeshareError, Result};
use chrono::{DateTime, NaiveDateTime};
use polars::prelude::*;

pub const START_TIME: &str = "Start Time";
pub const END_TIME: &str = "End Time";
pub const START_STATION: &str = "Start Station";
pub const END_STATION: &str = "End Station";
pub const TRIP_DURATION: &str = "Trip Duration";
pub const USER_TYPE: &str = "User Type";
pub const GENDER: &str = "Gender";
pub const BIRTH_YEAR: &str = "Birth Year";

pub const REQUIRED_COLUMNS: [&str; 6] = [
    START_TIME,
    END_TIME,
    START_STATION,
    END_STATION,
    TRIP_DURATION,
    USER_TYPE,
];

const DATETIME_MS: DataType = DataType::Datetime(TimeUnit::Milliseconds, None);

#[derive(Clone, Debug)]
pub struct TripTable {
    df: DataFrame,
    schema: DatasetSchema,
}

impl TripTable {
    /// Validates and normalises a raw frame read from a dataset.
    ///
    /// # Errors
    ///
    /// Fails when a required column is missing or a timestamp cannot be parsed.
    pub fn from_frame(mut df: DataFrame) -> Result<Self> {
        for name in REQUIRED_COLUMNS {
            if df.get_column_index(name).is_none() {
                return Err(BikeshareError::MissingColumn(name.to_owned()));
            }
        }

        let schema = DatasetSchema {
            has_gender: df.get_column_index(GENDER).is_some(),
            has_birth_year: df.get_column_index(BIRTH_YEAR).is_some(),
        };

        for name in [START_TIME, END_TIME] {
            normalise_timestamps(&mut df, name)?;
        }

        let mut text_columns = vec![START_STATION, END_STATION, USER_TYPE];
        if schema.has_gender {
            text_columns.push(GENDER);
        }
        for name in text_columns {
            cast_column(&mut df, name, &DataType::String)?;
        }

        let mut numeric_columns = vec![TRIP_DURATION];
        if schema.has_birth_year {
            numeric_columns.push(BIRTH_YEAR);
        }
        for name in numeric_columns {
            cast_column(&mut df, name, &DataType::Float64)?;
        }

        Ok(Self { df, schema })
    }

    /// Builds a table from typed records.
    ///
    /// Optional columns are only created when `schema` says the dataset has them.
    ///
    /// # Errors
    ///
    /// Propagates polars construction errors.
    pub fn from_records(records: &[TripRecord], schema: DatasetSchema) -> Result<Self> {
        let millis = |f: fn(&TripRecord) -> NaiveDateTime| -> Vec<i64> {
            records
                .iter()
                .map(|r| f(r).and_utc().timestamp_millis())
                .collect()
        };

        let mut columns = vec![
            Series::new(START_TIME.into(), millis(|r| r.start_time)).cast(&DATETIME_MS)?,
            Series::new(END_TIME.into(), millis(|r| r.end_time)).cast(&DATETIME_MS)?,
            Series::new(
                START_STATION.into(),
                records
                    .iter()
                    .map(|r| r.start_station.clone())
                    .collect::<Vec<_>>(),
            ),
            Series::new(
                END_STATION.into(),
                records
                    .iter()
                    .map(|r| r.end_station.clone())
                    .collect::<Vec<_>>(),
            ),
            Series::new(
                TRIP_DURATION.into(),
                records
                    .iter()
                    .map(|r| r.trip_duration_seconds)
                    .collect::<Vec<_>>(),
            ),
            Series::new(
                USER_TYPE.into(),
                records
                    .iter()
                    .map(|r| r.user_type.clone())
                    .collect::<Vec<_>>(),
            ),
        ];

        if schema.has_gender {
            columns.push(Series::new(
                GENDER.into(),
                records
                    .iter()
                    .map(|r| r.gender.clone())
                    .collect::<Vec<Option<String>>>(),
            ));
        }
        if schema.has_birth_year {
            columns.push(Series::new(
                BIRTH_YEAR.into(),
                records
                    .iter()
                    .map(|r| r.birth_year.map(f64::from))
                    .collect::<Vec<Option<f64>>>(),
            ));
        }

        let df = DataFrame::new(columns.into_iter().map(Column::from).collect())?;
        Ok(Self { df, schema })
    }

    /// Same dataset schema, different rows.
    pub(crate) fn with_frame(&self, df: DataFrame) -> Self {
        Self {
            df,
            schema: self.schema,
        }
    }

    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    pub fn schema(&self) -> DatasetSchema {
        self.schema
    }

    pub fn len(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// Start timestamps in row order; `None` for null cells.
    ///
    /// # Errors
    ///
    /// Fails if the column is missing or not a datetime.
    pub fn start_times(&self) -> Result<Vec<Option<NaiveDateTime>>> {
        self.timestamps(START_TIME)
    }

    pub(crate) fn timestamps(&self, name: &str) -> Result<Vec<Option<NaiveDateTime>>> {
        let series = self.df.column(name)?.as_materialized_series();
        let ca = series.datetime()?;
        Ok(ca
            .physical()
            .into_iter()
            .map(|ms| ms.and_then(DateTime::from_timestamp_millis).map(|dt| dt.naive_utc()))
            .collect())
    }

    /// Text column values in row order.
    ///
    /// # Errors
    ///
    /// Fails if the column is missing or not a string column.
    pub fn text(&self, name: &str) -> Result<Vec<Option<String>>> {
        let series = self.df.column(name)?.as_materialized_series();
        let ca = series.str()?;
        Ok(ca.into_iter().map(|v| v.map(str::to_owned)).collect())
    }

    /// Numeric column values in row order.
    ///
    /// # Errors
    ///
    /// Fails if the column is missing or not a float column.
    pub fn numbers(&self, name: &str) -> Result<Vec<Option<f64>>> {
        let series = self.df.column(name)?.as_materialized_series();
        let ca = series.f64()?;
        Ok(ca.into_iter().collect())
    }

    /// A window of raw rows for display. Out-of-range offsets yield an empty frame.
    pub fn page(&self, offset: usize, len: usize) -> DataFrame {
        let offset = i64::try_from(offset).unwrap_or(i64::MAX);
        self.df.slice(offset, len)
    }
}

fn cast_column(df: &mut DataFrame, name: &str, dtype: &DataType) -> Result<()> {
    let series = df.column(name)?.as_materialized_series();
    if series.dtype() == dtype {
        return Ok(());
    }
    let casted = series.cast(dtype)?;
    df.with_column(casted)?;
    Ok(())
}

/// Formats accepted when timestamps arrive as text.
const TIMESTAMP_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%m/%d/%Y %H:%M"];

fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

fn normalise_timestamps(df: &mut DataFrame, name: &str) -> Result<()> {
    let series = df.column(name)?.as_materialized_series();
    if series.dtype() == &DATETIME_MS {
        return Ok(());
    }

    let casted = if series.dtype() == &DataType::String {
        let mut bad = 0usize;
        let millis: Vec<Option<i64>> = series
            .str()?
            .into_iter()
            .map(|cell| {
                let cell = cell?;
                let parsed = parse_timestamp(cell);
                if parsed.is_none() {
                    bad += 1;
                }
                parsed.map(|t| t.and_utc().timestamp_millis())
            })
            .collect();
        if bad > 0 {
            return Err(BikeshareError::DataProcessing(format!(
                "column '{name}' contains {bad} unparseable timestamp(s)"
            )));
        }
        Series::new(name.into(), millis).cast(&DATETIME_MS)?
    } else {
        series.cast(&DATETIME_MS)?
    };

    df.with_column(casted)?;
    Ok(())
}
