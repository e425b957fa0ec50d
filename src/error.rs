//! Centralized error handling for the bikeshare explorer.
//!
//! ## Custom Error Types with `enum`
//!
//! Every fallible library operation returns [`BikeshareError`]. Callers can
//! pattern match to tell "no rows matched" apart from "the data was broken":
//!
//! ```
//! use bikeshare::error::BikeshareError;
//!
//! fn describe(err: &BikeshareError) -> &'static str {
//!     match err {
//!         BikeshareError::EmptyResult(_) => "nothing to summarise",
//!         BikeshareError::InvalidChoice { .. } => "ask again",
//!         _ => "failed",
//!     }
//! }
//! ```
//!
//! A column missing from a city's dataset is *not* an error: the statistics
//! passes report it as [`crate::analyser::logic::Availability::NotApplicable`].
//!
//! ## Context Extension Trait
//!
//! The `ResultExt` trait adds `.context()` to any `Result` whose error
//! converts into [`BikeshareError`]:
//!
//! ```no_run
//! use bikeshare::error::ResultExt as _;
//!
//! fn read_settings() -> bikeshare::error::Result<String> {
//!     std::fs::read_to_string("config.json").context("Failed to read settings")
//! }
//! ```

use std::fmt;

/// Main error type for bikeshare operations.
#[derive(Debug)]
pub enum BikeshareError {
    /// I/O errors (file operations)
    Io(std::io::Error),

    /// Data processing errors (Polars, parsing, etc.)
    DataProcessing(String),

    /// A mode or mean was requested over zero records.
    EmptyResult(&'static str),

    /// A required column is absent from the dataset.
    MissingColumn(String),

    /// User-supplied value outside the accepted set.
    InvalidChoice {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    /// Configuration errors
    Config(String),

    /// Input closed before the session finished
    Aborted,

    /// Generic error with context
    Other(String),
}

impl fmt::Display for BikeshareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::DataProcessing(msg) => write!(f, "Data processing error: {msg}"),
            Self::EmptyResult(metric) => write!(f, "No records available to compute {metric}"),
            Self::MissingColumn(name) => write!(f, "Dataset is missing required column '{name}'"),
            Self::InvalidChoice {
                field,
                value,
                expected,
            } => write!(f, "Invalid {field} '{value}' (expected one of: {expected})"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::Aborted => write!(f, "Input closed, session aborted"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for BikeshareError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl BikeshareError {
    /// True when the error only means "zero records to aggregate".
    pub fn is_empty_result(&self) -> bool {
        matches!(self, Self::EmptyResult(_))
    }
}

impl From<std::io::Error> for BikeshareError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<anyhow::Error> for BikeshareError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

impl From<serde_json::Error> for BikeshareError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("JSON error: {err}"))
    }
}

impl From<polars::error::PolarsError> for BikeshareError {
    fn from(err: polars::error::PolarsError) -> Self {
        Self::DataProcessing(err.to_string())
    }
}

/// Result type alias for bikeshare operations.
pub type Result<T> = std::result::Result<T, BikeshareError>;

/// Extension trait to add context to results.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<BikeshareError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err: BikeshareError = e.into();
            BikeshareError::Other(format!("{}: {}", msg.into(), err))
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err: BikeshareError = e.into();
            BikeshareError::Other(format!("{}: {}", f(), err))
        })
    }
}
