//! # Bikeshare - Trip Log Explorer
//!
//! Loads a city's bikeshare trip log, narrows it by month and weekday, and
//! summarises it: popular travel times, popular stations and trips, trip
//! duration totals, and rider demographics.
//!
//! ## Quick Start
//!
//! ```no_run
//! use bikeshare::analyser::logic::{FilterSpec, load_trips, filter_trips, run_query};
//!
//! # fn example() -> bikeshare::error::Result<()> {
//! let table = load_trips("data/chicago.csv".as_ref())?;
//! let spec = FilterSpec::parse("march", "monday")?;
//! let march_mondays = filter_trips(&table, &spec)?;
//!
//! let report = run_query(&march_mondays);
//! if let Ok(stats) = &report.temporal.result {
//!     println!("Busiest hour: {}", stats.hour);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Modules
//!
//! - [`analyser::logic`]: trip table, filtering and the four statistics passes
//! - [`analyser::report`]: plain-text rendering of results
//! - [`session`]: interactive prompt loop over any reader/writer
//! - [`config`]: dataset locations and display settings
//! - [`error`]: error types
//! - [`logging`]: tracing setup
//!
//! ## Missing Columns vs. Missing Rows
//!
//! Some cities publish no `Gender` or `Birth Year` columns. Those statistics
//! come back as [`analyser::logic::Availability::NotApplicable`], while a
//! filter that matches no trips yields [`error::BikeshareError::EmptyResult`].

#![warn(clippy::all, rust_2018_idioms)]

pub mod analyser;
pub mod config;
pub mod error;
pub mod logging;
pub mod session;
