//! Filtering and statistics over trip tables.
//!
//! ```text
//!  city CSV ──► io::load_trips ──► TripTable
//!                                     │
//!                     filter::filter_trips(FilterSpec)
//!                                     │
//!                                     ▼
//!                              filtered TripTable
//!        ┌──────────────┬─────────────┼──────────────┐
//!        ▼              ▼             ▼              ▼
//!    temporal       stations      duration         users
//! ```
//!
//! The four passes only read the filtered table, so they can run in any order.

pub mod duration;
pub mod filter;
pub mod flows;
pub mod io;
pub mod mode;
pub mod stations;
pub mod table;
pub mod temporal;
pub mod types;
pub mod users;

pub use duration::compute_duration;
pub use filter::filter_trips;
pub use flows::{PassOutcome, QueryReport, load_filtered, run_query};
pub use io::load_trips;
pub use stations::compute_stations;
pub use table::TripTable;
pub use temporal::compute_temporal;
pub use types::{
    Availability, BirthYearStats, City, DatasetSchema, DurationStats, FilterSpec, FrequencyTable,
    Month, StationStats, TemporalStats, Trip, TripRecord, UserStats, Weekday, parse_month_choice,
    parse_weekday_choice,
};
pub use users::compute_users;
