use crate::error::{BikeshareError, Result};
use chrono::NaiveDateTime;
use std::fmt;
use std::str::FromStr;

const MONTH_CHOICES: &str = "january, february, march, april, may, june, all";
const WEEKDAY_CHOICES: &str = "monday, tuesday, wednesday, thursday, friday, saturday, sunday, all";
const CITY_CHOICES: &str = "chicago, new york city, washington";

/// Full English month names indexed by `month0`.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Full English weekday names, Monday first.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Cities with a bundled dataset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    pub const ALL: [Self; 3] = [Self::Chicago, Self::NewYorkCity, Self::Washington];

    /// Lower-case name the user types at the prompt.
    pub fn key(self) -> &'static str {
        match self {
            Self::Chicago => "chicago",
            Self::NewYorkCity => "new york city",
            Self::Washington => "washington",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Chicago => "Chicago",
            Self::NewYorkCity => "New York City",
            Self::Washington => "Washington",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for City {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|city| city.key() == key)
            .ok_or(BikeshareError::InvalidChoice {
                field: "city",
                value: s.trim().to_owned(),
                expected: CITY_CHOICES,
            })
    }
}

/// Months covered by the datasets. Filtering beyond June is not offered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
}

impl Month {
    pub const ALL: [Self; 6] = [
        Self::January,
        Self::February,
        Self::March,
        Self::April,
        Self::May,
        Self::June,
    ];

    /// Calendar month number, January = 1.
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    pub fn name(self) -> &'static str {
        MONTH_NAMES[self as usize]
    }
}

impl FromStr for Month {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.name().to_lowercase() == key)
            .ok_or(BikeshareError::InvalidChoice {
                field: "month",
                value: s.trim().to_owned(),
                expected: MONTH_CHOICES,
            })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Days since Monday (Monday = 0).
    pub fn index(self) -> u32 {
        self as u32
    }

    pub fn name(self) -> &'static str {
        WEEKDAY_NAMES[self as usize]
    }
}

impl FromStr for Weekday {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|d| d.name().to_lowercase() == key)
            .ok_or(BikeshareError::InvalidChoice {
                field: "day",
                value: s.trim().to_owned(),
                expected: WEEKDAY_CHOICES,
            })
    }
}

fn is_all(s: &str) -> bool {
    s.trim().eq_ignore_ascii_case("all")
}

/// Parses a month answer; `"all"` means no month restriction.
///
/// # Errors
///
/// Returns [`BikeshareError::InvalidChoice`] for anything outside January to June.
pub fn parse_month_choice(s: &str) -> Result<Option<Month>> {
    if is_all(s) { Ok(None) } else { s.parse().map(Some) }
}

/// Parses a weekday answer; `"all"` means no weekday restriction.
///
/// # Errors
///
/// Returns [`BikeshareError::InvalidChoice`] for unknown day names.
pub fn parse_weekday_choice(s: &str) -> Result<Option<Weekday>> {
    if is_all(s) { Ok(None) } else { s.parse().map(Some) }
}

/// Optional month/weekday narrowing criteria. `None` leaves a dimension unrestricted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FilterSpec {
    pub month: Option<Month>,
    pub weekday: Option<Weekday>,
}

impl FilterSpec {
    pub fn new(month: Option<Month>, weekday: Option<Weekday>) -> Self {
        Self { month, weekday }
    }

    /// Validates raw month and day answers in one go.
    ///
    /// # Errors
    ///
    /// Returns the first [`BikeshareError::InvalidChoice`] encountered.
    pub fn parse(month: &str, day: &str) -> Result<Self> {
        Ok(Self {
            month: parse_month_choice(month)?,
            weekday: parse_weekday_choice(day)?,
        })
    }

    pub fn is_unrestricted(&self) -> bool {
        self.month.is_none() && self.weekday.is_none()
    }
}

impl fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let month = self.month.map_or("all months", Month::name);
        let day = self.weekday.map_or("all days", Weekday::name);
        write!(f, "{month}, {day}")
    }
}

/// One row of a city dataset.
#[derive(Clone, Debug, PartialEq)]
pub struct TripRecord {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub start_station: String,
    pub end_station: String,
    pub trip_duration_seconds: f64,
    pub user_type: String,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
}

/// Which optional demographic columns a dataset carries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DatasetSchema {
    pub has_gender: bool,
    pub has_birth_year: bool,
}

impl DatasetSchema {
    pub fn with_demographics() -> Self {
        Self {
            has_gender: true,
            has_birth_year: true,
        }
    }
}

/// Result for a column that only some cities provide.
#[derive(Clone, Debug, PartialEq)]
pub enum Availability<T> {
    Available(T),
    /// The dataset has no such column at all.
    NotApplicable,
}

impl<T> Availability<T> {
    pub fn as_available(&self) -> Option<&T> {
        match self {
            Self::Available(v) => Some(v),
            Self::NotApplicable => None,
        }
    }

    pub fn is_not_applicable(&self) -> bool {
        matches!(self, Self::NotApplicable)
    }
}

/// Value counts, most frequent first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    pub entries: Vec<(String, usize)>,
}

impl FrequencyTable {
    pub fn get(&self, value: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(v, _)| v == value)
            .map(|(_, count)| *count)
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemporalStats {
    pub month: String,
    pub day: String,
    pub hour: u32,
}

/// Directed station pair; `A -> B` differs from `B -> A`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Trip {
    pub start: String,
    pub end: String,
}

impl fmt::Display for Trip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.start, self.end)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StationStats {
    pub popular_start: String,
    pub popular_end: String,
    pub popular_trip: Trip,
}

#[derive(Debug)]
pub struct DurationStats {
    pub total_seconds: f64,
    /// Undefined over zero records.
    pub mean_seconds: Result<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub most_recent: i32,
    pub most_common: i32,
}

#[derive(Debug)]
pub struct UserStats {
    pub user_types: FrequencyTable,
    pub genders: Availability<FrequencyTable>,
    pub birth_years: Availability<Result<BirthYearStats>>,
}
