//! Plain-text rendering of query results.

use super::logic::{
    Availability, City, FrequencyTable, PassOutcome, QueryReport, TripTable,
};
use crate::error::BikeshareError;
use std::fmt;

const SEPARATOR: &str = "----------------------------------------";

/// Formats a [`QueryReport`] the way the interactive session prints it.
pub struct ReportView<'a> {
    pub report: &'a QueryReport,
    pub city: City,
    pub show_timings: bool,
}

impl ReportView<'_> {
    fn footer<T>(&self, f: &mut fmt::Formatter<'_>, outcome: &PassOutcome<T>) -> fmt::Result {
        if self.show_timings {
            writeln!(f)?;
            writeln!(f, "This took {} seconds.", outcome.elapsed.as_secs_f64())?;
        }
        writeln!(f, "{SEPARATOR}")
    }

    fn failure(f: &mut fmt::Formatter<'_>, err: &BikeshareError) -> fmt::Result {
        if err.is_empty_result() {
            writeln!(f, "No trips match the selected filters.")
        } else {
            writeln!(f, "Could not compute these statistics: {err}")
        }
    }

    fn temporal(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = &self.report.temporal;
        writeln!(f, "\nCalculating The Most Frequent Times of Travel...\n")?;
        match &outcome.result {
            Ok(stats) => {
                writeln!(f, "Frequently Travelled Month: {}", stats.month)?;
                writeln!(f, "Frequently Travelled Day: {}", stats.day)?;
                writeln!(f, "Frequently Travelled Hour: {}", stats.hour)?;
            }
            Err(e) => Self::failure(f, e)?,
        }
        self.footer(f, outcome)
    }

    fn stations(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = &self.report.stations;
        writeln!(f, "\nCalculating The Most Popular Stations and Trip...\n")?;
        match &outcome.result {
            Ok(stats) => {
                writeln!(f, "Popular Start Station: {}", stats.popular_start)?;
                writeln!(f, "Popular End Station: {}", stats.popular_end)?;
                writeln!(f, "Most popular trip taken: {}", stats.popular_trip)?;
            }
            Err(e) => Self::failure(f, e)?,
        }
        self.footer(f, outcome)
    }

    fn duration(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = &self.report.duration;
        writeln!(f, "\nCalculating Trip Duration...\n")?;
        match &outcome.result {
            Ok(stats) => {
                writeln!(f, "Total trip duration: {} seconds", stats.total_seconds)?;
                match &stats.mean_seconds {
                    Ok(mean) => writeln!(f, "Average trip duration: {mean} seconds")?,
                    Err(e) => Self::failure(f, e)?,
                }
            }
            Err(e) => Self::failure(f, e)?,
        }
        self.footer(f, outcome)
    }

    fn users(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = &self.report.users;
        writeln!(f, "\nCalculating User Stats...\n")?;
        let stats = match &outcome.result {
            Ok(stats) => stats,
            Err(e) => {
                Self::failure(f, e)?;
                return self.footer(f, outcome);
            }
        };

        writeln!(f, "User type stats:")?;
        write_counts(f, &stats.user_types)?;

        match &stats.genders {
            Availability::Available(genders) => {
                writeln!(f, "\nGender stats:")?;
                write_counts(f, genders)?;
            }
            Availability::NotApplicable => {
                writeln!(f, "\n{} has no gender data for analysis", self.city)?;
            }
        }

        match &stats.birth_years {
            Availability::Available(Ok(years)) => {
                writeln!(f, "\nDate of Birth Stats:")?;
                writeln!(f, "Earliest year of birth: {}", years.earliest)?;
                writeln!(f, "Most recent year of birth: {}", years.most_recent)?;
                writeln!(f, "Most common year of birth: {}", years.most_common)?;
            }
            Availability::Available(Err(e)) => {
                writeln!(f)?;
                Self::failure(f, e)?;
            }
            Availability::NotApplicable => {
                writeln!(f, "\n{} has no birth year records for analysis", self.city)?;
            }
        }
        self.footer(f, outcome)
    }
}

fn write_counts(f: &mut fmt::Formatter<'_>, table: &FrequencyTable) -> fmt::Result {
    if table.is_empty() {
        return writeln!(f, "  (none)");
    }
    let width = table.entries.iter().map(|(v, _)| v.len()).max().unwrap_or(0);
    for (value, count) in &table.entries {
        writeln!(f, "  {value:<width$}  {count}")?;
    }
    Ok(())
}

impl fmt::Display for ReportView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.temporal(f)?;
        self.stations(f)?;
        self.duration(f)?;
        self.users(f)
    }
}

pub fn render_report(report: &QueryReport, city: City, show_timings: bool) -> String {
    ReportView {
        report,
        city,
        show_timings,
    }
    .to_string()
}

/// Raw rows `offset..offset + len` as a polars table.
pub fn render_page(table: &TripTable, offset: usize, len: usize) -> String {
    table.page(offset, len).to_string()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use crate::analyser::logic::{DatasetSchema, TripRecord, run_query};
    use chrono::NaiveDate;

    fn sample_table(schema: DatasetSchema) -> TripTable {
        let start = NaiveDate::from_ymd_opt(2017, 3, 6)
            .and_then(|d| d.and_hms_opt(8, 0, 0))
            .expect("valid date");
        let record = TripRecord {
            start_time: start,
            end_time: start + chrono::Duration::seconds(300),
            start_station: "Canal St".to_owned(),
            end_station: "Clark St".to_owned(),
            trip_duration_seconds: 300.0,
            user_type: "Subscriber".to_owned(),
            gender: Some("Female".to_owned()),
            birth_year: Some(1988),
        };
        TripTable::from_records(&[record], schema).expect("table builds")
    }

    #[test]
    fn test_render_full_report() {
        let table = sample_table(DatasetSchema::with_demographics());
        let text = render_report(&run_query(&table), City::Chicago, false);

        assert!(text.contains("Frequently Travelled Month: March"));
        assert!(text.contains("Frequently Travelled Day: Monday"));
        assert!(text.contains("Most popular trip taken: Canal St -> Clark St"));
        assert!(text.contains("Total trip duration: 300 seconds"));
        assert!(text.contains("Most common year of birth: 1988"));
        assert!(!text.contains("This took"), "timings disabled");
    }

    #[test]
    fn test_render_city_without_demographics() {
        let table = sample_table(DatasetSchema::default());
        let text = render_report(&run_query(&table), City::Washington, true);

        assert!(text.contains("Washington has no gender data for analysis"));
        assert!(text.contains("Washington has no birth year records for analysis"));
        assert!(text.contains("This took"));
    }

    #[test]
    fn test_render_empty_selection() {
        let table = TripTable::from_records(&[], DatasetSchema::default()).unwrap();
        let text = render_report(&run_query(&table), City::Chicago, false);

        assert!(text.contains("No trips match the selected filters."));
        assert!(text.contains("Total trip duration: 0 seconds"));
        assert!(!text.contains("-0 seconds"));
    }

    #[test]
    fn test_render_page_shows_rows() {
        let table = sample_table(DatasetSchema::default());
        let page = render_page(&table, 0, 5);
        assert!(page.contains("Canal St"));
    }
}
