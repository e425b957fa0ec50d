//! Interactive prompt session.
//!
//! The session is generic over its input and output so tests can drive it
//! with in-memory buffers.

use crate::analyser::logic::{City, FilterSpec, Month, Weekday, load_filtered, run_query};
use crate::analyser::logic::{TripTable, parse_month_choice, parse_weekday_choice};
use crate::analyser::report::{render_page, render_report};
use crate::config::AppSettings;
use crate::error::{BikeshareError, Result};
use std::io::{BufRead, Write};

const RETRY: &str = "It seems like you have provided an incorrect option. Please try again.";
const SEPARATOR: &str = "----------------------------------------";

pub struct Session<'a, R, W> {
    input: R,
    output: W,
    settings: &'a AppSettings,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(input: R, output: W, settings: &'a AppSettings) -> Self {
        Self {
            input,
            output,
            settings,
        }
    }

    /// Hands back the output sink, mainly for tests.
    pub fn into_output(self) -> W {
        self.output
    }

    fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Prints `question` and reads one trimmed, lower-cased answer.
    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(BikeshareError::Aborted);
        }
        Ok(line.trim().to_lowercase())
    }

    /// Re-asks until `parse` accepts the answer.
    fn ask_until<T>(&mut self, question: &str, parse: impl Fn(&str) -> Result<T>) -> Result<T> {
        loop {
            let answer = self.ask(question)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    tracing::debug!("Rejected answer '{answer}': {e}");
                    self.say(RETRY)?;
                }
            }
        }
    }

    fn ask_yes(&mut self, question: &str) -> Result<bool> {
        Ok(self.ask(question)? == "yes")
    }

    /// City, month and day prompts.
    ///
    /// # Errors
    ///
    /// [`BikeshareError::Aborted`] when input ends before all answers are given.
    pub fn get_filters(&mut self) -> Result<(City, FilterSpec)> {
        self.say("Hello! Let's explore some US bikeshare data!")?;

        let city = self.ask_until(
            "Enter the city whose dataset you would like to analyze (chicago, new york city, washington): ",
            str::parse::<City>,
        )?;
        let month: Option<Month> = self.ask_until(
            "Enter the month to analyze (january to june) or type 'all' to include every month: ",
            parse_month_choice,
        )?;
        let weekday: Option<Weekday> = self.ask_until(
            "Enter the day of the week to analyze or type 'all' to include every day of the week: ",
            parse_weekday_choice,
        )?;

        self.say(SEPARATOR)?;
        Ok((city, FilterSpec::new(month, weekday)))
    }

    /// Pages through raw rows while the user keeps answering `yes`.
    ///
    /// # Errors
    ///
    /// Fails on I/O errors or closed input.
    pub fn display_data(&mut self, table: &TripTable) -> Result<()> {
        let page_size = self.settings.page_size;
        if !self.ask_yes(&format!(
            "\nWould you like to view {page_size} rows of individual trip data (yes/no)?\n"
        ))? {
            return Ok(());
        }

        let mut offset = 0;
        while offset < table.len() {
            let page = render_page(table, offset, page_size);
            self.say(&page)?;
            offset += page_size;

            let remaining = table.len().saturating_sub(offset);
            if remaining == 0 {
                break;
            }
            if !self.ask_yes(&format!(
                "Do you wish to continue? (Remaining records: {remaining}): "
            ))? {
                break;
            }
        }
        Ok(())
    }

    /// One query: prompts, load, report, optional raw rows.
    fn run_once(&mut self) -> Result<()> {
        let (city, spec) = self.get_filters()?;
        let path = self.settings.dataset_path(city);

        let table = match load_filtered(&path, &spec) {
            Ok(table) => table,
            Err(e) => {
                tracing::error!("Failed to load {}: {e}", path.display());
                self.say(&format!("Could not load the {city} dataset: {e}"))?;
                return Ok(());
            }
        };

        let report = run_query(&table);
        let text = render_report(&report, city, self.settings.show_timings);
        write!(self.output, "{text}")?;

        self.display_data(&table)
    }

    /// Runs queries until the user declines to restart or input ends.
    ///
    /// # Errors
    ///
    /// Only on output failures; closed input ends the session normally.
    pub fn run(&mut self) -> Result<()> {
        loop {
            match self.run_once() {
                Ok(()) => {}
                Err(BikeshareError::Aborted) => {
                    tracing::info!("Input closed, ending session");
                    return Ok(());
                }
                Err(e) => return Err(e),
            }

            match self.ask_yes("\nWould you like to restart? Enter yes or no.\n") {
                Ok(true) => {}
                Ok(false) | Err(BikeshareError::Aborted) => return Ok(()),
                Err(e) => return Err(e),
            }
        }
    }
}
