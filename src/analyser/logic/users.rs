use super::mode::{frequency_table, mode};
use super::table::{BIRTH_YEAR, GENDER, TripTable, USER_TYPE};
use super::types::{Availability, BirthYearStats, UserStats};
use crate::error::{BikeshareError, Result};

/// Rider breakdown: user types always, gender and birth year when the
/// dataset carries those columns.
///
/// Column presence comes from the table's [`super::types::DatasetSchema`],
/// decided once when the dataset was loaded.
///
/// # Errors
///
/// Fails only if a present column cannot be read.
pub fn compute_users(table: &TripTable) -> Result<UserStats> {
    let schema = table.schema();

    let user_types = frequency_table(table.text(USER_TYPE)?.into_iter().flatten());

    let genders = if schema.has_gender {
        Availability::Available(frequency_table(table.text(GENDER)?.into_iter().flatten()))
    } else {
        Availability::NotApplicable
    };

    let birth_years = if schema.has_birth_year {
        Availability::Available(birth_year_stats(table)?)
    } else {
        Availability::NotApplicable
    };

    Ok(UserStats {
        user_types,
        genders,
        birth_years,
    })
}

/// The outer `Result` is a read failure; the inner one is "no birth years recorded".
///
/// Years are stored as floats in the source files; fractional values round to
/// the nearest whole year.
fn birth_year_stats(table: &TripTable) -> Result<Result<BirthYearStats>> {
    let years: Vec<i32> = table
        .numbers(BIRTH_YEAR)?
        .into_iter()
        .flatten()
        .filter(|y| y.is_finite())
        .map(|y| y.round() as i32)
        .collect();

    let (Some(&earliest), Some(&most_recent), Some(most_common)) = (
        years.iter().min(),
        years.iter().max(),
        mode(years.iter().copied()),
    ) else {
        return Ok(Err(BikeshareError::EmptyResult("birth year statistics")));
    };

    Ok(Ok(BirthYearStats {
        earliest,
        most_recent,
        most_common,
    }))
}
