use super::*;
use crate::error::BikeshareError;
use anyhow::Result;
use polars::df;

fn empty_table(schema: DatasetSchema) -> TripTable {
    TripTable::from_records(&[], schema).expect("empty table builds")
}

#[test]
fn test_temporal_march_monday_eight() -> Result<()> {
    let records = vec![
        trip(at("2017-03-06", 8, 5), "A", "B", 100.0, "Subscriber"),
        trip(at("2017-03-13", 8, 40), "A", "B", 100.0, "Subscriber"),
        trip(at("2017-03-07", 9, 15), "A", "B", 100.0, "Subscriber"),
    ];
    let table = TripTable::from_records(&records, DatasetSchema::default())?;
    let stats = compute_temporal(&table)?;

    assert_eq!(stats.month, "March");
    assert_eq!(stats.day, "Monday");
    assert_eq!(stats.hour, 8);
    Ok(())
}

#[test]
fn test_temporal_tie_goes_to_first_seen() -> Result<()> {
    let records = vec![
        trip(at("2017-05-02", 17, 0), "A", "B", 100.0, "Subscriber"),
        trip(at("2017-04-03", 7, 0), "A", "B", 100.0, "Subscriber"),
    ];
    let table = TripTable::from_records(&records, DatasetSchema::default())?;
    let stats = compute_temporal(&table)?;

    assert_eq!(stats.month, "May");
    assert_eq!(stats.day, "Tuesday");
    assert_eq!(stats.hour, 17);
    Ok(())
}

#[test]
fn test_temporal_empty_table() {
    let err = compute_temporal(&empty_table(DatasetSchema::default())).unwrap_err();
    assert!(err.is_empty_result(), "Got: {err}");
}

#[test]
fn test_stations_and_directed_trip() -> Result<()> {
    let records = vec![
        trip(at("2017-01-02", 8, 0), "Canal St", "Clark St", 60.0, "Subscriber"),
        trip(at("2017-01-02", 9, 0), "Clark St", "Canal St", 60.0, "Subscriber"),
        trip(at("2017-01-02", 10, 0), "Clark St", "Canal St", 60.0, "Subscriber"),
        trip(at("2017-01-02", 11, 0), "Canal St", "Wells St", 60.0, "Subscriber"),
        trip(at("2017-01-02", 12, 0), "Canal St", "Wells St", 60.0, "Subscriber"),
        trip(at("2017-01-02", 13, 0), "Wells St", "Wells St", 60.0, "Subscriber"),
    ];
    let table = TripTable::from_records(&records, DatasetSchema::default())?;
    let stats = compute_stations(&table)?;

    assert_eq!(stats.popular_start, "Canal St");
    assert_eq!(stats.popular_end, "Wells St");
    // Clark -> Canal and Canal -> Wells both occur twice; Clark -> Canal was seen first
    assert_eq!(stats.popular_trip.to_string(), "Clark St -> Canal St");
    Ok(())
}

#[test]
fn test_stations_empty_table() {
    let err = compute_stations(&empty_table(DatasetSchema::default())).unwrap_err();
    assert!(matches!(err, BikeshareError::EmptyResult(_)), "Got: {err}");
}

#[test]
fn test_duration_total_and_mean() -> Result<()> {
    let records: Vec<_> = [100.0, 200.0, 300.0]
        .into_iter()
        .map(|s| trip(at("2017-02-06", 8, 0), "A", "B", s, "Subscriber"))
        .collect();
    let table = TripTable::from_records(&records, DatasetSchema::default())?;
    let stats = compute_duration(&table)?;

    assert!((stats.total_seconds - 600.0).abs() < f64::EPSILON);
    let mean = stats.mean_seconds?;
    assert!((mean - 200.0).abs() < f64::EPSILON);
    Ok(())
}

#[test]
fn test_duration_negative_values_pass_through() -> Result<()> {
    let records: Vec<_> = [-50.0, 10.0]
        .into_iter()
        .map(|s| trip(at("2017-02-06", 8, 0), "A", "B", s, "Subscriber"))
        .collect();
    let table = TripTable::from_records(&records, DatasetSchema::default())?;
    let stats = compute_duration(&table)?;

    assert!((stats.total_seconds + 40.0).abs() < f64::EPSILON);
    assert!((stats.mean_seconds? + 20.0).abs() < f64::EPSILON);
    Ok(())
}

#[test]
fn test_duration_empty_table_total_zero_mean_fails() -> Result<()> {
    let stats = compute_duration(&empty_table(DatasetSchema::default()))?;
    assert_eq!(stats.total_seconds, 0.0);
    assert!(stats.total_seconds.is_sign_positive(), "empty total must be +0");
    assert!(matches!(
        stats.mean_seconds,
        Err(BikeshareError::EmptyResult(_))
    ));
    Ok(())
}

#[test]
fn test_users_without_demographic_columns() -> Result<()> {
    let table = half_year_table();
    let stats = compute_users(&table)?;

    assert_eq!(stats.user_types.get("Subscriber"), Some(6));
    assert_eq!(stats.user_types.get("Customer"), Some(6));
    assert!(stats.genders.is_not_applicable());
    assert!(stats.birth_years.is_not_applicable());
    Ok(())
}

#[test]
fn test_users_with_demographics() -> Result<()> {
    let base = at("2017-04-03", 8, 0);
    let records = vec![
        with_demographics(trip(base, "A", "B", 60.0, "Subscriber"), Some("Male"), Some(1985)),
        with_demographics(trip(base, "A", "B", 60.0, "Subscriber"), Some("Female"), Some(1992)),
        with_demographics(trip(base, "A", "B", 60.0, "Customer"), None, None),
        with_demographics(trip(base, "A", "B", 60.0, "Subscriber"), Some("Male"), Some(1992)),
        with_demographics(trip(base, "A", "B", 60.0, "Subscriber"), Some("Male"), Some(1939)),
    ];
    let table = TripTable::from_records(&records, DatasetSchema::with_demographics())?;
    let stats = compute_users(&table)?;

    assert_eq!(
        stats.user_types.entries,
        vec![("Subscriber".to_owned(), 4), ("Customer".to_owned(), 1)]
    );

    let genders = stats.genders.as_available().expect("gender column present");
    assert_eq!(genders.get("Male"), Some(3));
    assert_eq!(genders.get("Female"), Some(1));
    assert_eq!(genders.total(), 4, "null genders are not counted");

    let years = stats
        .birth_years
        .as_available()
        .expect("birth year column present")
        .as_ref()
        .expect("birth years recorded");
    assert_eq!(years.earliest, 1939);
    assert_eq!(years.most_recent, 1992);
    assert_eq!(years.most_common, 1992);
    Ok(())
}

#[test]
fn test_birth_year_mode_reads_birth_year_column() -> Result<()> {
    // Regression: the most-common lookup must use "Birth Year", the same column as min/max.
    let base = at("2017-04-03", 8, 0);
    let records: Vec<_> = [2001, 1970, 1970]
        .into_iter()
        .map(|y| with_demographics(trip(base, "A", "B", 60.0, "Subscriber"), Some("Female"), Some(y)))
        .collect();
    let table = TripTable::from_records(&records, DatasetSchema::with_demographics())?;
    let stats = compute_users(&table)?;

    match stats.birth_years {
        Availability::Available(Ok(years)) => assert_eq!(years.most_common, 1970),
        other => panic!("Expected birth year stats, got {other:?}"),
    }
    Ok(())
}

#[test]
fn test_birth_year_tie_goes_to_first_seen() -> Result<()> {
    let base = at("2017-04-03", 8, 0);
    let records: Vec<_> = [1990, 1985, 1985, 1990]
        .into_iter()
        .map(|y| with_demographics(trip(base, "A", "B", 60.0, "Subscriber"), Some("Male"), Some(y)))
        .collect();
    let table = TripTable::from_records(&records, DatasetSchema::with_demographics())?;

    match compute_users(&table)?.birth_years {
        Availability::Available(Ok(years)) => {
            assert_eq!(years.most_common, 1990);
            assert_eq!(years.earliest, 1985);
            assert_eq!(years.most_recent, 1990);
        }
        other => panic!("Expected birth year stats, got {other:?}"),
    }
    Ok(())
}

#[test]
fn test_fractional_birth_years_round_to_nearest() -> Result<()> {
    let df = df!(
        "Start Time" => &["2017-04-03 08:00:00", "2017-04-03 09:00:00", "2017-04-03 10:00:00"],
        "End Time" => &["2017-04-03 08:10:00", "2017-04-03 09:10:00", "2017-04-03 10:10:00"],
        "Start Station" => &["A", "A", "A"],
        "End Station" => &["B", "B", "B"],
        "Trip Duration" => &[600.0, 600.0, 600.0],
        "User Type" => &["Subscriber", "Subscriber", "Subscriber"],
        "Birth Year" => &[1988.6, 1989.0, 1975.4]
    )?;
    let table = TripTable::from_frame(df)?;

    match compute_users(&table)?.birth_years {
        Availability::Available(Ok(years)) => {
            assert_eq!(years.earliest, 1975);
            assert_eq!(years.most_recent, 1989);
            assert_eq!(years.most_common, 1989, "1988.6 and 1989.0 are the same year");
        }
        other => panic!("Expected birth year stats, got {other:?}"),
    }
    Ok(())
}

#[test]
fn test_users_empty_table_keeps_schema_signal() -> Result<()> {
    let stats = compute_users(&empty_table(DatasetSchema {
        has_gender: true,
        has_birth_year: true,
    }))?;

    assert!(stats.user_types.is_empty());
    assert_eq!(
        stats.genders.as_available().map(FrequencyTable::is_empty),
        Some(true)
    );
    assert!(matches!(
        stats.birth_years,
        Availability::Available(Err(BikeshareError::EmptyResult(_)))
    ));
    Ok(())
}

#[test]
fn test_run_query_passes_are_independent() -> Result<()> {
    let report = run_query(&empty_table(DatasetSchema::default()));

    assert_eq!(report.row_count, 0);
    assert!(report.temporal.result.is_err());
    assert!(report.stations.result.is_err());
    let duration = report.duration.result?;
    assert!(duration.total_seconds.abs() < f64::EPSILON);
    assert!(report.users.result?.genders.is_not_applicable());
    Ok(())
}
