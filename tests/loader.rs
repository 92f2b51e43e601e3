mod common;

use common::{RESULTS_CSV, csv_file};
use f1_dashboard::{DashboardError, loader};
use std::sync::Arc;

#[test]
fn load_reads_once_per_path() {
    let file = csv_file(RESULTS_CSV);

    let first = loader::load(file.path()).unwrap();
    let second = loader::load(file.path()).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.len(), 12);
    assert!(first.has_fastest_lap_speed());
}

#[test]
fn non_numeric_speeds_become_missing() {
    let file = csv_file(RESULTS_CSV);
    let table = loader::load_uncached(file.path()).unwrap();

    let missing = table.iter().filter(|r| r.fastest_lap_speed.is_none()).count();
    assert_eq!(missing, 2);
    assert!(table.iter().all(|r| r.rank.is_some()));
}

#[test]
fn missing_file_is_data_unavailable() {
    let err = loader::load("/definitely/not/here/results.csv").unwrap_err();
    match err {
        DashboardError::DataUnavailable { path, .. } => {
            assert!(path.ends_with("results.csv"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn failed_loads_are_not_cached() {
    let file = csv_file("year,country\n2020,Italy\n");
    assert!(loader::load(file.path()).is_err());
    assert!(loader::load(file.path()).is_err());
}

#[test]
fn only_csv_files_are_read() {
    let file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    assert!(matches!(
        loader::load_uncached(file.path()),
        Err(DashboardError::DataUnavailable { .. })
    ));
}
