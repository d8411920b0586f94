use datasets::{DatasetError, load_csv, samples};
use rust_decimal_macros::dec;
use std::fs;
use std::path::PathBuf;

fn scratch_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("macrolab-{}-{name}", std::process::id()));
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn loads_a_file_named_after_its_stem() {
    let path = scratch_file("growth.csv", "year,growth\n2022,2.5\n2023,0.9\n");
    let data = load_csv(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert!(data.name.ends_with("growth"));
    assert_eq!(data.numeric_column("growth").unwrap(), vec![dec!(2.5), dec!(0.9)]);
}

#[test]
fn missing_file_is_an_io_error() {
    let err = load_csv(&std::env::temp_dir().join("macrolab-does-not-exist.csv")).unwrap_err();
    assert!(matches!(err, DatasetError::Io(_)));
}

#[test]
fn france_sample_round_trips_through_csv() {
    let france = samples::france_sample();
    let mut csv = france.column_names().join(",");
    csv.push('\n');
    for row in 0..france.row_count() {
        let cells: Vec<String> = france
            .columns
            .iter()
            .map(|c| c.values[row].map(|v| v.to_string()).unwrap_or_default())
            .collect();
        csv.push_str(&cells.join(","));
        csv.push('\n');
    }

    let path = scratch_file("france.csv", &csv);
    let loaded = load_csv(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(loaded.columns, france.columns);
}
