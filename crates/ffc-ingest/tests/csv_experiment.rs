//! Tests for loading a whole CSV experiment.

use std::fs;
use std::path::Path;

use ffc_ingest::{CsvLoadOptions, list_directories, list_files, normalize_frame, read_experiment};
use ffc_model::Precision;
use polars::prelude::DataType;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).expect("write csv");
}

#[test]
fn stacks_files_in_filename_order() {
    let root = TempDir::new().expect("temp dir");
    let experiment = root.path().join("C1").join("E1");
    fs::create_dir_all(&experiment).expect("create experiment");
    // Written out of order on purpose.
    write(&experiment, "b.csv", "Step Index,Voltage (V)\n4,3.4\n5,3.5\n");
    write(
        &experiment,
        "a.csv",
        "Step Index,Voltage (V)\n1,3.1\n2,3.2\n3,3.3\n",
    );

    let files = list_files(&experiment, "*.[Cc][Ss][Vv]").expect("list files");
    let frame = read_experiment(&files, &CsvLoadOptions::default()).expect("read experiment");
    let frame = normalize_frame(&frame, Precision::Reduced).expect("normalize");

    assert_eq!(frame.height(), 5);
    assert_eq!(frame.get_column_names_str(), vec!["Step_Index", "Voltage_(V)"]);
    let steps: Vec<Option<i32>> = frame
        .column("Step_Index")
        .expect("step column")
        .i32()
        .expect("i32 steps")
        .into_iter()
        .collect();
    assert_eq!(steps, vec![Some(1), Some(2), Some(3), Some(4), Some(5)]);
    assert_eq!(
        frame.column("Voltage_(V)").expect("voltage").dtype(),
        &DataType::Float32
    );
}

#[test]
fn mixed_numeric_columns_widen_when_stacked() {
    let root = TempDir::new().expect("temp dir");
    write(root.path(), "a.csv", "Current\n1\n2\n");
    write(root.path(), "b.csv", "Current\n0.5\n");

    let files = list_files(root.path(), "*.csv").expect("list files");
    let frame = read_experiment(&files, &CsvLoadOptions::default()).expect("read experiment");

    assert_eq!(frame.height(), 3);
    assert_eq!(
        frame.column("Current").expect("current").dtype(),
        &DataType::Float64
    );
}

#[test]
fn bad_datetime_column_names_the_file() {
    let root = TempDir::new().expect("temp dir");
    write(root.path(), "a.csv", "Time,Current\n2023-01-01 00:00:00,1\n");

    let files = list_files(root.path(), "*.csv").expect("list files");
    let options = CsvLoadOptions {
        datetime_column: Some("Timestamp".to_string()),
        ..CsvLoadOptions::default()
    };
    let err = read_experiment(&files, &options).expect_err("missing datetime column");

    let message = err.to_string();
    assert!(message.contains("a.csv"), "{message}");
    assert!(
        message.contains("Is datetime column 'Timestamp' correct?"),
        "{message}"
    );
}

#[test]
fn campaigns_are_listed_without_parquet_outputs() {
    let root = TempDir::new().expect("temp dir");
    fs::create_dir_all(root.path().join("C1").join("E1")).expect("create dirs");
    fs::write(root.path().join("C1").join("E0.parquet"), b"PAR1").expect("write parquet");

    let campaigns = list_directories(root.path(), "*").expect("list campaigns");
    assert_eq!(campaigns.len(), 1);
    let experiments = list_directories(&campaigns[0], "*").expect("list experiments");
    assert_eq!(experiments, vec![root.path().join("C1").join("E1")]);
}
