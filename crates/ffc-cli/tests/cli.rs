//! Argument parsing for both binaries.

use std::path::PathBuf;

use clap::Parser;
use ffc_cli::cli::{CsvCli, NpyCli};
use ffc_model::Precision;

#[test]
fn csv_defaults_match_documented_values() {
    let cli = CsvCli::try_parse_from(["csv_to_parquet"]).expect("parse");
    let options = cli.to_options();

    assert_eq!(options.start_directory, PathBuf::from("."));
    assert_eq!(options.directory_pattern, "*");
    assert_eq!(options.subdirectory_pattern, "*");
    assert_eq!(options.csv_pattern, "*.[Cc][Ss][Vv]");
    assert_eq!(options.precision, Precision::Reduced);
    assert_eq!(options.parquet.engine, "polars");
    assert_eq!(options.parquet.compression, "gzip");
    assert!(!options.overwrite);
    assert!(!options.verbose);
    assert!(options.datetime_column.is_none());
    assert!(options.index_column.is_none());
}

#[test]
fn csv_short_and_long_flags() {
    let cli = CsvCli::try_parse_from([
        "csv_to_parquet",
        "data",
        "-t",
        "Date Time",
        "--index",
        "Record",
        "-o",
        "-p",
        "-v",
        "-c",
        "PSTc*.csv",
        "--directory-pattern",
        "Campaign*",
        "-s",
        "PSTc*",
        "-z",
        "zstd",
        "--parquet-engine",
        "auto",
    ])
    .expect("parse");
    let options = cli.to_options();

    assert_eq!(options.start_directory, PathBuf::from("data"));
    assert_eq!(options.datetime_column.as_deref(), Some("Date Time"));
    assert_eq!(options.index_column.as_deref(), Some("Record"));
    assert!(options.overwrite);
    assert!(options.verbose);
    assert_eq!(options.precision, Precision::High);
    assert_eq!(options.csv_pattern, "PSTc*.csv");
    assert_eq!(options.directory_pattern, "Campaign*");
    assert_eq!(options.subdirectory_pattern, "PSTc*");
    assert_eq!(options.parquet.compression, "zstd");
    assert_eq!(options.parquet.engine, "auto");
}

#[test]
fn npy_defaults_and_format_flag() {
    let cli = NpyCli::try_parse_from(["npy_to_parquet"]).expect("parse");
    let options = cli.to_options();
    assert_eq!(options.npy_pattern, "*.[Nn][Pp][Yy]");
    assert!(options.format_file.is_none());

    let cli = NpyCli::try_parse_from(["npy_to_parquet", "raw", "-f", "fmt.yml", "-o"])
        .expect("parse");
    let options = cli.to_options();
    assert_eq!(options.start_directory, PathBuf::from("raw"));
    assert_eq!(options.format_file, Some(PathBuf::from("fmt.yml")));
    assert!(options.overwrite);
}

#[test]
fn explicit_log_level_disables_env_filter() {
    let cli = CsvCli::try_parse_from(["csv_to_parquet", "--log-level", "debug"]).expect("parse");
    let config = cli.logging.log_config();

    assert!(!config.use_env_filter);
    assert_eq!(config.level, tracing::Level::DEBUG);
}

#[test]
fn unknown_log_format_is_rejected() {
    assert!(NpyCli::try_parse_from(["npy_to_parquet", "--log-format", "xml"]).is_err());
}
