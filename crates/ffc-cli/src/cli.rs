//! CLI argument definitions for `csv_to_parquet` and `npy_to_parquet`.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{Args, ColorChoice, Parser, ValueEnum};
use colorchoice_clap::Color;
use tracing::Level;

use ffc_model::{
    CsvConversionOptions, DEFAULT_CSV_PATTERN, DEFAULT_DIRECTORY_PATTERN, DEFAULT_NPY_PATTERN,
    DEFAULT_PARQUET_COMPRESSION, DEFAULT_PARQUET_ENGINE, DEFAULT_SUBDIRECTORY_PATTERN,
    NpyConversionOptions, ParquetOptions, Precision,
};

use crate::logging::{LogConfig, LogFormat};

const CSV_LONG_ABOUT: &str = "\
Convert campaigns of cycler CSV exports to Parquet.

Each campaign directory holds one subdirectory per experiment, and each
experiment holds one or more CSV files. Files of one experiment are stacked
in filename order and written next to the experiment directory:

    START_DIRECTORY
    └── Campaign1
        ├── Experiment1          (Data1.csv, Data2.csv)
        ├── Experiment1.parquet
        ├── Experiment2          (Data1.csv)
        └── Experiment2.parquet";

const NPY_LONG_ABOUT: &str = "\
Convert raw .npy arrays to Parquet, one file per array.

Columns are named by a format file. The default format is
Time (unix seconds), Current, Voltage, Temperature. If an array does not fit,
a template '<file>_format.yml' is written beside it to edit and pass with -f.";

#[derive(Parser, Debug)]
#[command(
    name = "csv_to_parquet",
    version,
    about = "Convert campaigns of cycler CSV files to Parquet",
    long_about = CSV_LONG_ABOUT
)]
pub struct CsvCli {
    /// Directory holding the campaigns (default: current directory).
    #[arg(value_name = "START_DIRECTORY", default_value = ".")]
    pub start_directory: PathBuf,

    /// Column in the CSVs to parse as datetimes.
    #[arg(short = 't', long = "datetimes", value_name = "COL")]
    pub datetimes: Option<String>,

    /// Column in the CSVs to use as an index (it is not written out).
    #[arg(short = 'i', long = "index", value_name = "COL")]
    pub index: Option<String>,

    /// Overwrite existing Parquet files instead of skipping them.
    #[arg(short = 'o', long = "overwrite")]
    pub overwrite: bool,

    /// Store numeric data as 64-bit floats and ints.
    ///
    /// By default the CSVs are assumed accurate to 32 bits (~7 significant
    /// digits). With this flag the Parquet files are about twice as large.
    #[arg(short = 'p', long = "high-precision")]
    pub high_precision: bool,

    /// Print every directory that matched nothing after the summary.
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Pattern for CSV filenames, e.g. 'PSTc*.csv'.
    #[arg(
        short = 'c',
        long = "csv-pattern",
        value_name = "PAT",
        default_value = DEFAULT_CSV_PATTERN,
        help_heading = "File pattern arguments"
    )]
    pub csv_pattern: String,

    /// Pattern for campaign directories, e.g. 'Campaign*'.
    #[arg(
        short = 'd',
        long = "directory-pattern",
        value_name = "PAT",
        default_value = DEFAULT_DIRECTORY_PATTERN,
        help_heading = "File pattern arguments"
    )]
    pub directory_pattern: String,

    /// Pattern for experiment subdirectories, e.g. 'PSTc*'.
    #[arg(
        short = 's',
        long = "subdirectory-pattern",
        value_name = "PAT",
        default_value = DEFAULT_SUBDIRECTORY_PATTERN,
        help_heading = "File pattern arguments"
    )]
    pub subdirectory_pattern: String,

    #[command(flatten)]
    pub parquet: ParquetArgs,

    #[command(flatten)]
    pub logging: LoggingArgs,
}

impl CsvCli {
    pub fn to_options(&self) -> CsvConversionOptions {
        CsvConversionOptions {
            start_directory: self.start_directory.clone(),
            datetime_column: self.datetimes.clone(),
            index_column: self.index.clone(),
            overwrite: self.overwrite,
            precision: Precision::from_high_precision_flag(self.high_precision),
            verbose: self.verbose,
            directory_pattern: self.directory_pattern.clone(),
            subdirectory_pattern: self.subdirectory_pattern.clone(),
            csv_pattern: self.csv_pattern.clone(),
            parquet: self.parquet.to_options(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "npy_to_parquet",
    version,
    about = "Convert raw .npy arrays to Parquet",
    long_about = NPY_LONG_ABOUT
)]
pub struct NpyCli {
    /// Directory holding the .npy files (default: current directory).
    #[arg(value_name = "START_DIRECTORY", default_value = ".")]
    pub start_directory: PathBuf,

    /// Overwrite existing Parquet files instead of skipping them.
    #[arg(short = 'o', long = "overwrite")]
    pub overwrite: bool,

    /// Pattern for array filenames, e.g. 'PSTc*.npy'.
    #[arg(
        short = 'n',
        long = "npy-pattern",
        value_name = "PAT",
        default_value = DEFAULT_NPY_PATTERN
    )]
    pub npy_pattern: String,

    /// Format file naming the array columns, date columns and precision.
    #[arg(short = 'f', long = "format", value_name = "FORMAT_FILE")]
    pub format: Option<PathBuf>,

    /// Print the start directory after the summary if nothing matched.
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    #[command(flatten)]
    pub parquet: ParquetArgs,

    #[command(flatten)]
    pub logging: LoggingArgs,
}

impl NpyCli {
    pub fn to_options(&self) -> NpyConversionOptions {
        NpyConversionOptions {
            start_directory: self.start_directory.clone(),
            overwrite: self.overwrite,
            npy_pattern: self.npy_pattern.clone(),
            format_file: self.format.clone(),
            verbose: self.verbose,
            parquet: self.parquet.to_options(),
        }
    }
}

#[derive(Args, Debug)]
#[command(next_help_heading = "Parquet arguments")]
pub struct ParquetArgs {
    /// Engine used to write the Parquet files.
    #[arg(
        short = 'e',
        long = "parquet-engine",
        value_name = "ENGINE",
        default_value = DEFAULT_PARQUET_ENGINE
    )]
    pub engine: String,

    /// Compression codec (uncompressed, snappy, gzip, lzo, brotli, zstd, lz4).
    #[arg(
        short = 'z',
        long = "parquet-compression",
        value_name = "CODEC",
        default_value = DEFAULT_PARQUET_COMPRESSION
    )]
    pub compression: String,
}

impl ParquetArgs {
    pub fn to_options(&self) -> ParquetOptions {
        ParquetOptions {
            engine: self.engine.clone(),
            compression: self.compression.clone(),
        }
    }
}

#[derive(Args, Debug)]
#[command(next_help_heading = "Logging")]
pub struct LoggingArgs {
    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Log level (logs go to stderr; default: warn, or RUST_LOG when set).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl LoggingArgs {
    /// Build logging configuration with consistent precedence:
    /// `--log-level` beats `RUST_LOG`, which beats the warn default.
    pub fn log_config(&self) -> LogConfig {
        let mut config = LogConfig {
            use_env_filter: self.log_level.is_none(),
            ..LogConfig::default()
        };
        if let Some(level) = self.log_level {
            config.level = level.into();
        }
        config.format = match self.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        };
        config.log_file = self.log_file.clone();
        config.with_ansi = match self.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.log_file.is_none() && io::stderr().is_terminal(),
        };
        config
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for Level {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => Level::ERROR,
            LogLevelArg::Warn => Level::WARN,
            LogLevelArg::Info => Level::INFO,
            LogLevelArg::Debug => Level::DEBUG,
            LogLevelArg::Trace => Level::TRACE,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
