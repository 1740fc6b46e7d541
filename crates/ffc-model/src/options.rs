//! Configuration options for the CSV and NPY conversion pipelines.

use std::path::PathBuf;

/// Glob for campaign directories below the start directory.
pub const DEFAULT_DIRECTORY_PATTERN: &str = "*";
/// Glob for experiment directories inside a campaign.
pub const DEFAULT_SUBDIRECTORY_PATTERN: &str = "*";
/// Glob for CSV files inside an experiment (case-insensitive suffix).
pub const DEFAULT_CSV_PATTERN: &str = "*.[Cc][Ss][Vv]";
/// Glob for raw array files in the start directory (case-insensitive suffix).
pub const DEFAULT_NPY_PATTERN: &str = "*.[Nn][Pp][Yy]";
/// Parquet backend used when none is requested.
pub const DEFAULT_PARQUET_ENGINE: &str = "polars";
/// gzip is slower than snappy but produces files roughly half the size.
pub const DEFAULT_PARQUET_COMPRESSION: &str = "gzip";

/// Numeric precision kept in the written Parquet files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Precision {
    /// Downcast 64-bit floats and integers to 32 bits.
    ///
    /// Cycler exports are only accurate to about 7 significant digits, so
    /// this halves the output without losing real information.
    #[default]
    Reduced,
    /// Keep the widths the source parser produced.
    High,
}

impl Precision {
    pub fn from_high_precision_flag(high_precision: bool) -> Self {
        if high_precision {
            Self::High
        } else {
            Self::Reduced
        }
    }

    pub fn is_reduced(self) -> bool {
        matches!(self, Self::Reduced)
    }
}

/// Writer configuration. Both fields are passed through to the Parquet
/// writer, which is the only place they are validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParquetOptions {
    pub engine: String,
    pub compression: String,
}

impl Default for ParquetOptions {
    fn default() -> Self {
        Self {
            engine: DEFAULT_PARQUET_ENGINE.to_string(),
            compression: DEFAULT_PARQUET_COMPRESSION.to_string(),
        }
    }
}

/// Options for converting campaigns of CSV experiments.
#[derive(Debug, Clone)]
pub struct CsvConversionOptions {
    /// Directory holding the campaign directories.
    pub start_directory: PathBuf,
    /// Column to parse as datetimes.
    pub datetime_column: Option<String>,
    /// Column used as the row index; it is not written out.
    pub index_column: Option<String>,
    /// Replace existing Parquet files instead of skipping them.
    pub overwrite: bool,
    pub precision: Precision,
    /// Keep the list of empty directories for the final report.
    pub verbose: bool,
    pub directory_pattern: String,
    pub subdirectory_pattern: String,
    pub csv_pattern: String,
    pub parquet: ParquetOptions,
}

impl Default for CsvConversionOptions {
    fn default() -> Self {
        Self {
            start_directory: PathBuf::from("."),
            datetime_column: None,
            index_column: None,
            overwrite: false,
            precision: Precision::default(),
            verbose: false,
            directory_pattern: DEFAULT_DIRECTORY_PATTERN.to_string(),
            subdirectory_pattern: DEFAULT_SUBDIRECTORY_PATTERN.to_string(),
            csv_pattern: DEFAULT_CSV_PATTERN.to_string(),
            parquet: ParquetOptions::default(),
        }
    }
}

impl CsvConversionOptions {
    pub fn new(start_directory: impl Into<PathBuf>) -> Self {
        Self {
            start_directory: start_directory.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    #[must_use]
    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    #[must_use]
    pub fn with_datetime_column(mut self, column: Option<String>) -> Self {
        self.datetime_column = column;
        self
    }

    #[must_use]
    pub fn with_index_column(mut self, column: Option<String>) -> Self {
        self.index_column = column;
        self
    }
}

/// Options for converting a directory of raw `.npy` arrays.
#[derive(Debug, Clone)]
pub struct NpyConversionOptions {
    /// Directory searched (non-recursively) for array files.
    pub start_directory: PathBuf,
    pub overwrite: bool,
    pub npy_pattern: String,
    /// User supplied format file; the embedded default is used when absent.
    pub format_file: Option<PathBuf>,
    pub verbose: bool,
    pub parquet: ParquetOptions,
}

impl Default for NpyConversionOptions {
    fn default() -> Self {
        Self {
            start_directory: PathBuf::from("."),
            overwrite: false,
            npy_pattern: DEFAULT_NPY_PATTERN.to_string(),
            format_file: None,
            verbose: false,
            parquet: ParquetOptions::default(),
        }
    }
}

impl NpyConversionOptions {
    pub fn new(start_directory: impl Into<PathBuf>) -> Self {
        Self {
            start_directory: start_directory.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    #[must_use]
    pub fn with_format_file(mut self, path: Option<PathBuf>) -> Self {
        self.format_file = path;
        self
    }
}
