//! Shared configuration values and run outcome types for the conversion tools.
//!
//! Every pipeline stage receives one of the option structs defined here
//! explicitly; nothing is read from global state.

pub mod options;
pub mod outcome;

pub use options::{
    CsvConversionOptions, DEFAULT_CSV_PATTERN, DEFAULT_DIRECTORY_PATTERN, DEFAULT_NPY_PATTERN,
    DEFAULT_PARQUET_COMPRESSION, DEFAULT_PARQUET_ENGINE, DEFAULT_SUBDIRECTORY_PATTERN,
    NpyConversionOptions, ParquetOptions, Precision,
};
pub use outcome::{CompressionRatio, ConversionOutcome, EmptyEntry};
