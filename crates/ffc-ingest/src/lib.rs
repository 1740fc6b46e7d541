//! Source discovery and loading for the Parquet conversion tools.
//!
//! This crate finds cycler exports on disk and turns them into Polars
//! DataFrames ready to be written.
//!
//! # Features
//!
//! - **Discovery**: Sorted, hidden-entry-free glob matching one directory level at a time
//! - **CSV Loading**: Per-experiment loading with datetime/index options and row stacking
//! - **Normalization**: Optional 64 to 32 bit downcast and space-free column names
//! - **NPY Loading**: Raw 2-D arrays named by a YAML format specification
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use ffc_ingest::{CsvLoadOptions, list_files, normalize_frame, read_experiment};
//! use ffc_model::Precision;
//!
//! let files = list_files(Path::new("Campaign1/Experiment1"), "*.[Cc][Ss][Vv]")?;
//! let frame = read_experiment(&files, &CsvLoadOptions::default())?;
//! let frame = normalize_frame(&frame, Precision::Reduced)?;
//! ```

mod csv;
mod discovery;
mod error;
mod frame;
mod npy;

// === Error Types ===
pub use error::{FormatProblem, IngestError, Result};

// === File Discovery ===
pub use discovery::{format_template_path_for, list_directories, list_files, parquet_path_for};

// === CSV Loading ===
pub use csv::{CsvLoadOptions, normalize_frame, read_csv_file, read_experiment};

// === Column Helpers ===
pub use frame::{downcast_column, sanitize_column_name};

// === NPY Loading ===
pub use npy::{
    DEFAULT_FORMAT_YAML, DateUnit, FormatSpec, RawArray, apply_format, load_with_format,
    parse_array,
};
