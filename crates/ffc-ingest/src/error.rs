//! Error types for discovery and loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while discovering or loading source files.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Start directory missing or not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Glob pattern could not be compiled.
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    // === CSV Errors ===
    /// A CSV file could not be parsed with the configured column options.
    #[error("Failed to read '{path}'.{hint} ({message})")]
    LoadFailure {
        path: PathBuf,
        hint: String,
        message: String,
    },

    /// The CSV files of one experiment do not stack into a single table.
    #[error(
        "Failed to combine the CSV files in '{experiment}': '{file}' does not stack \
         with the files before it.{hint} ({message})"
    )]
    Concat {
        experiment: PathBuf,
        file: PathBuf,
        hint: String,
        message: String,
    },

    // === NPY Errors ===
    /// The array does not fit the format specification; a template was written.
    #[error(
        "'{path}' does not fit the expected format ({problem}). \
         Creating a new format file '{template}'. Edit it to reflect the file format, \
         then re-run using '-f FORMAT_FILE_NAME'."
    )]
    FormatMismatch {
        path: PathBuf,
        template: PathBuf,
        problem: FormatProblem,
    },

    /// A user supplied format file is not valid YAML for the expected schema.
    #[error("invalid format file {path}: {source}")]
    FormatFile {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// The format template could not be written next to a mismatched file.
    #[error("failed to write format template {path}: {source}")]
    TemplateWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Why a raw array could not be mapped onto a format specification.
#[derive(Debug, Error)]
pub enum FormatProblem {
    #[error("format declares {expected} columns but the array has {found}")]
    ColumnCount { expected: usize, found: usize },

    #[error("expected a 2-dimensional array, found {dimensions} dimension(s)")]
    Dimensions { dimensions: usize },

    #[error("unsupported array dtype '{dtype}'")]
    UnsupportedDtype { dtype: String },

    #[error("malformed array: {message}")]
    Malformed { message: String },

    #[error("date column '{column}' is not one of the format columns")]
    UnknownDateColumn { column: String },

    #[error("invalid date unit '{unit}' for column '{column}'")]
    InvalidDateUnit { column: String, unit: String },

    #[error("{0}")]
    Frame(#[from] polars::prelude::PolarsError),
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

/// Builds the " Is index column 'x' correct?" suffix used by CSV load errors.
pub(crate) fn column_hint(index_column: Option<&str>, datetime_column: Option<&str>) -> String {
    let mut hint = String::new();
    if let Some(index) = index_column {
        hint.push_str(&format!(" Is index column '{index}' correct?"));
    }
    if let Some(datetimes) = datetime_column {
        hint.push_str(&format!(" Is datetime column '{datetimes}' correct?"));
    }
    hint
}
