use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("unsupported Parquet engine '{engine}' (supported: polars)")]
    UnsupportedEngine { engine: String },

    #[error(
        "unsupported Parquet compression '{compression}' \
         (supported: uncompressed, snappy, gzip, lzo, brotli, zstd, lz4)"
    )]
    UnsupportedCompression { compression: String },

    #[error("failed to create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write Parquet file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: polars::prelude::PolarsError,
    },

    #[error("failed to read size of {path}: {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, OutputError>;
