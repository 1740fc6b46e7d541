//! Parquet output for converted frames.

mod error;
mod parquet;

pub use error::{OutputError, Result};
pub use parquet::{ParquetCodec, ParquetEngine, write_parquet};
