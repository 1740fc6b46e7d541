//! Writes DataFrames to Parquet files.

use std::fs::File;
use std::path::Path;
use std::str::FromStr;

use polars::io::parquet::write::{ParquetCompression, ParquetWriter};
use polars::prelude::DataFrame;

use ffc_model::ParquetOptions;

use crate::error::{OutputError, Result};

/// Backend that encodes the Parquet file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParquetEngine {
    Polars,
}

impl FromStr for ParquetEngine {
    type Err = OutputError;

    fn from_str(engine: &str) -> Result<Self> {
        match engine.trim().to_ascii_lowercase().as_str() {
            "polars" | "auto" => Ok(Self::Polars),
            _ => Err(OutputError::UnsupportedEngine {
                engine: engine.to_string(),
            }),
        }
    }
}

/// Compression codec applied to every column chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParquetCodec {
    Uncompressed,
    Snappy,
    Gzip,
    Lzo,
    Brotli,
    Zstd,
    Lz4,
}

impl ParquetCodec {
    fn compression(self) -> ParquetCompression {
        match self {
            Self::Uncompressed => ParquetCompression::Uncompressed,
            Self::Snappy => ParquetCompression::Snappy,
            Self::Gzip => ParquetCompression::Gzip(None),
            Self::Lzo => ParquetCompression::Lzo,
            Self::Brotli => ParquetCompression::Brotli(None),
            Self::Zstd => ParquetCompression::Zstd(None),
            Self::Lz4 => ParquetCompression::Lz4Raw,
        }
    }
}

impl FromStr for ParquetCodec {
    type Err = OutputError;

    fn from_str(compression: &str) -> Result<Self> {
        match compression.trim().to_ascii_lowercase().as_str() {
            "uncompressed" | "none" => Ok(Self::Uncompressed),
            "snappy" => Ok(Self::Snappy),
            "gzip" => Ok(Self::Gzip),
            "lzo" => Ok(Self::Lzo),
            "brotli" => Ok(Self::Brotli),
            "zstd" => Ok(Self::Zstd),
            "lz4" | "lz4raw" => Ok(Self::Lz4),
            _ => Err(OutputError::UnsupportedCompression {
                compression: compression.to_string(),
            }),
        }
    }
}

/// Writes `frame` to `path` without a row-index column and returns the
/// size of the written file in bytes.
///
/// An existing file at `path` is replaced. The engine and compression strings
/// are validated here, before the destination is touched.
pub fn write_parquet(frame: &mut DataFrame, path: &Path, options: &ParquetOptions) -> Result<u64> {
    let engine: ParquetEngine = options.engine.parse()?;
    let codec = options.compression.parse::<ParquetCodec>()?;

    let file = File::create(path).map_err(|e| OutputError::Create {
        path: path.to_path_buf(),
        source: e,
    })?;
    ParquetWriter::new(file)
        .with_compression(codec.compression())
        .finish(frame)
        .map_err(|e| OutputError::Write {
            path: path.to_path_buf(),
            source: e,
        })?;

    let size = std::fs::metadata(path)
        .map_err(|e| OutputError::Metadata {
            path: path.to_path_buf(),
            source: e,
        })?
        .len();
    tracing::debug!(
        path = %path.display(),
        rows = frame.height(),
        bytes = size,
        ?engine,
        ?codec,
        "wrote parquet file"
    );
    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_names_are_case_insensitive() {
        assert_eq!("GZIP".parse::<ParquetCodec>().unwrap(), ParquetCodec::Gzip);
        assert_eq!("none".parse::<ParquetCodec>().unwrap(), ParquetCodec::Uncompressed);
        assert_eq!("lz4".parse::<ParquetCodec>().unwrap(), ParquetCodec::Lz4);
        assert!(matches!(
            "rar".parse::<ParquetCodec>(),
            Err(OutputError::UnsupportedCompression { .. })
        ));
    }

    #[test]
    fn test_engine_names() {
        assert_eq!("polars".parse::<ParquetEngine>().unwrap(), ParquetEngine::Polars);
        assert!(matches!(
            "fastparquet".parse::<ParquetEngine>(),
            Err(OutputError::UnsupportedEngine { .. })
        ));
    }
}
