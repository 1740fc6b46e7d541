//! Running totals collected while a conversion pipeline walks its inputs.

use std::fmt;
use std::path::{Path, PathBuf};

/// A directory or file pattern that matched nothing worth converting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyEntry {
    pub path: PathBuf,
    pub reason: String,
}

impl EmptyEntry {
    pub fn new(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for EmptyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.reason)
    }
}

/// Ratio of source bytes to Parquet bytes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CompressionRatio {
    Factor(f64),
    /// Nothing was written, so there is no denominator.
    Unavailable,
}

impl fmt::Display for CompressionRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Factor(value) => write!(f, "{value:.2}"),
            Self::Unavailable => f.write_str("N/A"),
        }
    }
}

/// Counts and sizes accumulated over one run.
#[derive(Debug, Clone, Default)]
pub struct ConversionOutcome {
    pub original_bytes: u64,
    pub parquet_bytes: u64,
    pub converted: usize,
    pub skipped: usize,
    pub empty: Vec<EmptyEntry>,
}

impl ConversionOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    /// An output already existed and overwrite was not requested.
    pub fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    pub fn record_source_bytes(&mut self, bytes: u64) {
        self.original_bytes += bytes;
    }

    pub fn record_converted(&mut self, parquet_bytes: u64) {
        self.parquet_bytes += parquet_bytes;
        self.converted += 1;
    }

    pub fn record_empty(&mut self, path: &Path, reason: impl Into<String>) {
        self.empty.push(EmptyEntry::new(path, reason));
    }

    pub fn compression_ratio(&self) -> CompressionRatio {
        if self.parquet_bytes == 0 {
            CompressionRatio::Unavailable
        } else {
            CompressionRatio::Factor(self.original_bytes as f64 / self.parquet_bytes as f64)
        }
    }

    /// The single line printed at the end of a run.
    ///
    /// Skips are only mentioned when overwrite was off, since with overwrite
    /// nothing is ever skipped for pre-existing outputs.
    pub fn summary_line(&self, overwrite: bool) -> String {
        if self.converted > 0 {
            match self.compression_ratio() {
                ratio @ CompressionRatio::Factor(_) => format!(
                    "{} converted file(s) are smaller by a factor of {ratio}",
                    self.converted
                ),
                CompressionRatio::Unavailable => format!(
                    "{} converted file(s), compression factor N/A (no Parquet bytes written)",
                    self.converted
                ),
            }
        } else if !overwrite && self.skipped > 0 {
            format!(
                "No files converted, but {} pre-existing Parquet file(s) skipped",
                self.skipped
            )
        } else {
            "No files converted.".to_string()
        }
    }

    /// One line per recorded empty entry, in discovery order.
    pub fn empty_lines(&self) -> Vec<String> {
        self.empty.iter().map(ToString::to_string).collect()
    }
}
