//! Conversion pipelines.
//!
//! Both pipelines walk their inputs strictly in sequence:
//! 1. **Discover**: list matching directories/files, recording empty levels
//! 2. **Plan**: skip outputs that already exist unless overwriting
//! 3. **Load**: read sources into a DataFrame
//! 4. **Write**: emit the sibling `.parquet` file and tally its size
//!
//! The first load or write failure aborts the whole run.

mod csv;
mod npy;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use ffc_ingest::parquet_path_for;

pub use csv::run_csv_conversion;
pub use npy::run_npy_conversion;

/// What to do with one candidate source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputPlan {
    /// The output exists and overwrite is off.
    Skip(PathBuf),
    Write(PathBuf),
}

/// Decides the fate of `source` from the state of its output path alone.
///
/// Runs before anything under `source` is listed or read.
pub fn plan_output(source: &Path, overwrite: bool) -> OutputPlan {
    let output = parquet_path_for(source);
    if output.exists() && !overwrite {
        OutputPlan::Skip(output)
    } else {
        OutputPlan::Write(output)
    }
}

pub(crate) fn file_size(path: &Path) -> Result<u64> {
    let metadata =
        std::fs::metadata(path).with_context(|| format!("stat {}", path.display()))?;
    Ok(metadata.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_plan_skips_existing_output_without_overwrite() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("E1");
        std::fs::write(dir.path().join("E1.parquet"), b"x").unwrap();

        assert_eq!(
            plan_output(&source, false),
            OutputPlan::Skip(dir.path().join("E1.parquet"))
        );
        assert_eq!(
            plan_output(&source, true),
            OutputPlan::Write(dir.path().join("E1.parquet"))
        );
    }

    #[test]
    fn test_plan_writes_missing_output() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("data.npy");

        assert_eq!(
            plan_output(&source, false),
            OutputPlan::Write(dir.path().join("data.parquet"))
        );
    }
}
