//! Directory and file discovery.
//!
//! Patterns are glob expressions matched against a single path component
//! directly below the searched directory. Hidden entries (leading `.`) never
//! match, whatever the pattern says.

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};

use crate::error::{IngestError, Result};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Lists non-hidden directories under `root` whose name matches `pattern`.
///
/// Returns directories sorted by name.
pub fn list_directories(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    matching_entries(root, pattern, |path| path.is_dir())
}

/// Lists non-hidden regular files under `root` whose name matches `pattern`.
///
/// Returns files sorted ascending by filename; this is the order in which
/// the files of one experiment are stacked.
pub fn list_files(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    matching_entries(root, pattern, |path| path.is_file())
}

/// Output path for a source file or experiment directory.
///
/// The last extension is replaced, so `Campaign/Experiment` becomes
/// `Campaign/Experiment.parquet`, a sibling inside the campaign directory.
pub fn parquet_path_for(path: &Path) -> PathBuf {
    path.with_extension("parquet")
}

/// Template written beside an array that does not fit its format.
pub fn format_template_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push("_format.yml");
    path.with_file_name(name)
}

fn matching_entries(
    root: &Path,
    pattern: &str,
    keep: impl Fn(&Path) -> bool,
) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: root.to_path_buf(),
        });
    }

    let compiled = Pattern::new(pattern).map_err(|source| IngestError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let entries = std::fs::read_dir(root).map_err(|e| IngestError::DirectoryRead {
        path: root.to_path_buf(),
        source: e,
    })?;

    let mut matches = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: root.to_path_buf(),
            source: e,
        })?;

        // Non UTF-8 names are matched with replacement characters.
        let file_name = entry.file_name();
        let name = file_name.to_string_lossy();
        if name.starts_with('.') || !compiled.matches_with(&name, MATCH_OPTIONS) {
            continue;
        }

        let path = entry.path();
        if keep(&path) {
            matches.push(path);
        }
    }

    matches.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(matches)
}
