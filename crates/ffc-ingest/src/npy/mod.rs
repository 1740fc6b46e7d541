//! Raw `.npy` arrays and the format specification that names their columns.

mod format;
mod mapping;
mod reader;

use std::path::Path;

use polars::prelude::DataFrame;

use crate::discovery::format_template_path_for;
use crate::error::{IngestError, Result};

pub use format::{DEFAULT_FORMAT_YAML, DateUnit, FormatSpec};
pub use mapping::apply_format;
pub use reader::{RawArray, parse_array};

/// Reads `path` and names its columns with `spec`.
///
/// Any mismatch between the array and the specification is fatal. Before the
/// error is returned, the default specification is written beside the array
/// as `<file name>_format.yml` so the user has a template to edit.
pub fn load_with_format(path: &Path, spec: &FormatSpec) -> Result<DataFrame> {
    let bytes = std::fs::read(path).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    match parse_array(&bytes).and_then(|array| apply_format(array, spec)) {
        Ok(frame) => Ok(frame),
        Err(problem) => {
            let template = format_template_path_for(path);
            tracing::warn!(
                path = %path.display(),
                template = %template.display(),
                %problem,
                "array does not fit the format specification"
            );
            FormatSpec::write_template(&template)?;
            Err(IngestError::FormatMismatch {
                path: path.to_path_buf(),
                template,
                problem,
            })
        }
    }
}
