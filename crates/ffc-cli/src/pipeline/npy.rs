//! Flat walk over `.npy` files in the start directory.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use ffc_ingest::{FormatSpec, list_files, load_with_format};
use ffc_model::{ConversionOutcome, NpyConversionOptions};
use ffc_output::write_parquet;

use super::{OutputPlan, file_size, plan_output};
use crate::progress::{Progress, display_name};

/// Converts every matching array under the start directory to a sibling
/// `.parquet` file.
///
/// The format specification is loaded once up front. The first array that
/// does not fit it aborts the run after a template has been written beside it.
pub fn run_npy_conversion(
    options: &NpyConversionOptions,
    progress: &Progress,
) -> Result<ConversionOutcome> {
    let mut outcome = ConversionOutcome::new();
    let spec = FormatSpec::load_or_default(options.format_file.as_deref())?;
    debug!(columns = ?spec.columns, float32 = spec.float32, "format specification loaded");

    let files = list_files(&options.start_directory, &options.npy_pattern)
        .context("list npy files")?;
    if files.is_empty() {
        debug!(pattern = %options.npy_pattern, "no npy files");
        outcome.record_empty(
            &options.start_directory,
            format!("No files matching '{}'", options.npy_pattern),
        );
        return Ok(outcome);
    }

    let bar = progress.outer("Converting", files.len());
    for file in &files {
        bar.set_message(display_name(file));
        let span = info_span!("file", file = %file.display());
        let _guard = span.enter();
        convert_file(file, &spec, options, &mut outcome)?;
        bar.inc(1);
    }
    bar.finish_and_clear();
    Ok(outcome)
}

fn convert_file(
    file: &Path,
    spec: &FormatSpec,
    options: &NpyConversionOptions,
    outcome: &mut ConversionOutcome,
) -> Result<()> {
    let output = match plan_output(file, options.overwrite) {
        OutputPlan::Skip(output) => {
            debug!(output = %output.display(), "parquet file exists, skipping");
            outcome.record_skipped();
            return Ok(());
        }
        OutputPlan::Write(output) => output,
    };

    outcome.record_source_bytes(file_size(file)?);
    let mut frame = load_with_format(file, spec)?;

    let bytes = write_parquet(&mut frame, &output, &options.parquet)?;
    outcome.record_converted(bytes);
    info!(output = %output.display(), rows = frame.height(), bytes, "converted array");
    Ok(())
}
