//! Campaign → experiment → CSV files walk.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use ffc_ingest::{CsvLoadOptions, list_directories, list_files, normalize_frame, read_experiment};
use ffc_model::{ConversionOutcome, CsvConversionOptions};
use ffc_output::write_parquet;

use super::{OutputPlan, file_size, plan_output};
use crate::progress::{Progress, display_name};

/// Converts every experiment of every campaign under the start directory.
///
/// Each experiment directory becomes one `.parquet` file beside it, holding
/// the rows of all its CSV files stacked in filename order.
pub fn run_csv_conversion(
    options: &CsvConversionOptions,
    progress: &Progress,
) -> Result<ConversionOutcome> {
    let mut outcome = ConversionOutcome::new();
    let load_options = CsvLoadOptions::from(options);

    let campaigns = list_directories(&options.start_directory, &options.directory_pattern)
        .context("list campaign directories")?;
    let campaign_bar = progress.outer("Scanning", campaigns.len());

    for campaign in &campaigns {
        let span = info_span!("campaign", campaign = %campaign.display());
        let _guard = span.enter();
        campaign_bar.set_message(display_name(campaign));

        convert_campaign(campaign, options, &load_options, progress, &mut outcome)?;
        campaign_bar.inc(1);
    }
    campaign_bar.finish_and_clear();

    if campaigns.is_empty() {
        debug!(
            directory = %options.start_directory.display(),
            pattern = %options.directory_pattern,
            "no campaign directories"
        );
        outcome.record_empty(
            &options.start_directory,
            format!("No directories matching '{}'", options.directory_pattern),
        );
    }
    Ok(outcome)
}

fn convert_campaign(
    campaign: &Path,
    options: &CsvConversionOptions,
    load_options: &CsvLoadOptions,
    progress: &Progress,
    outcome: &mut ConversionOutcome,
) -> Result<()> {
    let experiments = list_directories(campaign, &options.subdirectory_pattern)
        .with_context(|| format!("list experiments of {}", campaign.display()))?;
    if experiments.is_empty() {
        debug!(pattern = %options.subdirectory_pattern, "no experiment directories");
        outcome.record_empty(
            campaign,
            format!("No subdirectories matching '{}'", options.subdirectory_pattern),
        );
        return Ok(());
    }

    let experiment_bar = progress.inner("Converting", experiments.len());
    for experiment in &experiments {
        experiment_bar.set_message(display_name(experiment));
        convert_experiment(experiment, options, load_options, outcome)?;
        experiment_bar.inc(1);
    }
    experiment_bar.finish_and_clear();
    Ok(())
}

fn convert_experiment(
    experiment: &Path,
    options: &CsvConversionOptions,
    load_options: &CsvLoadOptions,
    outcome: &mut ConversionOutcome,
) -> Result<()> {
    let output = match plan_output(experiment, options.overwrite) {
        OutputPlan::Skip(output) => {
            debug!(output = %output.display(), "parquet file exists, skipping");
            outcome.record_skipped();
            return Ok(());
        }
        OutputPlan::Write(output) => output,
    };

    let files = list_files(experiment, &options.csv_pattern)
        .with_context(|| format!("list csv files of {}", experiment.display()))?;
    if files.is_empty() {
        debug!(experiment = %experiment.display(), pattern = %options.csv_pattern, "no csv files");
        outcome.record_empty(
            experiment,
            format!("No files matching '{}'", options.csv_pattern),
        );
        return Ok(());
    }

    for file in &files {
        outcome.record_source_bytes(file_size(file)?);
    }
    debug!(experiment = %experiment.display(), files = files.len(), "loading experiment");
    let frame = read_experiment(&files, load_options)?;
    let mut frame = normalize_frame(&frame, options.precision)?;

    let bytes = write_parquet(&mut frame, &output, &options.parquet)?;
    outcome.record_converted(bytes);
    info!(
        output = %output.display(),
        rows = frame.height(),
        files = files.len(),
        bytes,
        "converted experiment"
    );
    Ok(())
}
