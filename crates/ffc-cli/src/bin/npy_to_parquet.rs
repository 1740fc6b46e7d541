//! Convert raw .npy arrays to Parquet.

use clap::Parser;
use ffc_cli::cli::NpyCli;
use ffc_cli::logging::init_logging;
use ffc_cli::pipeline::run_npy_conversion;
use ffc_cli::progress::Progress;
use ffc_cli::summary::print_summary;

fn main() {
    let cli = NpyCli::parse();
    cli.logging.color.write_global();
    if let Err(error) = init_logging(&cli.logging.log_config()) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let options = cli.to_options();
    println!(
        "Converting files in '{}' matching '{}' to Parquet.",
        options.start_directory.display(),
        options.npy_pattern
    );
    let exit_code = match run_npy_conversion(&options, &Progress::stderr()) {
        Ok(outcome) => {
            print_summary(&outcome, options.overwrite, options.verbose);
            0
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}
