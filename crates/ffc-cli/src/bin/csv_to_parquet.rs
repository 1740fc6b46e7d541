//! Convert campaigns of cycler CSV files to Parquet.

use clap::Parser;
use ffc_cli::cli::CsvCli;
use ffc_cli::logging::init_logging;
use ffc_cli::pipeline::run_csv_conversion;
use ffc_cli::progress::Progress;
use ffc_cli::summary::print_summary;

fn main() {
    let cli = CsvCli::parse();
    cli.logging.color.write_global();
    if let Err(error) = init_logging(&cli.logging.log_config()) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let options = cli.to_options();
    println!(
        "Converting campaigns in '{}' matching '{}' to Parquet",
        options.start_directory.display(),
        options.directory_pattern
    );
    let exit_code = match run_csv_conversion(&options, &Progress::stderr()) {
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
