//! Command line front end for the CSV and NPY to Parquet converters.

pub mod cli;
pub mod logging;
pub mod pipeline;
pub mod progress;
pub mod summary;
