//! CSV experiment loading and normalization.

mod normalize;
mod reader;

pub use normalize::normalize_frame;
pub use reader::{CsvLoadOptions, read_csv_file, read_experiment};
