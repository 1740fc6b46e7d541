use polars::prelude::DataFrame;

use ffc_model::Precision;

use crate::error::Result;
use crate::frame::{downcast_column, sanitize_column_name};

/// Applies the precision policy and replaces spaces in column names.
pub fn normalize_frame(frame: &DataFrame, precision: Precision) -> Result<DataFrame> {
    let mut columns = Vec::with_capacity(frame.width());
    for column in frame.get_columns() {
        let mut column = if precision.is_reduced() {
            downcast_column(column)?
        } else {
            column.clone()
        };
        let name = sanitize_column_name(column.name().as_str());
        column.rename(name.into());
        columns.push(column);
    }
    Ok(DataFrame::new(columns)?)
}
