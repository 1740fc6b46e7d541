//! Column level helpers shared by the CSV and NPY loaders.

use polars::prelude::{Column, DataType, PolarsResult};

/// Replaces every space in a column name with an underscore.
pub fn sanitize_column_name(name: &str) -> String {
    name.replace(' ', "_")
}

/// Narrows 64-bit floats and integers to 32 bits; other types pass through.
///
/// Integers outside the `i32` range become null rather than wrapping.
pub fn downcast_column(column: &Column) -> PolarsResult<Column> {
    match column.dtype() {
        DataType::Float64 => column.cast(&DataType::Float32),
        DataType::Int64 => column.cast(&DataType::Int32),
        _ => Ok(column.clone()),
    }
}
