//! Positional column naming for raw arrays.

use polars::prelude::{
    Column, DataFrame, DataType, Int64Chunked, IntoColumn, IntoSeries, Series, TimeUnit,
};

use super::format::{DateUnit, FormatSpec};
use super::reader::RawArray;
use crate::error::FormatProblem;
use crate::frame::downcast_column;

/// Names array column `i` after `spec.columns[i]` and converts date columns.
///
/// The column counts must be equal; the mapping is positional, so a shorter
/// or longer specification would silently mislabel data.
pub fn apply_format(array: RawArray, spec: &FormatSpec) -> Result<DataFrame, FormatProblem> {
    if array.width() != spec.columns.len() {
        return Err(FormatProblem::ColumnCount {
            expected: spec.columns.len(),
            found: array.width(),
        });
    }

    let mut date_units = Vec::with_capacity(spec.date_column.len());
    for (column, code) in &spec.date_column {
        if !spec.columns.contains(column) {
            return Err(FormatProblem::UnknownDateColumn {
                column: column.clone(),
            });
        }
        let unit = code
            .parse::<DateUnit>()
            .map_err(|unit| FormatProblem::InvalidDateUnit {
                column: column.clone(),
                unit,
            })?;
        date_units.push((column.as_str(), unit));
    }

    let mut columns = Vec::with_capacity(array.width());
    for (mut series, name) in array.columns.into_iter().zip(&spec.columns) {
        series.rename(name.as_str().into());
        let date_unit = date_units
            .iter()
            .find(|(column, _)| *column == name.as_str())
            .map(|(_, unit)| *unit);
        let column = match date_unit {
            Some(unit) => to_timestamp(&series, unit)?,
            None if spec.float32 => downcast_column(&series.into_column())?,
            None => series.into_column(),
        };
        columns.push(column);
    }

    Ok(DataFrame::new(columns)?)
}

/// Reinterprets numeric epoch offsets as nanosecond timestamps.
///
/// Integer columns are scaled exactly; only float columns go through `f64`.
fn to_timestamp(series: &Series, unit: DateUnit) -> Result<Column, FormatProblem> {
    let nanos: Int64Chunked = if series.dtype().is_integer() {
        series
            .cast(&DataType::Int64)?
            .i64()?
            .into_iter()
            .map(|value| value.and_then(|v| unit.int_to_nanos(v)))
            .collect()
    } else {
        series
            .cast(&DataType::Float64)?
            .f64()?
            .into_iter()
            .map(|value| value.and_then(|v| unit.to_nanos(v)))
            .collect()
    };
    Ok(nanos
        .with_name(series.name().clone())
        .into_datetime(TimeUnit::Nanoseconds, None)
        .into_series()
        .into_column())
}
