//! Reads the CSV files of one experiment into a single DataFrame.

use std::path::{Path, PathBuf};

use polars::prelude::{
    CsvReadOptions, DataFrame, DataType, IntoLazy, LazyFrame, PolarsError, PolarsResult,
    SerReader, StrptimeOptions, UnionArgs, col, concat_lf_diagonal, lit,
};

use ffc_model::CsvConversionOptions;

use crate::error::{IngestError, Result, column_hint};

/// Column options applied to every CSV file of a run.
#[derive(Debug, Clone, Default)]
pub struct CsvLoadOptions {
    /// Column parsed as datetimes, with the format inferred from the values.
    pub datetime_column: Option<String>,
    /// Column used as the row index. It is dropped, since the index is never written.
    pub index_column: Option<String>,
}

impl From<&CsvConversionOptions> for CsvLoadOptions {
    fn from(options: &CsvConversionOptions) -> Self {
        Self {
            datetime_column: options.datetime_column.clone(),
            index_column: options.index_column.clone(),
        }
    }
}

impl CsvLoadOptions {
    fn hint(&self) -> String {
        column_hint(self.index_column.as_deref(), self.datetime_column.as_deref())
    }
}

/// Reads one CSV file, applying the datetime and index column options.
pub fn read_csv_file(path: &Path, options: &CsvLoadOptions) -> Result<DataFrame> {
    parse_csv_file(path, options).map_err(|e| IngestError::LoadFailure {
        path: path.to_path_buf(),
        hint: options.hint(),
        message: e.to_string(),
    })
}

/// Reads every file of an experiment and stacks the rows in the given order.
///
/// Columns are unioned: a column missing from one file is null for its rows.
/// Callers pass the files sorted by name (see [`crate::list_files`]).
pub fn read_experiment(files: &[PathBuf], options: &CsvLoadOptions) -> Result<DataFrame> {
    let mut frames = Vec::with_capacity(files.len());
    for path in files {
        let frame = read_csv_file(path, options)?;
        tracing::debug!(
            path = %path.display(),
            rows = frame.height(),
            columns = frame.width(),
            "read csv file"
        );
        frames.push(frame);
    }

    match frames.len() {
        0 => Ok(DataFrame::empty()),
        1 => Ok(frames.remove(0)),
        _ => stack_frames(frames.clone()).map_err(|e| IngestError::Concat {
            experiment: experiment_dir(files),
            file: first_unstackable(&frames, files),
            hint: options.hint(),
            message: e.to_string(),
        }),
    }
}

fn parse_csv_file(path: &Path, options: &CsvLoadOptions) -> PolarsResult<DataFrame> {
    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    if let Some(column) = options.datetime_column.as_deref() {
        df = parse_datetime_column(df, column)?;
    }
    if let Some(column) = options.index_column.as_deref() {
        df = df.drop(column)?;
    }

    Ok(df)
}

/// Explicit formats tried when polars cannot infer one, month-first first.
const FALLBACK_DATETIME_FORMATS: &[&str] = &[
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

fn parse_datetime_column(df: DataFrame, column: &str) -> PolarsResult<DataFrame> {
    let dtype = df.column(column)?.dtype().clone();
    match dtype {
        DataType::Datetime(_, _) | DataType::Date => Ok(df),
        DataType::String => match strptime_column(&df, column, None) {
            Ok(parsed) => Ok(parsed),
            Err(inference_error) => FALLBACK_DATETIME_FORMATS
                .iter()
                .find_map(|format| strptime_column(&df, column, Some(format)).ok())
                .ok_or(inference_error),
        },
        other => Err(PolarsError::SchemaMismatch(
            format!("datetime column '{column}' holds {other} values, not text").into(),
        )),
    }
}

fn strptime_column(df: &DataFrame, column: &str, format: Option<&str>) -> PolarsResult<DataFrame> {
    let options = StrptimeOptions {
        format: format.map(Into::into),
        ..StrptimeOptions::default()
    };
    df.clone()
        .lazy()
        .with_column(col(column).str().to_datetime(None, None, options, lit("raise")))
        .collect()
}

fn stack_frames(frames: Vec<DataFrame>) -> PolarsResult<DataFrame> {
    let lazy: Vec<LazyFrame> = frames.into_iter().map(IntoLazy::lazy).collect();
    concat_lf_diagonal(
        lazy,
        UnionArgs {
            to_supertypes: true,
            ..UnionArgs::default()
        },
    )?
    .collect()
}

/// First file that no longer stacks onto the files sorted before it.
fn first_unstackable(frames: &[DataFrame], files: &[PathBuf]) -> PathBuf {
    (2..=frames.len())
        .find(|&end| stack_frames(frames[..end].to_vec()).is_err())
        .and_then(|end| files.get(end - 1))
        .or_else(|| files.last())
        .cloned()
        .unwrap_or_default()
}

fn experiment_dir(files: &[PathBuf]) -> PathBuf {
    files
        .first()
        .and_then(|path| path.parent())
        .map(Path::to_path_buf)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_csv(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_read_csv_file_drops_index_column() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "a.csv", "Record,Voltage\n1,3.7\n2,3.8\n");
        let options = CsvLoadOptions {
            index_column: Some("Record".to_string()),
            ..CsvLoadOptions::default()
        };

        let df = read_csv_file(&path, &options).unwrap();

        assert_eq!(df.get_column_names_str(), vec!["Voltage"]);
        assert_eq!(df.height(), 2);
    }

    #[test]
    fn test_read_csv_file_parses_datetimes() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "a.csv",
            "Timestamp,Current\n2023-01-05 10:00:00,0.5\n2023-01-05 10:00:01,0.6\n",
        );
        let options = CsvLoadOptions {
            datetime_column: Some("Timestamp".to_string()),
            ..CsvLoadOptions::default()
        };

        let df = read_csv_file(&path, &options).unwrap();

        assert!(matches!(
            df.column("Timestamp").unwrap().dtype(),
            DataType::Datetime(_, _)
        ));
    }

    #[test]
    fn test_read_csv_file_parses_month_first_datetimes() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "a.csv",
            "Date Time,Current\n01/25/2023 10:00:00,0.5\n01/25/2023 10:00:01,0.6\n",
        );
        let options = CsvLoadOptions {
            datetime_column: Some("Date Time".to_string()),
            ..CsvLoadOptions::default()
        };

        let df = read_csv_file(&path, &options).unwrap();

        let stamps = df.column("Date Time").unwrap();
        assert!(matches!(stamps.dtype(), DataType::Datetime(_, _)));
        assert_eq!(stamps.null_count(), 0);
    }

    #[test]
    fn test_unparseable_datetimes_still_fail() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "a.csv", "Date Time,Current\nsoon,0.5\n");
        let options = CsvLoadOptions {
            datetime_column: Some("Date Time".to_string()),
            ..CsvLoadOptions::default()
        };

        let err = read_csv_file(&path, &options).unwrap_err();

        assert!(err.to_string().contains("Is datetime column 'Date Time' correct?"));
    }

    #[test]
    fn test_missing_index_column_is_a_load_failure() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "a.csv", "Voltage\n3.7\n");
        let options = CsvLoadOptions {
            index_column: Some("Record".to_string()),
            ..CsvLoadOptions::default()
        };

        let err = read_csv_file(&path, &options).unwrap_err();

        assert!(matches!(err, IngestError::LoadFailure { .. }));
        assert!(err.to_string().contains("Is index column 'Record' correct?"));
    }

    #[test]
    fn test_read_experiment_unions_columns() {
        let dir = TempDir::new().unwrap();
        let a = write_csv(&dir, "a.csv", "Voltage,Current\n3.7,0.5\n");
        let b = write_csv(&dir, "b.csv", "Voltage,Temperature\n3.8,25\n3.9,26\n");

        let df = read_experiment(&[a, b], &CsvLoadOptions::default()).unwrap();

        assert_eq!(df.height(), 3);
        assert_eq!(
            df.get_column_names_str(),
            vec!["Voltage", "Current", "Temperature"]
        );
        assert_eq!(df.column("Current").unwrap().null_count(), 2);
    }
}
