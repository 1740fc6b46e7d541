use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{IngestError, Result};

/// Default specification, also written out as the template on a mismatch.
///
/// Time (unix seconds), Current, Voltage, Temperature.
pub const DEFAULT_FORMAT_YAML: &str = "\
columns:
  - Time
  - Current
  - Voltage
  - Temperature
date_column:
  Time: s
float32: False
";

/// Names the columns of a raw 2-D array, by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatSpec {
    /// One name per array column, in column-index order.
    pub columns: Vec<String>,
    /// Columns holding epoch offsets, keyed by name, valued by unit code.
    #[serde(default)]
    pub date_column: BTreeMap<String, String>,
    /// Narrow 64-bit columns to 32 bits before writing.
    #[serde(default)]
    pub float32: bool,
}

impl Default for FormatSpec {
    fn default() -> Self {
        Self {
            columns: ["Time", "Current", "Voltage", "Temperature"]
                .into_iter()
                .map(String::from)
                .collect(),
            date_column: BTreeMap::from([("Time".to_string(), "s".to_string())]),
            float32: false,
        }
    }
}

impl FormatSpec {
    /// Loads a user supplied format file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_yaml_ng::from_str(&text).map_err(|source| IngestError::FormatFile {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `path` when given, otherwise the built-in default.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Writes the default specification to `path`, replacing any existing file.
    pub fn write_template(path: &Path) -> Result<()> {
        std::fs::write(path, DEFAULT_FORMAT_YAML).map_err(|e| IngestError::TemplateWrite {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Unit of an epoch offset stored in a numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateUnit {
    Days,
    Hours,
    Minutes,
    Seconds,
    Milliseconds,
    Microseconds,
    Nanoseconds,
}

impl DateUnit {
    fn nanos_per_unit(self) -> i64 {
        match self {
            Self::Days => 86_400_000_000_000,
            Self::Hours => 3_600_000_000_000,
            Self::Minutes => 60_000_000_000,
            Self::Seconds => 1_000_000_000,
            Self::Milliseconds => 1_000_000,
            Self::Microseconds => 1_000,
            Self::Nanoseconds => 1,
        }
    }

    /// Converts a fractional offset in this unit to nanoseconds since the epoch.
    ///
    /// NaN, infinities and values outside the `i64` nanosecond range give `None`.
    pub fn to_nanos(self, value: f64) -> Option<i64> {
        let nanos = (value * self.nanos_per_unit() as f64).round();
        if nanos.is_finite() && nanos >= i64::MIN as f64 && nanos < i64::MAX as f64 {
            Some(nanos as i64)
        } else {
            None
        }
    }

    /// Exact conversion of an integer offset; overflow gives `None`.
    pub fn int_to_nanos(self, value: i64) -> Option<i64> {
        value.checked_mul(self.nanos_per_unit())
    }
}

impl FromStr for DateUnit {
    type Err = String;

    fn from_str(code: &str) -> std::result::Result<Self, Self::Err> {
        match code {
            "D" => Ok(Self::Days),
            "h" => Ok(Self::Hours),
            "m" => Ok(Self::Minutes),
            "s" => Ok(Self::Seconds),
            "ms" => Ok(Self::Milliseconds),
            "us" => Ok(Self::Microseconds),
            "ns" => Ok(Self::Nanoseconds),
            other => Err(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_int_to_nanos_is_exact() {
        assert_eq!(
            DateUnit::Nanoseconds.int_to_nanos(1_700_000_000_123_456_789),
            Some(1_700_000_000_123_456_789)
        );
        assert_eq!(
            DateUnit::Milliseconds.int_to_nanos(1_700_000_000_123),
            Some(1_700_000_000_123_000_000)
        );
        assert_eq!(DateUnit::Days.int_to_nanos(i64::MAX / 2), None);
    }

    #[test]
    fn test_default_template_parses_to_default_spec() {
        let parsed: FormatSpec = serde_yaml_ng::from_str(DEFAULT_FORMAT_YAML).unwrap();
        assert_eq!(parsed, FormatSpec::default());
    }

    #[test]
    fn test_optional_fields_default() {
        let parsed: FormatSpec = serde_yaml_ng::from_str("columns: [a, b]\n").unwrap();
        assert_eq!(parsed.columns, vec!["a", "b"]);
        assert!(parsed.date_column.is_empty());
        assert!(!parsed.float32);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("format.yml");
        std::fs::write(&path, "date_column: [oops]\n").unwrap();

        let result = FormatSpec::load(&path);

        assert!(matches!(result, Err(IngestError::FormatFile { .. })));
    }

    #[test]
    fn test_date_units() {
        assert_eq!("s".parse::<DateUnit>(), Ok(DateUnit::Seconds));
        assert_eq!("ms".parse::<DateUnit>(), Ok(DateUnit::Milliseconds));
        assert!("fortnight".parse::<DateUnit>().is_err());
        assert_eq!(DateUnit::Seconds.to_nanos(1.5), Some(1_500_000_000));
        assert_eq!(DateUnit::Days.to_nanos(1.0), Some(86_400_000_000_000));
        assert_eq!(DateUnit::Seconds.to_nanos(f64::NAN), None);
        assert_eq!(DateUnit::Seconds.to_nanos(1e30), None);
    }
}
