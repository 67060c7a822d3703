use crate::utils::error::Result;
use polars::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

static MISSING: Value = Value::Missing;

/// A single table cell. `Missing` is the missing-value marker.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Missing,
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// NaN floats count as missing, same as an explicit `Missing`.
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Missing => true,
            Value::Float(f) => f.is_nan(),
            _ => false,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) if !f.is_nan() => Some(*f),
            _ => None,
        }
    }

    /// Converts one dataframe cell. Numbers keep their kind; anything that is
    /// neither a number nor a string is carried as its display text.
    pub fn from_any(value: &AnyValue<'_>) -> Self {
        match value {
            AnyValue::Null => Value::Missing,
            AnyValue::Int8(v) => Value::Integer(*v as i64),
            AnyValue::Int16(v) => Value::Integer(*v as i64),
            AnyValue::Int32(v) => Value::Integer(*v as i64),
            AnyValue::Int64(v) => Value::Integer(*v),
            AnyValue::UInt8(v) => Value::Integer(*v as i64),
            AnyValue::UInt16(v) => Value::Integer(*v as i64),
            AnyValue::UInt32(v) => Value::Integer(*v as i64),
            AnyValue::UInt64(v) => i64::try_from(*v)
                .map(Value::Integer)
                .unwrap_or(Value::Float(*v as f64)),
            AnyValue::Float32(v) => Value::Float(*v as f64),
            AnyValue::Float64(v) => Value::Float(*v),
            AnyValue::String(s) => Value::Text(s.to_string()),
            AnyValue::StringOwned(s) => Value::Text(s.to_string()),
            other => Value::Text(other.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Missing => write!(f, "NaN"),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(v) => write!(f, "{}", v),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

/// Builds a column from cells: int64 when every present cell is an integer,
/// float64 when every present cell is numeric (an all-missing column
/// included), string otherwise.
pub fn values_to_series(name: &str, values: &[Value]) -> Series {
    let present = || values.iter().filter(|v| !v.is_missing());

    if present().next().is_some() && present().all(|v| matches!(v, Value::Integer(_))) {
        let cells: Vec<Option<i64>> = values
            .iter()
            .map(|v| match v {
                Value::Integer(i) => Some(*i),
                _ => None,
            })
            .collect();
        Series::new(name.into(), cells)
    } else if present().all(|v| v.as_f64().is_some()) {
        let cells: Vec<Option<f64>> = values.iter().map(Value::as_f64).collect();
        Series::new(name.into(), cells)
    } else {
        let cells: Vec<Option<String>> = values
            .iter()
            .map(|v| (!v.is_missing()).then(|| v.to_string()))
            .collect();
        Series::new(name.into(), cells)
    }
}

/// Column names used by the OMDb enrichment step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichColumns {
    pub title: String,
    pub rating: String,
    pub revenue: String,
    pub genre: String,
    /// Columns checked for missing values; only these are ever filled.
    pub targets: Vec<String>,
}

impl Default for EnrichColumns {
    fn default() -> Self {
        Self::new("Title", "IMDB_Rating", "Revenue", "Genre")
    }
}

impl EnrichColumns {
    /// Targets default to the rating, revenue and genre columns.
    pub fn new(
        title: impl Into<String>,
        rating: impl Into<String>,
        revenue: impl Into<String>,
        genre: impl Into<String>,
    ) -> Self {
        let (rating, revenue, genre) = (rating.into(), revenue.into(), genre.into());
        Self {
            title: title.into(),
            targets: vec![rating.clone(), revenue.clone(), genre.clone()],
            rating,
            revenue,
            genre,
        }
    }

    pub fn with_targets(mut self, targets: Vec<String>) -> Self {
        if !targets.is_empty() {
            self.targets = targets;
        }
        self
    }

    pub fn is_target(&self, column: &str) -> bool {
        self.targets.iter().any(|t| t == column)
    }
}

/// Body returned by the OMDb title lookup. Only the fields we backfill from
/// are kept.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OmdbResponse {
    #[serde(rename = "Response", default)]
    pub response: String,
    #[serde(rename = "Title")]
    pub title: Option<String>,
    #[serde(rename = "imdbRating")]
    pub imdb_rating: Option<String>,
    #[serde(rename = "BoxOffice")]
    pub box_office: Option<String>,
    #[serde(rename = "Genre")]
    pub genre: Option<String>,
    #[serde(rename = "Error")]
    pub error: Option<String>,
}

impl OmdbResponse {
    pub fn is_found(&self) -> bool {
        self.response == "True"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_detection() {
        assert!(Value::Missing.is_missing());
        assert!(Value::Float(f64::NAN).is_missing());
        assert!(!Value::Float(7.5).is_missing());
        assert!(!Value::from("").is_missing());

        let row: Row = [("Title", Value::from("Heat"))].into_iter().collect();
        assert!(row.is_missing("Genre"));
        assert!(!row.is_missing("Title"));
    }

    #[test]
    fn test_from_any_keeps_numeric_kind() {
        assert_eq!(Value::from_any(&AnyValue::Null), Value::Missing);
        assert_eq!(Value::from_any(&AnyValue::Int32(1995)), Value::Integer(1995));
        assert_eq!(Value::from_any(&AnyValue::Float64(8.3)), Value::Float(8.3));
        assert_eq!(Value::from_any(&AnyValue::String("Heat")), Value::from("Heat"));
    }

    #[test]
    fn test_values_to_series_dtypes() {
        let ints = [Value::Integer(1), Value::Missing, Value::Integer(3)];
        let series = values_to_series("a", &ints);
        assert_eq!(series.dtype(), &DataType::Int64);
        assert_eq!(series.null_count(), 1);

        let mixed = [Value::Integer(1), Value::Float(2.5)];
        assert_eq!(values_to_series("a", &mixed).dtype(), &DataType::Float64);

        let text = [Value::Integer(1), Value::from("two")];
        assert_eq!(values_to_series("a", &text).dtype(), &DataType::String);

        // 全部缺值的欄位是 float64，和 pandas 的 NaN 欄位一致
        let empty = values_to_series("a", &[Value::Missing, Value::Missing]);
        assert_eq!(empty.dtype(), &DataType::Float64);
        assert_eq!(empty.null_count(), 2);
    }

    #[test]
    fn test_row_from_frame() {
        let df = df!(
            "Title" => ["Heat", "Alien"],
            "Year" => [Some(1995i64), None]
        )
        .unwrap();

        let row = Row::from_frame(&df, 1, &["Title", "Year", "Genre"]).unwrap();

        assert_eq!(row.get("Title"), &Value::from("Alien"));
        assert!(row.is_missing("Year"));
        assert!(!row.data.contains_key("Genre"));
    }

    #[test]
    fn test_omdb_response_deserialize() {
        let body = r#"{"Title":"Heat","imdbRating":"8.3","BoxOffice":"$67,436,818","Genre":"Action, Crime, Drama","Response":"True"}"#;
        let parsed: OmdbResponse = serde_json::from_str(body).unwrap();

        assert!(parsed.is_found());
        assert_eq!(parsed.imdb_rating.as_deref(), Some("8.3"));
        assert_eq!(parsed.genre.as_deref(), Some("Action, Crime, Drama"));

        let missing: OmdbResponse =
            serde_json::from_str(r#"{"Response":"False","Error":"Movie not found!"}"#).unwrap();
        assert!(!missing.is_found());
        assert_eq!(missing.error.as_deref(), Some("Movie not found!"));
    }
}
