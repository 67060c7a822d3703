//! First-look summary of a loaded dataframe: preview rows, shape, duplicates,
//! column info, null percentages and descriptive statistics.

use crate::utils::error::Result;
use polars::prelude::*;
use std::fmt;

pub const PREVIEW_ROWS: usize = 5;

/// Name of the count column produced by `value_counts`; unlikely to collide
/// with a dataset column.
const COUNT_COLUMN: &str = "__freq";

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    pub name: String,
    pub non_null: usize,
    pub dtype: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnSummary {
    Numeric {
        name: String,
        count: usize,
        mean: Option<f64>,
        std: Option<f64>,
        min: Option<f64>,
        q25: Option<f64>,
        q50: Option<f64>,
        q75: Option<f64>,
        max: Option<f64>,
    },
    Text {
        name: String,
        count: usize,
        unique: usize,
        top: Option<String>,
        freq: usize,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatasetReport {
    pub name: String,
    pub head: String,
    pub tail: String,
    pub rows: usize,
    pub columns: usize,
    pub duplicate_rows: usize,
    pub info: Vec<ColumnInfo>,
    pub null_percentages: Vec<(String, f64)>,
    pub summaries: Vec<ColumnSummary>,
}

impl DatasetReport {
    pub fn from_frame(name: &str, df: &DataFrame) -> Result<Self> {
        Ok(Self {
            name: name.to_string(),
            head: df.head(Some(PREVIEW_ROWS)).to_string(),
            tail: df.tail(Some(PREVIEW_ROWS)).to_string(),
            rows: df.height(),
            columns: df.width(),
            duplicate_rows: count_duplicates(df)?,
            info: column_info(df),
            null_percentages: null_percentages(df),
            summaries: describe(df)?,
        })
    }
}

pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// dtype label the way pandas prints it.
pub fn dtype_label(dtype: &DataType) -> String {
    let label = match dtype {
        DataType::Int8 => "int8",
        DataType::Int16 => "int16",
        DataType::Int32 => "int32",
        DataType::Int64 => "int64",
        DataType::UInt8 => "uint8",
        DataType::UInt16 => "uint16",
        DataType::UInt32 => "uint32",
        DataType::UInt64 => "uint64",
        DataType::Float32 => "float32",
        DataType::Float64 => "float64",
        DataType::Boolean => "bool",
        DataType::String => "object",
        other => return other.to_string(),
    };
    label.to_string()
}

/// Rows identical to an earlier row. The first occurrence is not counted.
pub fn count_duplicates(df: &DataFrame) -> Result<usize> {
    let unique = df.unique::<&str, &str>(None, UniqueKeepStrategy::First, None)?;
    Ok(df.height() - unique.height())
}

pub fn column_info(df: &DataFrame) -> Vec<ColumnInfo> {
    df.get_columns()
        .iter()
        .map(|column| ColumnInfo {
            name: column.name().to_string(),
            non_null: column.len() - column.null_count(),
            dtype: dtype_label(column.dtype()),
        })
        .collect()
}

/// Percentage of missing cells per column, rounded to 2 decimals.
pub fn null_percentages(df: &DataFrame) -> Vec<(String, f64)> {
    let height = df.height();
    df.get_columns()
        .iter()
        .map(|column| {
            let pct = if height == 0 {
                0.0
            } else {
                column.null_count() as f64 / height as f64 * 100.0
            };
            (column.name().to_string(), round2(pct))
        })
        .collect()
}

pub fn describe(df: &DataFrame) -> Result<Vec<ColumnSummary>> {
    df.get_columns()
        .iter()
        .map(|column| {
            let series = column.as_materialized_series();
            if is_numeric_dtype(series.dtype()) {
                summarize_numeric(series)
            } else {
                summarize_text(series)
            }
        })
        .collect()
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn summarize_numeric(series: &Series) -> Result<ColumnSummary> {
    let floats = series.cast(&DataType::Float64)?;
    let values = floats.f64()?;

    Ok(ColumnSummary::Numeric {
        name: series.name().to_string(),
        count: values.len() - values.null_count(),
        mean: finite(values.mean()),
        std: finite(values.std(1)),
        min: values.min(),
        q25: values.quantile(0.25, QuantileMethod::Linear)?,
        q50: values.quantile(0.5, QuantileMethod::Linear)?,
        q75: values.quantile(0.75, QuantileMethod::Linear)?,
        max: values.max(),
    })
}

fn summarize_text(series: &Series) -> Result<ColumnSummary> {
    let non_null = series.cast(&DataType::String)?.drop_nulls();
    let name = series.name().to_string();

    if non_null.is_empty() {
        return Ok(ColumnSummary::Text {
            name,
            count: 0,
            unique: 0,
            top: None,
            freq: 0,
        });
    }

    let counts = non_null.value_counts(true, false, COUNT_COLUMN.into(), false)?;
    let top = counts
        .column(non_null.name())?
        .as_materialized_series()
        .str()?
        .get(0)
        .map(str::to_string);
    let freq = counts.column(COUNT_COLUMN)?.get(0)?.try_extract::<u64>()? as usize;

    Ok(ColumnSummary::Text {
        name,
        count: non_null.len(),
        unique: non_null.n_unique()?,
        top,
        freq,
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn fmt_stat(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "NaN".to_string(),
    }
}

impl fmt::Display for ColumnSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnSummary::Numeric {
                name,
                count,
                mean,
                std,
                min,
                q25,
                q50,
                q75,
                max,
            } => write!(
                f,
                "{}: count={} mean={} std={} min={} 25%={} 50%={} 75%={} max={}",
                name,
                count,
                fmt_stat(*mean),
                fmt_stat(*std),
                fmt_stat(*min),
                fmt_stat(*q25),
                fmt_stat(*q50),
                fmt_stat(*q75),
                fmt_stat(*max)
            ),
            ColumnSummary::Text {
                name,
                count,
                unique,
                top,
                freq,
            } => write!(
                f,
                "{}: count={} unique={} top={} freq={}",
                name,
                count,
                unique,
                top.as_deref().unwrap_or("NaN"),
                freq
            ),
        }
    }
}

impl fmt::Display for DatasetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "First rows of '{}':", self.name)?;
        writeln!(f, "{}", self.head)?;
        writeln!(f, "\nLast rows:")?;
        writeln!(f, "{}", self.tail)?;
        writeln!(
            f,
            "-----\n\nThe table has {} rows and {} columns.\n-----",
            self.rows, self.columns
        )?;
        writeln!(f, "\nDuplicate rows: {}\n-----", self.duplicate_rows)?;

        writeln!(f, "\nColumn info:")?;
        for info in &self.info {
            writeln!(f, "  {:<24} {:>8} non-null  {}", info.name, info.non_null, info.dtype)?;
        }

        writeln!(f, "\nNull percentage:")?;
        for (name, pct) in &self.null_percentages {
            writeln!(f, "  {:<24} {:>6.2}", name, pct)?;
        }

        writeln!(f, "-----\n\nDescriptive statistics:")?;
        for summary in &self.summaries {
            writeln!(f, "  {}", summary)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> DataFrame {
        df!(
            "Title" => ["Heat", "Heat", "Alien", "Ronin"],
            "Year" => [1995i64, 1995, 1979, 1998],
            "IMDB_Rating" => [Some(8.3f64), Some(8.3), None, Some(7.2)]
        )
        .unwrap()
    }

    #[test]
    fn test_duplicates_and_nulls() {
        let df = sample_frame();

        assert_eq!(count_duplicates(&df).unwrap(), 1);
        let nulls = null_percentages(&df);
        assert_eq!(nulls[0], ("Title".to_string(), 0.0));
        assert_eq!(nulls[2], ("IMDB_Rating".to_string(), 25.0));
    }

    #[test]
    fn test_null_percentage_rounding() {
        let df = df!("a" => [None, Some(1i64), Some(2)]).unwrap();

        assert_eq!(null_percentages(&df)[0].1, 33.33);
    }

    #[test]
    fn test_column_info() {
        let info = column_info(&sample_frame());

        assert_eq!(info[0].dtype, "object");
        assert_eq!(info[1].dtype, "int64");
        assert_eq!(info[2].dtype, "float64");
        assert_eq!(info[2].non_null, 3);
    }

    #[test]
    fn test_describe_numeric_and_text() {
        let summaries = describe(&sample_frame()).unwrap();

        match &summaries[0] {
            ColumnSummary::Text {
                count,
                unique,
                top,
                freq,
                ..
            } => {
                assert_eq!(*count, 4);
                assert_eq!(*unique, 3);
                assert_eq!(top.as_deref(), Some("Heat"));
                assert_eq!(*freq, 2);
            }
            other => panic!("expected text summary, got {:?}", other),
        }

        match &summaries[1] {
            ColumnSummary::Numeric {
                count,
                min,
                q50,
                max,
                mean,
                ..
            } => {
                assert_eq!(*count, 4);
                assert_eq!(*min, Some(1979.0));
                assert_eq!(*q50, Some(1995.0));
                assert_eq!(*max, Some(1998.0));
                assert_eq!(*mean, Some(1991.75));
            }
            other => panic!("expected numeric summary, got {:?}", other),
        }
    }

    #[test]
    fn test_quantiles_interpolate_linearly() {
        let df = df!("x" => [1.0f64, 2.0, 3.0, 4.0]).unwrap();

        match &describe(&df).unwrap()[0] {
            ColumnSummary::Numeric { q25, q50, q75, std, .. } => {
                assert_eq!(*q25, Some(1.75));
                assert_eq!(*q50, Some(2.5));
                assert_eq!(*q75, Some(3.25));
                assert!((std.unwrap() - 1.2910).abs() < 1e-3);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_all_missing_numeric_column() {
        let df = df!("x" => [None::<f64>, None]).unwrap();

        match &describe(&df).unwrap()[0] {
            ColumnSummary::Numeric { count, mean, min, .. } => {
                assert_eq!(*count, 0);
                assert_eq!(*mean, None);
                assert_eq!(*min, None);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_report_rendering() {
        let report = DatasetReport::from_frame("movies", &sample_frame()).unwrap();
        let text = report.to_string();

        assert_eq!(report.rows, 4);
        assert_eq!(report.columns, 3);
        assert!(text.contains("The table has 4 rows and 3 columns."));
        assert!(text.contains("Duplicate rows: 1"));
        assert!(report.head.contains("IMDB_Rating"));
        assert!(report.tail.contains("Ronin"));
    }
}
