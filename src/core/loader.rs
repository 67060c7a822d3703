//! CSV dataset loading.

use crate::core::report::DatasetReport;
use crate::utils::error::{EdaError, Result};
use polars::prelude::*;
use std::collections::HashMap;
use std::io::{Cursor, ErrorKind};
use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_DIR: &str = "../data";

/// Cell contents read as missing, matching the usual CSV null markers.
const NULL_TOKENS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "null", "NULL", "None", "#N/A", "<NA>",
];

/// Resolves dataset names to `<data_dir>/<name>.csv`.
#[derive(Debug, Clone)]
pub struct DatasetSource {
    data_dir: PathBuf,
}

impl DatasetSource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{}.csv", name))
    }
}

impl Default for DatasetSource {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}

/// `Score, Score, Score` -> `Score, Score.1, Score.2`
fn dedupe_header(names: &[String]) -> Vec<String> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    names
        .iter()
        .map(|name| {
            let count = seen.entry(name.as_str()).or_insert(0);
            let renamed = if *count == 0 {
                name.clone()
            } else {
                format!("{}.{}", name, count)
            };
            *count += 1;
            renamed
        })
        .collect()
}

/// Checks the header row before handing the bytes to polars. An empty file or
/// header is an error; repeated column names are renamed so no column is
/// dropped.
fn prepare_csv(bytes: Vec<u8>, path: &Path) -> Result<Vec<u8>> {
    let rewritten = {
        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

        if header.iter().all(|name| name.trim().is_empty()) {
            return Err(EdaError::ProcessingError {
                message: format!("'{}' has no columns to parse", path.display()),
            });
        }

        let deduped = dedupe_header(&header);
        if deduped == header {
            None
        } else {
            tracing::warn!(
                "Duplicate column names in {}, renamed to: {}",
                path.display(),
                deduped.join(", ")
            );

            let mut writer = csv::Writer::from_writer(Vec::with_capacity(bytes.len()));
            writer.write_record(&deduped)?;
            for record in reader.byte_records() {
                writer.write_byte_record(&record?)?;
            }
            Some(
                writer
                    .into_inner()
                    .map_err(|e| EdaError::IoError(e.into_error()))?,
            )
        }
    };

    Ok(rewritten.unwrap_or(bytes))
}

/// Reads a CSV file into a dataframe with inferred column types.
///
/// All-missing columns are read as float64, so they summarize like numeric
/// columns of NaN.
pub fn read_table(path: &Path) -> Result<DataFrame> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => EdaError::DatasetNotFound {
            path: path.display().to_string(),
        },
        _ => EdaError::IoError(e),
    })?;
    let bytes = prepare_csv(bytes, path)?;

    let null_values = NullValues::AllColumns(NULL_TOKENS.iter().map(|t| (*t).into()).collect());
    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .with_parse_options(
            CsvParseOptions::default()
                .with_quote_char(Some(b'"'))
                .with_null_values(Some(null_values)),
        )
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()?;

    if df.height() > 0 {
        let empty_columns: Vec<String> = df
            .get_columns()
            .iter()
            .filter(|c| c.null_count() == c.len() && c.dtype() != &DataType::Float64)
            .map(|c| c.name().to_string())
            .collect();
        for name in empty_columns {
            let series = Series::full_null(name.as_str().into(), df.height(), &DataType::Float64);
            df.replace(&name, series)?;
        }
    }

    tracing::debug!(
        "Read {} rows x {} columns from {}",
        df.height(),
        df.width(),
        path.display()
    );

    Ok(df)
}

/// Loads `<data_dir>/<name>.csv` and logs a first-look report.
///
/// Returns `None` when the file is missing or unreadable; the reason is
/// logged, never raised.
pub fn load_eda(source: &DatasetSource, name: &str) -> Option<DataFrame> {
    let path = source.path_for(name);

    let loaded = read_table(&path).and_then(|df| {
        let report = DatasetReport::from_frame(name, &df)?;
        Ok((df, report))
    });

    match loaded {
        Ok((df, report)) => {
            tracing::info!("\n{}", report);
            Some(df)
        }
        Err(EdaError::DatasetNotFound { path }) => {
            tracing::error!("❌ Error: file '{}' not found.", path);
            None
        }
        Err(e) => {
            tracing::error!("❌ Error: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_dataset(dir: &TempDir, name: &str, content: &str) {
        let mut file = std::fs::File::create(dir.path().join(format!("{}.csv", name))).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    fn cell(df: &DataFrame, column: &str, idx: usize) -> AnyValue<'static> {
        df.column(column).unwrap().get(idx).unwrap().into_static()
    }

    #[test]
    fn test_read_table_infers_types_and_nulls() {
        let dir = TempDir::new().unwrap();
        write_dataset(
            &dir,
            "movies",
            "Title,Year,IMDB_Rating,Budget\nHeat,1995,8.3,60M\nAlien,1979,,11M\nRonin,N/A,7.2,55000000\n",
        );

        let df = read_table(&dir.path().join("movies.csv")).unwrap();

        assert_eq!(df.height(), 3);
        let dtypes: Vec<DataType> = df.get_columns().iter().map(|c| c.dtype().clone()).collect();
        assert_eq!(
            dtypes,
            vec![
                DataType::String,
                DataType::Int64,
                DataType::Float64,
                DataType::String
            ]
        );
        assert_eq!(cell(&df, "Year", 0), AnyValue::Int64(1995));
        assert_eq!(cell(&df, "IMDB_Rating", 1), AnyValue::Null);
        assert_eq!(cell(&df, "Year", 2), AnyValue::Null);
    }

    #[test]
    fn test_all_missing_column_is_float() {
        let dir = TempDir::new().unwrap();
        write_dataset(&dir, "movies", "Title,Revenue\nHeat,\nAlien,N/A\n");

        let df = read_table(&dir.path().join("movies.csv")).unwrap();

        assert_eq!(df.column("Revenue").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.column("Revenue").unwrap().null_count(), 2);
    }

    #[test]
    fn test_duplicate_header_keeps_every_column() {
        let dir = TempDir::new().unwrap();
        write_dataset(&dir, "scores", "Title,Score,Score\nHeat,1,2\n");

        let df = read_table(&dir.path().join("scores.csv")).unwrap();

        let names: Vec<String> = df.get_column_names().iter().map(|n| n.to_string()).collect();
        assert_eq!(names, vec!["Title", "Score", "Score.1"]);
        assert_eq!(cell(&df, "Score", 0), AnyValue::Int64(1));
        assert_eq!(cell(&df, "Score.1", 0), AnyValue::Int64(2));
    }

    #[test]
    fn test_dedupe_header() {
        let names = vec!["a".to_string(), "b".to_string(), "a".to_string(), "a".to_string()];
        assert_eq!(dedupe_header(&names), vec!["a", "b", "a.1", "a.2"]);
    }

    #[test]
    fn test_read_table_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = read_table(&dir.path().join("nope.csv"));

        assert!(matches!(result, Err(EdaError::DatasetNotFound { .. })));
    }

    #[test]
    fn test_read_table_empty_file_fails() {
        let dir = TempDir::new().unwrap();
        write_dataset(&dir, "empty", "");

        let result = read_table(&dir.path().join("empty.csv"));

        assert!(matches!(result, Err(EdaError::ProcessingError { .. })));
    }

    #[test]
    fn test_read_table_too_many_fields_fails() {
        let dir = TempDir::new().unwrap();
        write_dataset(&dir, "broken", "a,b\n1,2\n3,4,5\n");

        let result = read_table(&dir.path().join("broken.csv"));

        assert!(result.is_err());
    }

    #[test]
    fn test_load_eda_returns_none_on_failure() {
        let dir = TempDir::new().unwrap();
        let source = DatasetSource::new(dir.path());

        assert!(load_eda(&source, "does_not_exist").is_none());

        write_dataset(&dir, "empty", "");
        assert!(load_eda(&source, "empty").is_none());

        write_dataset(&dir, "broken", "a,b\n1,2\n3,4,5\n");
        assert!(load_eda(&source, "broken").is_none());
    }

    #[test]
    fn test_load_eda_returns_table_unmodified() {
        let dir = TempDir::new().unwrap();
        write_dataset(&dir, "movies", "Title,Year\nHeat,1995\nHeat,1995\n");
        let source = DatasetSource::new(dir.path());

        let df = load_eda(&source, "movies").unwrap();
        let direct = read_table(&source.path_for("movies")).unwrap();

        assert!(df.equals_missing(&direct));
    }

    #[test]
    fn test_default_source_path() {
        let source = DatasetSource::default();
        assert_eq!(
            source.path_for("movies"),
            Path::new("../data").join("movies.csv")
        );
    }
}
