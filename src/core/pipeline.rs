use crate::core::enrich::{fill_from_omdb, needs_lookup};
use crate::core::loader::{read_table, DatasetSource};
use crate::core::report::DatasetReport;
use crate::core::{budget, year};
use crate::core::{ConfigProvider, MovieLookup, Pipeline, Row, Storage, Value};
use crate::domain::model::values_to_series;
use crate::utils::error::{EdaError, Result};
use polars::prelude::*;

/// Load → normalize → enrich → write, one dataset per run.
///
/// Rows are enriched strictly one after another; there is no batching or
/// parallel lookup.
pub struct MoviePipeline<S: Storage, L: MovieLookup, C: ConfigProvider> {
    storage: S,
    lookup: Option<L>,
    config: C,
}

impl<S: Storage, L: MovieLookup, C: ConfigProvider> MoviePipeline<S, L, C> {
    /// `lookup` may be `None` when enrichment is disabled.
    pub fn new(storage: S, lookup: Option<L>, config: C) -> Self {
        Self {
            storage,
            lookup,
            config,
        }
    }

    pub fn output_file_name(&self) -> String {
        format!("{}_clean.csv", self.config.dataset())
    }

    async fn enrich(&self, lookup: &L, df: &mut DataFrame) -> Result<()> {
        let columns = self.config.enrich_columns();
        let height = df.height();

        // 目標欄位不存在時先補上，填入的值才會被輸出
        for target in &columns.targets {
            if df.column(target).is_err() {
                tracing::warn!("Column '{}' not in dataset, adding it", target);
                df.with_column(Series::full_null(
                    target.as_str().into(),
                    height,
                    &DataType::Float64,
                ))?;
            }
        }

        let mut wanted: Vec<&str> = vec![columns.title.as_str()];
        wanted.extend(
            columns
                .targets
                .iter()
                .map(String::as_str)
                .filter(|t| *t != columns.title),
        );

        let mut enriched = Vec::with_capacity(height);
        let mut lookups = 0;
        for idx in 0..height {
            let row = Row::from_frame(df, idx, &wanted)?;
            if needs_lookup(&row, &columns) {
                lookups += 1;
            }
            enriched.push(fill_from_omdb(row, lookup, &columns).await);
        }

        for target in &columns.targets {
            let values: Vec<Value> = enriched.iter().map(|row| row.get(target).clone()).collect();
            df.replace(target, values_to_series(target, &values))?;
        }

        tracing::info!(
            "🎬 Enrichment finished: {} of {} rows needed an OMDb lookup",
            lookups,
            height
        );
        Ok(())
    }
}

/// Rewrites a text column cell by cell with `f`. Columns that are already
/// numeric are left as they are.
fn normalize_column(df: &mut DataFrame, column: &str, f: fn(&Value) -> Value) -> Result<()> {
    let Ok(existing) = df.column(column) else {
        tracing::warn!("Column '{}' not found, skipping normalization", column);
        return Ok(());
    };

    let series = existing.as_materialized_series();
    if series.dtype() != &DataType::String {
        tracing::info!(
            "Column '{}' is already {}, nothing to normalize",
            column,
            series.dtype()
        );
        return Ok(());
    }

    let values: Vec<Value> = series
        .str()?
        .into_iter()
        .map(|cell| match cell {
            Some(text) => f(&Value::from(text)),
            None => Value::Missing,
        })
        .collect();

    df.replace(column, values_to_series(column, &values))?;
    tracing::info!("Normalized column '{}'", column);
    Ok(())
}

#[async_trait::async_trait]
impl<S: Storage, L: MovieLookup, C: ConfigProvider> Pipeline for MoviePipeline<S, L, C> {
    async fn extract(&self) -> Result<DataFrame> {
        let source = DatasetSource::new(self.config.data_dir());
        let path = source.path_for(self.config.dataset());
        tracing::debug!("Reading dataset from {}", path.display());

        let df = read_table(&path)?;
        tracing::info!("\n{}", DatasetReport::from_frame(self.config.dataset(), &df)?);
        Ok(df)
    }

    async fn transform(&self, mut df: DataFrame) -> Result<DataFrame> {
        if let Some(column) = self.config.year_column() {
            normalize_column(&mut df, column, year::normalize_year)?;
        }

        if let Some(column) = self.config.budget_column() {
            normalize_column(&mut df, column, budget::normalize_budget)?;
        }

        match (&self.lookup, self.config.enrich_enabled()) {
            (Some(lookup), true) => self.enrich(lookup, &mut df).await?,
            (None, true) => {
                return Err(EdaError::MissingConfigError {
                    field: "api_key".to_string(),
                })
            }
            (_, false) => tracing::info!("OMDb enrichment disabled"),
        }

        Ok(df)
    }

    async fn load(&self, mut df: DataFrame) -> Result<String> {
        let mut data = Vec::new();
        CsvWriter::new(&mut data)
            .include_header(true)
            .finish(&mut df)?;

        let file_name = self.output_file_name();
        tracing::debug!("Writing {} bytes to {}", data.len(), file_name);
        self.storage.write_file(&file_name, &data).await?;

        Ok(format!("{}/{}", self.config.output_path(), file_name))
    }
}
