use crate::domain::model::{EnrichColumns, OmdbResponse};
use crate::utils::error::Result;
use async_trait::async_trait;
use polars::prelude::DataFrame;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Title lookup against a movie-metadata service.
///
/// A non-success HTTP status is reported as `EdaError::HttpStatusError`; a
/// "not found" answer from the service is still `Ok`, with
/// `OmdbResponse::is_found` returning false.
pub trait MovieLookup: Send + Sync {
    fn lookup(&self, title: &str)
        -> impl std::future::Future<Output = Result<OmdbResponse>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn data_dir(&self) -> &str;
    fn dataset(&self) -> &str;
    fn output_path(&self) -> &str;
    fn omdb_endpoint(&self) -> &str;
    fn year_column(&self) -> Option<&str>;
    fn budget_column(&self) -> Option<&str>;
    fn enrich_columns(&self) -> EnrichColumns;
    fn enrich_enabled(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<DataFrame>;
    async fn transform(&self, df: DataFrame) -> Result<DataFrame>;
    async fn load(&self, df: DataFrame) -> Result<String>;
}
