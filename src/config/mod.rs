pub mod cli;
pub mod toml_config;

use crate::core::loader::DEFAULT_DATA_DIR;
use crate::core::omdb::{ApiKey, DEFAULT_OMDB_ENDPOINT};
use crate::core::{ConfigProvider, EnrichColumns};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "movie-eda")]
#[command(about = "Exploratory analysis and OMDb backfilling for movie CSV datasets")]
pub struct CliConfig {
    /// Dataset name, read from <data-dir>/<dataset>.csv
    #[arg(long)]
    pub dataset: String,

    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, default_value = DEFAULT_OMDB_ENDPOINT)]
    pub omdb_endpoint: String,

    #[arg(long, env = "OMDB_API_KEY", hide_env_values = true)]
    pub api_key: Option<ApiKey>,

    #[arg(long, default_value = "Title")]
    pub title_column: String,

    /// Column holding spelled-out years
    #[arg(long)]
    pub year_column: Option<String>,

    /// Column holding budget strings such as "15M"
    #[arg(long)]
    pub budget_column: Option<String>,

    #[arg(long, default_value = "IMDB_Rating")]
    pub rating_column: String,

    #[arg(long, default_value = "Revenue")]
    pub revenue_column: String,

    #[arg(long, default_value = "Genre")]
    pub genre_column: String,

    /// Columns to backfill from OMDb (defaults to rating, revenue and genre)
    #[arg(long, value_delimiter = ',')]
    pub fill_columns: Vec<String>,

    #[arg(long, help = "Only print the dataset report")]
    pub report_only: bool,

    #[arg(long, help = "Normalize and write without querying OMDb")]
    pub skip_enrich: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn data_dir(&self) -> &str {
        &self.data_dir
    }

    fn dataset(&self) -> &str {
        &self.dataset
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn omdb_endpoint(&self) -> &str {
        &self.omdb_endpoint
    }

    fn year_column(&self) -> Option<&str> {
        self.year_column.as_deref()
    }

    fn budget_column(&self) -> Option<&str> {
        self.budget_column.as_deref()
    }

    fn enrich_columns(&self) -> EnrichColumns {
        EnrichColumns::new(
            self.title_column.as_str(),
            self.rating_column.as_str(),
            self.revenue_column.as_str(),
            self.genre_column.as_str(),
        )
        .with_targets(self.fill_columns.clone())
    }

    fn enrich_enabled(&self) -> bool {
        !self.report_only && !self.skip_enrich
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_dataset_name("dataset", &self.dataset)?;
        validation::validate_directory("data_dir", &self.data_dir)?;
        validation::validate_directory("output_path", &self.output_path)?;

        if self.enrich_enabled() {
            validation::validate_endpoint("omdb_endpoint", &self.omdb_endpoint)?;
            validation::validate_non_empty_string("title_column", &self.title_column)?;
            let key = validation::validate_required_field("api_key", &self.api_key)?;
            validation::validate_non_empty_string("api_key", key.expose())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliConfig {
        CliConfig::try_parse_from(std::iter::once("movie-eda").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["--dataset", "movies", "--api-key", "k"]);

        assert_eq!(config.data_dir(), "../data");
        assert_eq!(config.omdb_endpoint(), "http://www.omdbapi.com/");
        assert_eq!(config.enrich_columns(), EnrichColumns::default());
        assert!(config.enrich_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_fill_columns_override_targets() {
        let config = parse(&[
            "--dataset",
            "movies",
            "--skip-enrich",
            "--fill-columns",
            "Genre,Revenue",
        ]);

        let columns = config.enrich_columns();
        assert_eq!(columns.targets, vec!["Genre".to_string(), "Revenue".to_string()]);
        assert!(!config.enrich_enabled());
    }

    #[test]
    fn test_api_key_required_only_when_enriching() {
        let mut config = parse(&["--dataset", "movies", "--skip-enrich"]);
        config.api_key = None;
        assert!(config.validate().is_ok());

        config.skip_enrich = false;
        assert!(config.validate().is_err());

        config.api_key = Some(ApiKey::new("   "));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_dataset_paths() {
        let config = parse(&["--dataset", "../movies", "--report-only"]);
        assert!(config.validate().is_err());
    }
}
