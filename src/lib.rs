#[cfg(feature = "cli")]
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{cli::LocalStorage, toml_config::TomlConfig, CliConfig};

pub use crate::core::{
    budget::{normalize_budget, parse_budget},
    enrich::fill_from_omdb,
    etl::EtlEngine,
    loader::{load_eda, read_table, DatasetSource},
    omdb::{ApiKey, OmdbClient},
    pipeline::MoviePipeline,
    year::{normalize_year, parse_year},
};
pub use domain::model::{values_to_series, EnrichColumns, Row, Value};
pub use utils::error::{ConversionError, EdaError, Result};
