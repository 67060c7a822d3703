use crate::core::loader::DEFAULT_DATA_DIR;
use crate::core::omdb::{ApiKey, DEFAULT_OMDB_ENDPOINT};
use crate::core::{ConfigProvider, EnrichColumns};
use crate::utils::error::{EdaError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub columns: ColumnsConfig,
    #[serde(default)]
    pub omdb: OmdbConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    pub name: String,
    pub data_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ColumnsConfig {
    pub title: Option<String>,
    pub year: Option<String>,
    pub budget: Option<String>,
    pub rating: Option<String>,
    pub revenue: Option<String>,
    pub genre: Option<String>,
    pub fill: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OmdbConfig {
    pub enabled: Option<bool>,
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| EdaError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${OMDB_API_KEY})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    /// 取得 API 金鑰；未替換的 ${VAR} 視為未設定
    pub fn api_key(&self) -> Option<ApiKey> {
        self.omdb
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty() && !key.contains("${"))
            .map(ApiKey::new)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.omdb.timeout_seconds.map(Duration::from_secs)
    }
}

impl ConfigProvider for TomlConfig {
    fn data_dir(&self) -> &str {
        self.dataset.data_dir.as_deref().unwrap_or(DEFAULT_DATA_DIR)
    }

    fn dataset(&self) -> &str {
        &self.dataset.name
    }

    fn output_path(&self) -> &str {
        self.output.path.as_deref().unwrap_or("./output")
    }

    fn omdb_endpoint(&self) -> &str {
        self.omdb.endpoint.as_deref().unwrap_or(DEFAULT_OMDB_ENDPOINT)
    }

    fn year_column(&self) -> Option<&str> {
        self.columns.year.as_deref()
    }

    fn budget_column(&self) -> Option<&str> {
        self.columns.budget.as_deref()
    }

    fn enrich_columns(&self) -> EnrichColumns {
        let defaults = EnrichColumns::default();
        let c = &self.columns;
        EnrichColumns::new(
            c.title.clone().unwrap_or(defaults.title),
            c.rating.clone().unwrap_or(defaults.rating),
            c.revenue.clone().unwrap_or(defaults.revenue),
            c.genre.clone().unwrap_or(defaults.genre),
        )
        .with_targets(c.fill.clone().unwrap_or_default())
    }

    fn enrich_enabled(&self) -> bool {
        self.omdb.enabled.unwrap_or(true)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_dataset_name("dataset.name", &self.dataset.name)?;
        validation::validate_directory("dataset.data_dir", self.data_dir())?;
        validation::validate_directory("output.path", self.output_path())?;

        if self.enrich_enabled() {
            validation::validate_endpoint("omdb.endpoint", self.omdb_endpoint())?;
            validation::validate_required_field("omdb.api_key", &self.api_key())?;
            if let Some(seconds) = self.omdb.timeout_seconds {
                validation::validate_timeout_seconds("omdb.timeout_seconds", seconds)?;
            }
        }

        Ok(())
    }
}
