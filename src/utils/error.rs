use thiserror::Error;

#[derive(Error, Debug)]
pub enum EdaError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned HTTP status {status}")]
    HttpStatusError { status: u16 },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("DataFrame error: {0}")]
    DataFrameError(#[from] polars::prelude::PolarsError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Dataset not found: '{path}'")]
    DatasetNotFound { path: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

impl EdaError {
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            EdaError::ConfigError { .. }
                | EdaError::InvalidConfigValueError { .. }
                | EdaError::MissingConfigError { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, EdaError>;

/// Why a text cell could not be turned into a number.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("'{input}' is not a valid number")]
    NotANumber { input: String },

    #[error("'{input}' does not fit in a 64-bit integer")]
    Overflow { input: String },
}

impl ConversionError {
    pub fn not_a_number(input: &str) -> Self {
        ConversionError::NotANumber {
            input: input.to_string(),
        }
    }

    pub fn overflow(input: &str) -> Self {
        ConversionError::Overflow {
            input: input.to_string(),
        }
    }
}
