use crate::domain::model::OmdbResponse;
use crate::domain::ports::MovieLookup;
use crate::utils::error::{EdaError, Result};
use reqwest::Client;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_OMDB_ENDPOINT: &str = "http://www.omdbapi.com/";

/// OMDb credential. Read once at start-up and handed to the client; never
/// printed in full.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl From<String> for ApiKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey(****)")
    }
}

pub struct OmdbClient {
    client: Client,
    endpoint: String,
    api_key: ApiKey,
}

impl OmdbClient {
    pub fn new(endpoint: impl Into<String>, api_key: ApiKey) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            api_key,
        }
    }

    pub fn with_timeout(
        endpoint: impl Into<String>,
        api_key: ApiKey,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl MovieLookup for OmdbClient {
    async fn lookup(&self, title: &str) -> Result<OmdbResponse> {
        tracing::debug!("Querying OMDb at {} for '{}'", self.endpoint, title);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("t", title), ("apikey", self.api_key.expose())])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("OMDb response status: {}", status);

        if !status.is_success() {
            return Err(EdaError::HttpStatusError {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
