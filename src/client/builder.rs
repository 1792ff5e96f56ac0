use crate::protocol::FetchError;

use super::endpoint::{ApiKeys, DEFAULT_BASE_URL};
use super::HttpClient;

/// Builder for the Marvel [`HttpClient`].
pub struct ApiClientBuilder {
    base_url: String,
    keys: Option<ApiKeys>,
}

impl ApiClientBuilder {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            keys: None,
        }
    }

    /// Override the API host, mainly for tests pointed at a local server.
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn keys(mut self, public_key: &str, private_key: &str) -> Self {
        self.keys = Some(ApiKeys::new(public_key, private_key));
        self
    }

    pub fn build(self) -> Result<HttpClient, FetchError> {
        let keys = self
            .keys
            .ok_or_else(|| FetchError::Client("API keys not configured".to_string()))?;
        HttpClient::new(&self.base_url, keys)
    }
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
