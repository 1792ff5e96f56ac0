use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::protocol::response::{CharacterResult, Envelope, EventResult, PageData};
use crate::protocol::{CharacterRecord, EventRecord, FetchError};

use super::endpoint::{ApiKeys, RequestType, PAGE_LIMIT};

/// HTTP client for the Marvel listing endpoints.
///
/// Translates each page response into domain records; wire-only fields never
/// leave this module.
#[derive(Debug)]
pub struct HttpClient {
    base_url: String,
    keys: ApiKeys,
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(base_url: &str, keys: ApiKeys) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .pool_idle_timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(16)
            .build()
            .map_err(|e| FetchError::Client(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            keys,
            client,
        })
    }

    /// Fetch one page of characters at `offset`.
    ///
    /// `offset` must be a multiple of [`PAGE_LIMIT`]; anything else would
    /// shear the fan-out's page boundaries.
    pub async fn character_page(&self, offset: u32) -> Result<Vec<CharacterRecord>, FetchError> {
        if offset % PAGE_LIMIT != 0 {
            return Err(FetchError::Client(format!(
                "offset {} is not a multiple of the page limit {}",
                offset, PAGE_LIMIT
            )));
        }

        let page: PageData<CharacterResult> =
            self.fetch(RequestType::ListCharacters { offset }).await?;
        Ok(page.results.into_iter().map(CharacterRecord::from).collect())
    }

    /// Fetch the events a character appears in.
    pub async fn event_page(&self, character_id: i64) -> Result<Vec<EventRecord>, FetchError> {
        let page: PageData<EventResult> =
            self.fetch(RequestType::ListEvents { character_id }).await?;
        Ok(page.results.into_iter().map(EventRecord::from).collect())
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestType,
    ) -> Result<PageData<T>, FetchError> {
        let url = format!("{}{}", self.base_url, request.path());
        let ts = chrono::Utc::now().timestamp().to_string();

        let mut builder = self.client.get(&url).query(&self.keys.auth_params(&ts));
        if let RequestType::ListCharacters { offset } = &request {
            builder = builder.query(&[("offset", offset.to_string())]);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| FetchError::Client(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Server(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Client(format!("failed to read response: {}", e)))?;

        decode_envelope::<T>(&body).map(|envelope| envelope.data)
    }
}

/// Decode a listing response body into the Marvel envelope.
pub(crate) fn decode_envelope<T: DeserializeOwned>(body: &str) -> Result<Envelope<T>, FetchError> {
    if body.is_empty() {
        return Err(FetchError::NoData);
    }
    serde_json::from_str(body).map_err(|e| FetchError::Decoding(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_misaligned_offset_is_a_client_error() {
        let client = HttpClient::new(
            "https://gateway.marvel.com",
            ApiKeys::new("pub", "priv"),
        )
        .unwrap();

        let err = client.character_page(150).await.unwrap_err();
        assert!(matches!(err, FetchError::Client(_)));
    }

    #[test]
    fn test_empty_body_is_no_data() {
        let err = decode_envelope::<CharacterResult>("").unwrap_err();
        assert!(matches!(err, FetchError::NoData));
    }

    #[test]
    fn test_malformed_body_is_a_decoding_error() {
        // A body that is valid JSON but not the Marvel envelope.
        let err = decode_envelope::<CharacterResult>(r#"{"unexpected": true}"#).unwrap_err();
        assert!(matches!(err, FetchError::Decoding(_)));

        // Truncated body, as if the transport cut the 15th page short.
        let err = decode_envelope::<CharacterResult>(r#"{"code": 200, "status": "Ok", "data"#)
            .unwrap_err();
        assert!(matches!(err, FetchError::Decoding(_)));
    }

    #[test]
    fn test_well_formed_body_decodes() {
        let body = r#"{
            "code": 200,
            "status": "Ok",
            "data": {"offset": 1400, "limit": 100, "total": 1559, "count": 0, "results": []}
        }"#;
        let envelope = decode_envelope::<CharacterResult>(body).unwrap();
        assert_eq!(envelope.data.offset, 1400);
        assert!(envelope.data.results.is_empty());
    }
}
