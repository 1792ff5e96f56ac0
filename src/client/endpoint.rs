//! Request construction for the Marvel gateway.

/// Fixed page size of the paginated listing endpoints.
pub const PAGE_LIMIT: u32 = 100;

/// Number of concurrent page requests issued on a cold cache.
pub const FANOUT_CALLS: u32 = 15;

/// Default API host.
pub const DEFAULT_BASE_URL: &str = "https://gateway.marvel.com";

/// The two listing requests this core issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestType {
    ListCharacters { offset: u32 },
    ListEvents { character_id: i64 },
}

impl RequestType {
    pub fn path(&self) -> String {
        match self {
            RequestType::ListCharacters { .. } => "/v1/public/characters".to_string(),
            RequestType::ListEvents { character_id } => {
                format!("/v1/public/characters/{}/events", character_id)
            }
        }
    }
}

/// Marvel API key pair.
///
/// Every request carries `ts`, `apikey` and `hash` query parameters, where
/// `hash = md5(ts + private_key + public_key)`.
#[derive(Clone)]
pub struct ApiKeys {
    public_key: String,
    private_key: String,
}

impl ApiKeys {
    pub fn new(public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            private_key: private_key.into(),
        }
    }

    pub fn hash(&self, ts: &str) -> String {
        let digest = md5::compute(format!("{}{}{}", ts, self.private_key, self.public_key));
        format!("{:x}", digest)
    }

    /// Auth query parameters for a request issued at timestamp `ts`.
    pub fn auth_params(&self, ts: &str) -> Vec<(&'static str, String)> {
        vec![
            ("apikey", self.public_key.clone()),
            ("ts", ts.to_string()),
            ("hash", self.hash(ts)),
            ("limit", PAGE_LIMIT.to_string()),
        ]
    }
}

impl std::fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never log the private key.
        f.debug_struct("ApiKeys")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}
