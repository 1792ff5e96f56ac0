mod builder;
mod endpoint;
mod http_client;

pub use builder::ApiClientBuilder;
pub use endpoint::{ApiKeys, RequestType, DEFAULT_BASE_URL, FANOUT_CALLS, PAGE_LIMIT};
pub use http_client::HttpClient;
