use thiserror::Error;

/// Errors raised below the orchestrator boundary.
///
/// The sync manager logs these where they occur and resolves to a
/// [`SyncOutcome`](crate::sync::SyncOutcome) for its consumer; none of them
/// propagate to the UI layer.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure before any HTTP status was received.
    #[error("client error: {0}")]
    Client(String),

    /// The API answered with a non-2xx status.
    #[error("server error: HTTP {0}")]
    Server(u16),

    /// The API answered 2xx with an empty body.
    #[error("empty response body")]
    NoData,

    /// The body did not match the expected wire schema.
    #[error("failed to decode response: {0}")]
    Decoding(String),
}
