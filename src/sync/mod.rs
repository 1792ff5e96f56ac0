//! Local-first synchronization core.
//!
//! The manager prefers the local cache, falls back to the remote API through
//! a concurrent page fan-out when the cache is cold, and persists whatever
//! the fan-out produced as one transactional batch before serving it.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use marvel_sync::{ApiClientBuilder, LocalStore, ReachabilityGate, SyncConfig, SyncManager};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClientBuilder::new()
//!         .keys("public-key", "private-key")
//!         .build()?;
//!
//!     let store = LocalStore::open_default("marvel")?;
//!     let gate = Arc::new(ReachabilityGate::new(true));
//!     let manager = SyncManager::new(store, Arc::new(client), gate, SyncConfig::default());
//!
//!     let characters = manager.get_characters().await.into_records();
//!     println!("{} characters", characters.len());
//!     Ok(())
//! }
//! ```

pub mod fanout;
pub mod manager;
pub mod reachability;
pub mod store;

pub use fanout::FanoutFetcher;
pub use manager::{SyncConfig, SyncManager, SyncOutcome};
pub use reachability::ReachabilityGate;
pub use store::{LocalStore, StoreError};

use async_trait::async_trait;

use crate::client::HttpClient;
use crate::protocol::{CharacterRecord, EventRecord, FetchError};

/// Seam between the orchestration logic and the wire transport.
///
/// Production hands in the reqwest-backed [`HttpClient`]; tests hand in
/// scripted page sources.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// One page of characters starting at `offset`.
    async fn character_page(&self, offset: u32) -> Result<Vec<CharacterRecord>, FetchError>;

    /// The events a character appears in.
    async fn event_page(&self, character_id: i64) -> Result<Vec<EventRecord>, FetchError>;
}

#[async_trait]
impl RemoteSource for HttpClient {
    async fn character_page(&self, offset: u32) -> Result<Vec<CharacterRecord>, FetchError> {
        HttpClient::character_page(self, offset).await
    }

    async fn event_page(&self, character_id: i64) -> Result<Vec<EventRecord>, FetchError> {
        HttpClient::event_page(self, character_id).await
    }
}
