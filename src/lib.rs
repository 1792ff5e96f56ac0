//! Marvel Sync
//!
//! Remote/local data-synchronization core for a Marvel character browser.
//! Reconciles the paginated Marvel REST API, a SQLite cache and a concurrent
//! page fan-out into one consistent, deduplicated, name-sorted result set,
//! with offline fallback. Rendering, image loading and text filtering live
//! outside this crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use marvel_sync::{ApiClientBuilder, LocalStore, ReachabilityGate, SyncConfig, SyncManager, SyncOutcome};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClientBuilder::new()
//!         .keys("public-key", "private-key")
//!         .build()?;
//!
//!     let store = LocalStore::open_default("marvel")?;
//!     let gate = Arc::new(ReachabilityGate::new(true));
//!     let manager = SyncManager::new(store, Arc::new(client), gate.clone(), SyncConfig::default());
//!
//!     // Cache-first; a cold cache triggers the 15-way page fan-out.
//!     match manager.get_characters().await {
//!         SyncOutcome::Ready(characters) => println!("{} characters", characters.len()),
//!         SyncOutcome::Offline => println!("offline, nothing cached yet"),
//!         SyncOutcome::EmptyRemote => println!("listing came back empty"),
//!         SyncOutcome::Failed => println!("load failed, see logs"),
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod protocol;
pub mod sync;

pub use client::{ApiClientBuilder, ApiKeys, HttpClient, DEFAULT_BASE_URL, FANOUT_CALLS, PAGE_LIMIT};
pub use protocol::{CharacterRecord, EventRecord, FetchError};
pub use sync::{
    FanoutFetcher, LocalStore, ReachabilityGate, RemoteSource, StoreError, SyncConfig, SyncManager,
    SyncOutcome,
};
