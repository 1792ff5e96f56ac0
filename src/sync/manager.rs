//! Sync orchestrator.
//!
//! Local-first policy for characters and per-character events: serve the
//! cache when it has anything, otherwise consult the reachability gate, fetch
//! from the remote, persist the batch in one transaction and serve the
//! persisted rows. Errors are logged here and never propagate to the caller;
//! the outcome type carries the offline/empty cases explicitly instead of
//! smuggling them through fake records.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::client::{FANOUT_CALLS, PAGE_LIMIT};
use crate::protocol::{CharacterRecord, EventRecord};

use super::fanout::FanoutFetcher;
use super::reachability::ReachabilityGate;
use super::store::LocalStore;
use super::RemoteSource;

/// Configuration for the sync manager.
#[derive(Clone, Debug)]
pub struct SyncConfig {
    /// Concurrent page requests per character fan-out.
    pub fanout_calls: u32,
    /// Records per page; offsets advance in steps of this.
    pub page_limit: u32,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            fanout_calls: FANOUT_CALLS,
            page_limit: PAGE_LIMIT,
        }
    }
}

/// What a sync request resolved to.
///
/// There is deliberately no error variant carrying a cause: failures are
/// logged at the point of occurrence and the consumer only learns that this
/// load produced nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome<T> {
    /// Records served from the cache or freshly persisted.
    Ready(Vec<T>),
    /// The remote answered with zero records; nothing was persisted.
    EmptyRemote,
    /// Offline with a cold cache; no fetch was attempted.
    Offline,
    /// A local or remote failure ended this load; details are in the log.
    Failed,
}

impl<T> SyncOutcome<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, SyncOutcome::Ready(_))
    }

    /// The records, or an empty list for the offline/empty/failed cases.
    pub fn into_records(self) -> Vec<T> {
        match self {
            SyncOutcome::Ready(records) => records,
            _ => Vec::new(),
        }
    }
}

/// Orchestrates the local store, the reachability gate and the remote API.
///
/// Each call starts from scratch; there is no retry and no state carried
/// between invocations.
pub struct SyncManager {
    store: Arc<Mutex<LocalStore>>,
    remote: Arc<dyn RemoteSource>,
    reachability: Arc<ReachabilityGate>,
    config: SyncConfig,
}

impl SyncManager {
    pub fn new(
        store: LocalStore,
        remote: Arc<dyn RemoteSource>,
        reachability: Arc<ReachabilityGate>,
        config: SyncConfig,
    ) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            remote,
            reachability,
            config,
        }
    }

    /// The full character listing, local-first.
    ///
    /// A populated cache short-circuits before any remote work. On a cold
    /// cache the fan-out batch is persisted in one transaction and the
    /// persisted rows are returned, so identity matches what a later cache
    /// read would serve.
    pub async fn get_characters(&self) -> SyncOutcome<CharacterRecord> {
        {
            let store = self.store.lock().await;
            match store.characters() {
                Ok(cached) if !cached.is_empty() => {
                    debug!(count = cached.len(), "serving characters from cache");
                    return SyncOutcome::Ready(cached);
                }
                Ok(_) => {}
                Err(e) => {
                    error!(error = %e, "local character query failed");
                    return SyncOutcome::Failed;
                }
            }
        }

        if !self.reachability.is_reachable() {
            debug!("offline with a cold character cache");
            return SyncOutcome::Offline;
        }

        let fetcher = FanoutFetcher::new(
            self.remote.clone(),
            self.config.fanout_calls,
            self.config.page_limit,
        );
        let batch = fetcher.fetch_all().await;
        if batch.is_empty() {
            debug!("character fan-out produced no records");
            return SyncOutcome::EmptyRemote;
        }

        let mut store = self.store.lock().await;
        if let Err(e) = store.save_characters(&batch) {
            error!(error = %e, "failed to persist character batch");
            return SyncOutcome::Failed;
        }
        info!(count = batch.len(), "persisted character batch");

        match store.characters() {
            Ok(persisted) => SyncOutcome::Ready(persisted),
            Err(e) => {
                error!(error = %e, "failed to re-read persisted characters");
                SyncOutcome::Failed
            }
        }
    }

    /// The events a character appears in, local-first.
    ///
    /// An empty remote result is never persisted, so the next call retries
    /// the fetch instead of pinning an empty cache entry.
    pub async fn get_events(&self, character_id: i64) -> SyncOutcome<EventRecord> {
        {
            let store = self.store.lock().await;
            match store.events_for_character(character_id) {
                Ok(cached) if !cached.is_empty() => {
                    debug!(character_id, count = cached.len(), "serving events from cache");
                    return SyncOutcome::Ready(cached);
                }
                Ok(_) => {}
                Err(e) => {
                    error!(character_id, error = %e, "local event query failed");
                    return SyncOutcome::Failed;
                }
            }
        }

        if !self.reachability.is_reachable() {
            debug!(character_id, "offline with no cached events");
            return SyncOutcome::Offline;
        }

        let batch = match self.remote.event_page(character_id).await {
            Ok(batch) => batch,
            Err(e) => {
                error!(character_id, error = %e, "event fetch failed");
                return SyncOutcome::Failed;
            }
        };
        if batch.is_empty() {
            debug!(character_id, "remote has no events for character");
            return SyncOutcome::EmptyRemote;
        }

        let mut store = self.store.lock().await;
        if let Err(e) = store.save_events(character_id, &batch) {
            error!(character_id, error = %e, "failed to persist event batch");
            return SyncOutcome::Failed;
        }
        info!(character_id, count = batch.len(), "persisted event batch");

        match store.events_for_character(character_id) {
            Ok(persisted) => SyncOutcome::Ready(persisted),
            Err(e) => {
                error!(character_id, error = %e, "failed to re-read persisted events");
                SyncOutcome::Failed
            }
        }
    }
}
