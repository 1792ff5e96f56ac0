//! Concurrent page fan-out over the character listing.
//!
//! Issues a fixed number of page requests at increasing offsets and joins on
//! all of them before producing a single deduplicated, name-sorted batch.
//! Completion order across pages is whatever the network gives us; the final
//! sort is what makes the output deterministic.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::warn;

use crate::protocol::CharacterRecord;

use super::RemoteSource;

/// Fan-out fetcher for the full character listing.
pub struct FanoutFetcher {
    remote: Arc<dyn RemoteSource>,
    calls: u32,
    limit: u32,
}

impl FanoutFetcher {
    pub fn new(remote: Arc<dyn RemoteSource>, calls: u32, limit: u32) -> Self {
        Self { remote, calls, limit }
    }

    /// Fetch every page concurrently and merge the results.
    ///
    /// Each task owns its page; results only meet at the join barrier, and a
    /// failed page contributes nothing beyond a log line. If every page fails
    /// the batch is simply empty. Dropping the returned future aborts all
    /// in-flight page requests.
    pub async fn fetch_all(&self) -> Vec<CharacterRecord> {
        let mut set = JoinSet::new();

        for i in 0..self.calls {
            let remote = self.remote.clone();
            let offset = i * self.limit;
            set.spawn(async move { (offset, remote.character_page(offset).await) });
        }

        let mut merged = Vec::new();
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((_, Ok(page))) => merged.extend(page),
                Ok((offset, Err(e))) => warn!(offset, error = %e, "character page fetch failed"),
                Err(e) => warn!(error = %e, "character page task aborted"),
            }
        }

        // id is the natural key; the listing occasionally repeats a character
        // across page boundaries when the remote ordering shifts mid-fan-out.
        let mut seen = HashSet::with_capacity(merged.len());
        merged.retain(|record: &CharacterRecord| seen.insert(record.id));

        merged.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        merged
    }
}
