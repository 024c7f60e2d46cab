//! In-memory snapshot source.

use async_trait::async_trait;

use super::{calculate_checksum, FetchedSnapshot, SnapshotSource, SourceResult};
use crate::models::Snapshot;

/// Serves a snapshot held in memory.
#[derive(Debug, Clone)]
pub struct LocalSnapshotSource {
    snapshot: Snapshot,
}

impl LocalSnapshotSource {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }
}

#[async_trait]
impl SnapshotSource for LocalSnapshotSource {
    async fn fetch_snapshot(&self) -> SourceResult<FetchedSnapshot> {
        // Fingerprint the canonical serialization so equal snapshots share a checksum.
        let body = serde_json::to_string(&self.snapshot)?;
        Ok(FetchedSnapshot {
            snapshot: self.snapshot.clone(),
            checksum: calculate_checksum(&body),
        })
    }

    fn describe(&self) -> String {
        format!("local ({} events)", self.snapshot.production_trend.len())
    }
}
