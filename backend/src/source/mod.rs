//! Snapshot sources.
//!
//! The dashboard loads its dataset exactly once. Where it comes from is hidden
//! behind the [`SnapshotSource`] trait:
//!
//! - `http`: `GET {base_url}/api/factory-data` via reqwest (feature `http-source`)
//! - `file`: a JSON file on disk, for replaying a saved snapshot
//!
//! Use [`SourceFactory`] to build the configured source. [`LocalSnapshotSource`]
//! serves an in-memory snapshot to tests and embedders and is constructed
//! directly, never from configuration.

use async_trait::async_trait;

use crate::models::Snapshot;

pub mod checksum;
pub mod error;
pub mod factory;
pub mod file;
#[cfg(feature = "http-source")]
pub mod http;
pub mod local;

pub use checksum::calculate_checksum;
pub use error::{SourceError, SourceResult};
pub use factory::{SourceFactory, SourceType};
pub use file::FileSnapshotSource;
#[cfg(feature = "http-source")]
pub use http::HttpSnapshotSource;
pub use local::LocalSnapshotSource;

/// Path of the factory-data endpoint relative to the server base URL.
pub const FACTORY_DATA_PATH: &str = "/api/factory-data";

/// A snapshot together with the checksum of the body it was parsed from.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedSnapshot {
    pub snapshot: Snapshot,
    pub checksum: String,
}

impl FetchedSnapshot {
    /// Parse a JSON body and fingerprint it.
    pub fn from_body(body: &str) -> SourceResult<Self> {
        let snapshot = Snapshot::from_json_str(body)?;
        Ok(Self {
            snapshot,
            checksum: calculate_checksum(body),
        })
    }
}

/// Provider of the dashboard's one-shot snapshot.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Fetch and parse the full snapshot.
    async fn fetch_snapshot(&self) -> SourceResult<FetchedSnapshot>;

    /// Short description used in log lines.
    fn describe(&self) -> String;
}
