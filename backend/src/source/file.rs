//! Snapshot source backed by a JSON file.

use async_trait::async_trait;
use log::info;
use std::path::{Path, PathBuf};

use super::{FetchedSnapshot, SnapshotSource, SourceError, SourceResult};

/// Reads a saved factory-data response from disk.
#[derive(Debug, Clone)]
pub struct FileSnapshotSource {
    path: PathBuf,
}

impl FileSnapshotSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SnapshotSource for FileSnapshotSource {
    async fn fetch_snapshot(&self) -> SourceResult<FetchedSnapshot> {
        let body = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            SourceError::IoError(format!("Failed to read {}: {}", self.path.display(), e))
        })?;
        let fetched = FetchedSnapshot::from_body(&body)?;
        info!(
            "Loaded snapshot from {} ({} events, checksum {})",
            self.path.display(),
            fetched.snapshot.production_trend.len(),
            fetched.checksum
        );
        Ok(fetched)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_reads_snapshot_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"faulty_products": 4, "production_trend": [{{"timestamp": 10.5, "station_id": 2, "production": 1}}]}}"#
        )
        .unwrap();

        let source = FileSnapshotSource::new(file.path());
        let fetched = source.fetch_snapshot().await.unwrap();
        assert_eq!(fetched.snapshot.faulty_products, 4);
        assert_eq!(fetched.snapshot.production_trend[0].timestamp, 10);
        assert_eq!(fetched.checksum.len(), 64);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSnapshotSource::new(dir.path().join("absent.json"));
        let err = source.fetch_snapshot().await.unwrap_err();
        assert!(matches!(err, SourceError::IoError(_)));
    }

    #[tokio::test]
    async fn test_malformed_file_is_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"production_trend": "nope"}}"#).unwrap();

        let err = FileSnapshotSource::new(file.path())
            .fetch_snapshot()
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::ParseError(_)));
    }
}
