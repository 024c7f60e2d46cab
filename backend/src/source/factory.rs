//! Snapshot source factory.
//!
//! Builds the configured [`SnapshotSource`] from [`SourceSettings`]. Only
//! sources that can be described by settings alone are selectable here; a
//! [`LocalSnapshotSource`](super::LocalSnapshotSource) is built directly from
//! the snapshot it serves.

use std::str::FromStr;
use std::sync::Arc;

use super::{FileSnapshotSource, SnapshotSource, SourceError, SourceResult};
use crate::config::SourceSettings;

/// Snapshot source type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
    /// Factory-data HTTP endpoint
    Http,
    /// Saved JSON response on disk
    File,
}

impl FromStr for SourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "http" | "https" => Ok(Self::Http),
            "file" => Ok(Self::File),
            _ => Err(format!("Unknown source type: {}", s)),
        }
    }
}

/// Factory for creating snapshot sources.
pub struct SourceFactory;

impl SourceFactory {
    /// Create the source named by `settings.source_type`.
    pub fn create(settings: &SourceSettings) -> SourceResult<Arc<dyn SnapshotSource>> {
        let source_type = SourceType::from_str(&settings.source_type)
            .map_err(SourceError::ConfigurationError)?;
        Self::create_typed(source_type, settings)
    }

    pub fn create_typed(
        source_type: SourceType,
        settings: &SourceSettings,
    ) -> SourceResult<Arc<dyn SnapshotSource>> {
        match source_type {
            SourceType::Http => Self::create_http(settings),
            SourceType::File => {
                let path = settings.file_path.as_ref().ok_or_else(|| {
                    SourceError::ConfigurationError(
                        "File source requires 'source.file_path' setting".to_string(),
                    )
                })?;
                Ok(Arc::new(FileSnapshotSource::new(path)))
            }
        }
    }

    #[cfg(feature = "http-source")]
    fn create_http(settings: &SourceSettings) -> SourceResult<Arc<dyn SnapshotSource>> {
        let source = super::HttpSnapshotSource::new(
            &settings.base_url,
            std::time::Duration::from_secs(settings.timeout_secs),
        )?;
        Ok(Arc::new(source))
    }

    #[cfg(not(feature = "http-source"))]
    fn create_http(settings: &SourceSettings) -> SourceResult<Arc<dyn SnapshotSource>> {
        let _ = settings;
        Err(SourceError::ConfigurationError(
            "HTTP source feature not enabled".to_string(),
        ))
    }
}
