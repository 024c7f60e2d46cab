//! Dashboard configuration file support.
//!
//! Settings are read from `dashboard.toml` (searched in the standard
//! locations) and then overridden by environment variables:
//!
//! - `DASHBOARD_SOURCE`: source type (`http` or `file`)
//! - `DASHBOARD_URL`: base URL of the factory-data server
//! - `DASHBOARD_FILE`: snapshot file for the `file` source
//! - `DASHBOARD_PERIOD`: initial period (`day` .. `year`)
//! - `DASHBOARD_STATIONS`: comma-separated station ids to show
//! - `DASHBOARD_TIMEOUT_SECS`: HTTP request timeout
//!
//! Every section and key is optional.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::{Margins, Theme};
use crate::models::{StationId, StationSelection, TimePeriod};
use crate::services::ChartLayout;

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("No dashboard.toml found in standard locations")]
    NotFound,
}

/// Dashboard configuration from file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub source: SourceSettings,
    #[serde(default)]
    pub dashboard: DashboardSettings,
    #[serde(default)]
    pub layout: LayoutSettings,
    #[serde(default)]
    pub theme: Theme,
}

/// Where the snapshot comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSettings {
    #[serde(rename = "type", default = "default_source_type")]
    pub source_type: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub file_path: Option<PathBuf>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            source_type: default_source_type(),
            base_url: default_base_url(),
            file_path: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Initial control state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSettings {
    #[serde(default)]
    pub period: TimePeriod,
    /// Station toggles offered by the dashboard, all initially checked.
    #[serde(default = "default_stations")]
    pub stations: Vec<u32>,
    #[serde(default = "default_highlight_station")]
    pub highlight_station: Option<u32>,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            period: TimePeriod::default(),
            stations: default_stations(),
            highlight_station: default_highlight_station(),
        }
    }
}

/// Chart sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSettings {
    #[serde(default = "default_container_width")]
    pub container_width: f64,
    #[serde(default = "default_chart_height")]
    pub height: f64,
    #[serde(default)]
    pub margin: Margins,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            container_width: default_container_width(),
            height: default_chart_height(),
            margin: Margins::default(),
        }
    }
}

fn default_source_type() -> String {
    "http".to_string()
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_stations() -> Vec<u32> {
    (1..=6).collect()
}

fn default_highlight_station() -> Option<u32> {
    Some(3)
}

fn default_container_width() -> f64 {
    960.0
}

fn default_chart_height() -> f64 {
    300.0
}

impl DashboardConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::ReadError(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `dashboard.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> Result<Self, ConfigError> {
        let search_paths = [
            PathBuf::from("dashboard.toml"),
            PathBuf::from("backend/dashboard.toml"),
            PathBuf::from("../dashboard.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                log::info!("Using configuration from {}", path.display());
                return Self::from_file(&path);
            }
        }

        Err(ConfigError::NotFound)
    }

    /// Default-location file (or built-in defaults when absent) plus
    /// environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::from_default_location() {
            Ok(config) => config,
            Err(ConfigError::NotFound) => {
                log::info!("No dashboard.toml found; using built-in defaults");
                Self::default()
            }
            Err(e) => return Err(e),
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply `DASHBOARD_*` environment variables on top of the file settings.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("DASHBOARD_SOURCE") {
            self.source.source_type = value;
        }
        if let Some(value) = lookup("DASHBOARD_URL") {
            self.source.base_url = value;
        }
        if let Some(value) = lookup("DASHBOARD_FILE") {
            self.source.file_path = Some(PathBuf::from(value));
        }
        if let Some(value) = lookup("DASHBOARD_PERIOD") {
            self.dashboard.period = value.parse().map_err(|e: crate::models::ParsePeriodError| {
                ConfigError::InvalidValue {
                    key: "DASHBOARD_PERIOD".to_string(),
                    message: e.to_string(),
                }
            })?;
        }
        if let Some(value) = lookup("DASHBOARD_STATIONS") {
            self.dashboard.stations = parse_station_list(&value)?;
        }
        if let Some(value) = lookup("DASHBOARD_TIMEOUT_SECS") {
            self.source.timeout_secs =
                value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue {
                        key: "DASHBOARD_TIMEOUT_SECS".to_string(),
                        message: format!("expected whole seconds, got '{}'", value),
                    })?;
        }
        Ok(())
    }

    /// Initially checked station toggles.
    pub fn station_selection(&self) -> StationSelection {
        self.dashboard.stations.iter().copied().map(StationId).collect()
    }

    /// Chart layout built from the `[layout]` and `[theme]` sections.
    pub fn chart_layout(&self) -> ChartLayout {
        ChartLayout {
            container_width: self.layout.container_width,
            height: self.layout.height,
            margin: self.layout.margin,
            theme: self.theme.clone(),
            highlight_station: self.dashboard.highlight_station.map(StationId),
        }
    }
}

/// Parse a comma-separated station id list such as `"1, 2,5"`.
///
/// Duplicates are dropped, empty entries are ignored.
pub fn parse_station_list(value: &str) -> Result<Vec<u32>, ConfigError> {
    let mut ids = Vec::new();
    for part in value.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let id: u32 = part.parse().map_err(|_| ConfigError::InvalidValue {
            key: "DASHBOARD_STATIONS".to_string(),
            message: format!("'{}' is not a station id", part),
        })?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}
