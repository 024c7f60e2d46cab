//! Public API surface for the dashboard.
//!
//! This file consolidates the chart DTO types handed to renderers.
//! All types derive Serialize/Deserialize for JSON serialization.

pub use crate::models::{
    ProductionEvent, Snapshot, Station, StationId, StationSelection, StationStatus,
    StatusPartition, TimePeriod, TimeWindow, WindowedSnapshot,
};

use serde::{Deserialize, Serialize};

// =========================================================
// Layout
// =========================================================

/// Outer margins around a chart's plotting area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 20.0,
            bottom: 30.0,
            left: 50.0,
        }
    }
}

/// Dashboard color palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub background: String,
    pub text: String,
    pub accent: String,
    pub secondary: String,
    pub card: String,
    pub border: String,
    pub warning: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: "#1a1a1a".to_string(),
            text: "#ffffff".to_string(),
            accent: "#00ff9d".to_string(),
            secondary: "#00b8ff".to_string(),
            card: "#2d2d2d".to_string(),
            border: "#404040".to_string(),
            warning: "#ff4d4d".to_string(),
        }
    }
}

/// Drawing area for one chart. `width`/`height` exclude the margins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartFrame {
    pub width: f64,
    pub height: f64,
    pub margin: Margins,
}

impl ChartFrame {
    pub fn outer_width(&self) -> f64 {
        self.width + self.margin.left + self.margin.right
    }

    pub fn outer_height(&self) -> f64 {
        self.height + self.margin.top + self.margin.bottom
    }
}

/// Closed numeric interval covered by an axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisDomain {
    pub min: f64,
    pub max: f64,
}

// =========================================================
// Summary metrics
// =========================================================

/// Headline numbers shown above the charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_production: u64,
    pub faulty_products: u64,
    pub faulty_rate_percent: f64,
    /// `faulty_rate_percent` with two decimals and a `%` suffix.
    pub faulty_rate_label: String,
    /// Units per hour over the window; absent for unwindowed snapshots.
    pub production_rate_per_hour: Option<f64>,
}

// =========================================================
// Production trend
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub timestamp: i64,
    pub station_id: StationId,
    pub cumulative_production: u64,
    pub x: f64,
    pub y: f64,
    pub tick_label: String,
}

/// Cumulative production line for the selected stations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionTrendChart {
    pub frame: ChartFrame,
    pub x_domain: AxisDomain,
    pub y_domain: AxisDomain,
    /// strftime pattern for the x-axis ticks.
    pub tick_format: String,
    pub color: String,
    pub points: Vec<TrendPoint>,
}

// =========================================================
// Bar charts (occupancy, waiting time)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub station_id: StationId,
    pub value: f64,
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChart {
    pub frame: ChartFrame,
    pub y_domain: AxisDomain,
    pub bars: Vec<Bar>,
}

// =========================================================
// Status partition
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSegment {
    pub status: StationStatus,
    /// Stack bounds as fractions of total time.
    pub y0: f64,
    pub y1: f64,
    pub y: f64,
    pub height: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusColumn {
    pub station_id: StationId,
    pub x: f64,
    pub width: f64,
    pub segments: Vec<StatusSegment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusChart {
    pub frame: ChartFrame,
    pub y_domain: AxisDomain,
    pub columns: Vec<StatusColumn>,
}

// =========================================================
// Dashboard view
// =========================================================

/// Everything a renderer needs for one redraw.
///
/// A chart is `None` when none of the selected stations has data for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub period: TimePeriod,
    pub window: Option<TimeWindow>,
    pub selected_stations: StationSelection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_checksum: Option<String>,
    pub metrics: MetricsSummary,
    pub production_trend: Option<ProductionTrendChart>,
    pub occupancy: Option<BarChart>,
    pub waiting_time: Option<BarChart>,
    pub status: Option<StatusChart>,
}
