//! Service layer for windowing and chart projection.
//!
//! Services are pure functions over snapshots: the aggregator re-windows the
//! raw snapshot, and the metrics and chart services turn a windowed snapshot
//! into the DTOs defined in [`crate::api`].

pub mod aggregator;

pub mod charts;

pub mod metrics;

pub mod scales;

pub mod snapshot_builder;

pub use aggregator::{aggregate, aggregate_with_duration};
pub use charts::{
    occupancy_chart, production_trend_chart, status_chart, waiting_time_chart, ChartLayout,
};
pub use metrics::compute_metrics;
pub use snapshot_builder::{
    build_snapshot, build_windowed_snapshot, occupancy_in_window, status_partition_in_window,
    FactoryRun,
};
