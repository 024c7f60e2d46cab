//! # Factory Dashboard
//!
//! Time-window re-aggregation and chart projection for a factory
//! production-line simulation.
//!
//! The simulation server publishes one full-history snapshot at
//! `/api/factory-data`. This crate fetches it once, trims it to the selected
//! trailing period (day, week, month, quarter, year), recomputes the metrics
//! that depend on the window, and turns the result into chart-ready DTOs for the
//! selected stations.
//!
//! ## Architecture
//!
//! - [`models`]: Snapshot data model, periods, station selection, time helpers
//! - [`services`]: Window aggregation, summary metrics, scales and chart projections
//! - [`api`]: Serializable chart DTOs handed to renderers
//! - [`dashboard`]: Dashboard state, events and view recomputation
//! - [`source`]: Snapshot sources (HTTP, file, in-memory) and their factory
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Example
//!
//! ```
//! use factory_dashboard::models::{ProductionEvent, Snapshot, Station, TimePeriod};
//! use factory_dashboard::services::aggregate;
//!
//! let snapshot = Snapshot {
//!     production_trend: vec![
//!         ProductionEvent::new(0, 1, 5),
//!         ProductionEvent::new(3600, 1, 3),
//!         ProductionEvent::new(7200, 2, 2),
//!     ],
//!     stations: vec![Station::new(1), Station::new(2)],
//!     ..Snapshot::default()
//! };
//!
//! let windowed = aggregate(&snapshot, TimePeriod::Day);
//! assert_eq!(windowed.total_production, 10);
//! ```

pub mod api;

pub mod config;
pub mod dashboard;
pub mod models;

pub mod services;

pub mod source;
