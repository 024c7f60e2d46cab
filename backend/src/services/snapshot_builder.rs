//! Build the endpoint snapshot from a finished factory simulation run.
//!
//! A [`FactoryRun`] holds the raw per-station records a simulation collects.
//! [`build_snapshot`] turns it into the [`Snapshot`] served by the factory-data
//! endpoint. [`build_windowed_snapshot`] measures a trailing period of the run
//! directly from the status histories, which the endpoint snapshot cannot do.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::aggregator::scale_faulty;
use crate::models::{
    secs_to_hours, ProductionEvent, Snapshot, Station, StationId, StationStatus, StatusPartition,
    TimePeriod, TimeWindow, WindowedSnapshot,
};

/// A status transition recorded by a station.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusChange {
    /// Simulation seconds.
    pub timestamp: f64,
    pub status: StationStatus,
}

/// Raw counters and status history of one station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationHistory {
    pub station_id: StationId,
    #[serde(default)]
    pub status_history: Vec<StatusChange>,
    #[serde(default)]
    pub busy_time_secs: f64,
    #[serde(default)]
    pub total_waiting_time_secs: f64,
    #[serde(default)]
    pub num_breakdowns: u32,
}

impl StationHistory {
    pub fn new(station_id: u32) -> Self {
        Self {
            station_id: StationId(station_id),
            status_history: Vec::new(),
            busy_time_secs: 0.0,
            total_waiting_time_secs: 0.0,
            num_breakdowns: 0,
        }
    }

    pub fn record(&mut self, timestamp: f64, status: StationStatus) {
        self.status_history.push(StatusChange { timestamp, status });
    }
}

/// Final state of a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactoryRun {
    pub total_produced: u64,
    pub faulty_products: u64,
    /// Simulated time span in seconds.
    pub horizon_secs: f64,
    pub stations: Vec<StationHistory>,
}

/// Build the endpoint snapshot for `run`.
///
/// Every transition into `Operational` is one production event. Occupancy is
/// busy time over the horizon, waiting time is the mean wait per breakdown,
/// and status partitions are shares of recorded transitions.
pub fn build_snapshot(run: &FactoryRun) -> Snapshot {
    let production_trend = production_events(&run.stations);

    let mut occupancy_rates = BTreeMap::new();
    let mut waiting_times = BTreeMap::new();
    let mut status_partitions = BTreeMap::new();

    for station in &run.stations {
        let occupancy = if run.horizon_secs > 0.0 {
            station.busy_time_secs / run.horizon_secs
        } else {
            0.0
        };
        occupancy_rates.insert(station.station_id, occupancy);

        let waiting = if station.num_breakdowns > 0 {
            secs_to_hours(station.total_waiting_time_secs / station.num_breakdowns as f64)
        } else {
            secs_to_hours(0.0)
        };
        waiting_times.insert(station.station_id, waiting);

        status_partitions.insert(
            station.station_id,
            partition_by_count(&station.status_history),
        );
    }

    info!(
        "Built snapshot: {} stations, {} production events",
        run.stations.len(),
        production_trend.len()
    );

    Snapshot {
        total_production: run.total_produced,
        faulty_products: run.faulty_products,
        production_trend,
        occupancy_rates,
        waiting_times,
        status_partitions,
        stations: run
            .stations
            .iter()
            .map(|s| Station {
                station_id: s.station_id,
            })
            .collect(),
    }
}

/// Build a snapshot of the trailing `period` of `run`, ending at its horizon.
///
/// Production counts the `Operational` transitions inside the window, with a
/// fresh running total, and the faulty count is scaled by the share of events
/// kept. Occupancy comes from [`occupancy_in_window`] and status partitions
/// from [`status_partition_in_window`]. Waiting times stay whole-run means per
/// breakdown, as the history does not record when a wait ends.
pub fn build_windowed_snapshot(run: &FactoryRun, period: TimePeriod) -> WindowedSnapshot {
    let full = build_snapshot(run);
    let window = TimeWindow::ending_at(run.horizon_secs.floor() as i64, period.duration_secs());
    let (start, end) = (window.start as f64, window.end as f64);

    let mut cumulative = 0u64;
    let production_trend: Vec<ProductionEvent> = full
        .production_trend
        .iter()
        .filter(|e| window.contains(e.timestamp))
        .map(|e| {
            cumulative = cumulative.saturating_add(e.production);
            ProductionEvent {
                cumulative_production: cumulative,
                ..e.clone()
            }
        })
        .collect();

    let mut occupancy_rates = BTreeMap::new();
    let mut status_partitions = BTreeMap::new();
    for station in &run.stations {
        let mut history = station.status_history.clone();
        history.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));

        occupancy_rates.insert(station.station_id, occupancy_in_window(&history, start, end));
        status_partitions.insert(
            station.station_id,
            status_partition_in_window(&history, start, end),
        );
    }

    let faulty_products = scale_faulty(
        run.faulty_products,
        production_trend.len(),
        full.production_trend.len(),
    );

    debug!(
        "Windowed run [{}, {}]: {} of {} production events",
        window.start,
        window.end,
        production_trend.len(),
        full.production_trend.len()
    );

    WindowedSnapshot {
        window: Some(window),
        total_production: cumulative,
        faulty_products,
        production_trend,
        occupancy_rates,
        waiting_times: full.waiting_times,
        status_partitions,
        stations: full.stations,
    }
}

fn production_events(stations: &[StationHistory]) -> Vec<ProductionEvent> {
    let mut changes: Vec<(f64, StationId)> = stations
        .iter()
        .flat_map(|station| {
            station
                .status_history
                .iter()
                .filter(|c| c.status == StationStatus::Operational)
                .map(move |c| (c.timestamp, station.station_id))
        })
        .collect();
    // Stable, so ties keep station order.
    changes.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

    let mut cumulative = 0u64;
    changes
        .into_iter()
        .map(|(timestamp, station_id)| {
            cumulative = cumulative.saturating_add(1);
            ProductionEvent {
                timestamp: timestamp.floor() as i64,
                station_id,
                production: 1,
                cumulative_production: cumulative,
            }
        })
        .collect()
}

fn partition_by_count(history: &[StatusChange]) -> StatusPartition {
    let mut partition = StatusPartition::default();
    if history.is_empty() {
        return partition;
    }
    for change in history {
        *partition.get_mut(change.status) += 1.0;
    }
    let total = history.len() as f64;
    for status in StationStatus::ALL {
        *partition.get_mut(status) /= total;
    }
    partition
}

/// Time-weighted status shares over `[start, end]`.
///
/// Each interval between consecutive in-range transitions counts toward the
/// status that was active at its start. Shares are normalized by the full
/// interval, so time before the first or after the last in-range transition
/// is unattributed and the shares may sum to less than 1.
pub fn status_partition_in_window(
    history: &[StatusChange],
    start: f64,
    end: f64,
) -> StatusPartition {
    let mut partition = StatusPartition::default();
    let range = end - start;
    if range <= 0.0 {
        return partition;
    }

    let in_range: Vec<&StatusChange> = history
        .iter()
        .filter(|c| c.timestamp >= start && c.timestamp <= end)
        .collect();

    for pair in in_range.windows(2) {
        *partition.get_mut(pair[0].status) += pair[1].timestamp - pair[0].timestamp;
    }
    for status in StationStatus::ALL {
        *partition.get_mut(status) /= range;
    }
    partition
}

/// Measured occupancy over `[start, end]`.
///
/// Sums the intervals between consecutive in-range transitions whose later
/// transition is into `Operational`, normalized by the full interval.
pub fn occupancy_in_window(history: &[StatusChange], start: f64, end: f64) -> f64 {
    let range = end - start;
    if range <= 0.0 {
        return 0.0;
    }

    let in_range: Vec<&StatusChange> = history
        .iter()
        .filter(|c| c.timestamp >= start && c.timestamp <= end)
        .collect();

    let operational: f64 = in_range
        .windows(2)
        .filter(|pair| pair[1].status == StationStatus::Operational)
        .map(|pair| pair[1].timestamp - pair[0].timestamp)
        .sum();
    operational / range
}
