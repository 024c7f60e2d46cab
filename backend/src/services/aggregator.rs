//! Time-window re-aggregation of a factory snapshot.
//!
//! The aggregator trims the production trend to a trailing window ending at the
//! latest recorded event and recomputes the metrics that depend on it:
//! cumulative production, per-station occupancy and the faulty-product count.
//! Waiting times and status partitions are carried over from the full history,
//! since the snapshot does not include the per-station status records needed to
//! re-window them.

use log::{debug, warn};
use std::collections::BTreeMap;

use crate::models::{
    ProductionEvent, Snapshot, StationId, TimePeriod, TimeWindow, WindowedSnapshot, HOUR_SECS,
};

/// Busy time credited to a station for each recorded event.
pub const BUSY_SECS_PER_EVENT: i64 = HOUR_SECS;

/// Re-aggregate `snapshot` over the trailing window named by `period`.
pub fn aggregate(snapshot: &Snapshot, period: TimePeriod) -> WindowedSnapshot {
    aggregate_with_duration(snapshot, period.duration_secs())
}

/// Re-aggregate `snapshot` over a trailing window of `duration_secs`.
///
/// Returns the snapshot unchanged (with no window) when it has no trend data.
pub fn aggregate_with_duration(snapshot: &Snapshot, duration_secs: i64) -> WindowedSnapshot {
    let Some(latest) = snapshot.latest_timestamp() else {
        warn!("No production trend data available; passing snapshot through unchanged");
        return WindowedSnapshot::unwindowed(snapshot);
    };

    let window = TimeWindow::ending_at(latest, duration_secs);
    let production_trend = cumulative_trend(&snapshot.production_trend, window.start);
    let total_production = production_trend
        .last()
        .map(|e| e.cumulative_production)
        .unwrap_or(0);

    let events_per_station = count_by_station(&production_trend);

    let mut occupancy_rates = BTreeMap::new();
    let mut waiting_times = BTreeMap::new();
    let mut status_partitions = BTreeMap::new();

    for station_id in snapshot.station_ids() {
        let events = events_per_station.get(&station_id).copied().unwrap_or(0);
        occupancy_rates.insert(station_id, occupancy_rate(events, duration_secs));
        waiting_times.insert(
            station_id,
            snapshot
                .waiting_times
                .get(&station_id)
                .copied()
                .unwrap_or(qtty::Hours::new(0.0)),
        );
        status_partitions.insert(
            station_id,
            snapshot
                .status_partitions
                .get(&station_id)
                .copied()
                .unwrap_or_default(),
        );
    }

    let faulty_products = scale_faulty(
        snapshot.faulty_products,
        production_trend.len(),
        snapshot.production_trend.len(),
    );

    debug!(
        "Aggregated window [{}, {}]: kept {} of {} events, total_production={}",
        window.start,
        window.end,
        production_trend.len(),
        snapshot.production_trend.len(),
        total_production
    );

    WindowedSnapshot {
        window: Some(window),
        total_production,
        faulty_products,
        production_trend,
        occupancy_rates,
        waiting_times,
        status_partitions,
        stations: snapshot.stations.clone(),
    }
}

/// Events at or after `start`, in original order, with a fresh running total.
/// The total saturates at `u64::MAX`.
fn cumulative_trend(events: &[ProductionEvent], start: i64) -> Vec<ProductionEvent> {
    let mut cumulative = 0u64;
    events
        .iter()
        .filter(|e| e.timestamp >= start)
        .map(|e| {
            cumulative = cumulative.saturating_add(e.production);
            ProductionEvent {
                cumulative_production: cumulative,
                ..e.clone()
            }
        })
        .collect()
}

fn count_by_station(events: &[ProductionEvent]) -> BTreeMap<StationId, usize> {
    let mut counts = BTreeMap::new();
    for event in events {
        *counts.entry(event.station_id).or_insert(0) += 1;
    }
    counts
}

/// Modeled busy fraction of the window. Not clamped: dense event data can
/// exceed 1.0.
pub(crate) fn occupancy_rate(event_count: usize, duration_secs: i64) -> f64 {
    if duration_secs <= 0 {
        return 0.0;
    }
    let busy_secs = i64::try_from(event_count)
        .unwrap_or(i64::MAX)
        .saturating_mul(BUSY_SECS_PER_EVENT);
    busy_secs as f64 / duration_secs as f64
}

/// Scale the faulty count by the fraction of events kept in the window.
pub(crate) fn scale_faulty(faulty: u64, kept: usize, original: usize) -> u64 {
    if original == 0 {
        return 0;
    }
    (faulty as f64 * (kept as f64 / original as f64)).round() as u64
}

#[cfg(test)]
#[path = "aggregator_tests.rs"]
mod aggregator_tests;
