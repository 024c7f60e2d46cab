//! Dashboard state machine.
//!
//! [`DashboardState`] holds the immutable snapshot as loaded plus the current
//! control values. Every [`DashboardEvent`] goes through
//! [`DashboardState::update`]; [`DashboardState::view`] re-windows the original
//! snapshot and rebuilds all charts, so no view ever derives from a previous one.

use log::{debug, info};

use crate::api::DashboardView;
use crate::config::DashboardConfig;
use crate::models::{Snapshot, StationId, StationSelection, TimePeriod};
use crate::services::{
    aggregate, compute_metrics, occupancy_chart, production_trend_chart, status_chart,
    waiting_time_chart, ChartLayout,
};
use crate::source::FetchedSnapshot;

/// User and lifecycle events the dashboard reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    /// The one-shot fetch completed.
    SnapshotLoaded {
        snapshot: Snapshot,
        checksum: Option<String>,
    },
    PeriodSelected(TimePeriod),
    StationToggled {
        station_id: StationId,
        enabled: bool,
    },
    /// The chart container was measured at a new width.
    Resized { container_width: f64 },
}

impl From<FetchedSnapshot> for DashboardEvent {
    fn from(fetched: FetchedSnapshot) -> Self {
        DashboardEvent::SnapshotLoaded {
            snapshot: fetched.snapshot,
            checksum: Some(fetched.checksum),
        }
    }
}

/// Current dashboard model.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    snapshot: Option<Snapshot>,
    checksum: Option<String>,
    period: TimePeriod,
    selection: StationSelection,
    layout: ChartLayout,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::from_config(&DashboardConfig::default())
    }
}

impl DashboardState {
    pub fn new(period: TimePeriod, selection: StationSelection, layout: ChartLayout) -> Self {
        Self {
            snapshot: None,
            checksum: None,
            period,
            selection,
            layout,
        }
    }

    /// Unloaded state with the configured initial controls.
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(
            config.dashboard.period,
            config.station_selection(),
            config.chart_layout(),
        )
    }

    /// Apply one event.
    pub fn update(&mut self, event: DashboardEvent) {
        match event {
            DashboardEvent::SnapshotLoaded { snapshot, checksum } => {
                info!(
                    "Snapshot loaded: {} events, {} stations",
                    snapshot.production_trend.len(),
                    snapshot.stations.len()
                );
                self.snapshot = Some(snapshot);
                self.checksum = checksum;
            }
            DashboardEvent::PeriodSelected(period) => {
                debug!("Period selected: {}", period);
                self.period = period;
            }
            DashboardEvent::StationToggled {
                station_id,
                enabled,
            } => {
                debug!("Station {} toggled: {}", station_id, enabled);
                self.selection.set(station_id, enabled);
            }
            DashboardEvent::Resized { container_width } => {
                self.layout.container_width = container_width;
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    pub fn checksum(&self) -> Option<&str> {
        self.checksum.as_deref()
    }

    pub fn period(&self) -> TimePeriod {
        self.period
    }

    pub fn selection(&self) -> &StationSelection {
        &self.selection
    }

    pub fn layout(&self) -> &ChartLayout {
        &self.layout
    }

    /// Everything to draw for the current controls, or `None` before load.
    pub fn view(&self) -> Option<DashboardView> {
        let snapshot = self.snapshot.as_ref()?;
        Some(build_view(
            snapshot,
            self.checksum.clone(),
            self.period,
            &self.selection,
            &self.layout,
        ))
    }
}

/// Window `snapshot` to `period` and project every chart.
pub fn build_view(
    snapshot: &Snapshot,
    checksum: Option<String>,
    period: TimePeriod,
    selection: &StationSelection,
    layout: &ChartLayout,
) -> DashboardView {
    let windowed = aggregate(snapshot, period);

    DashboardView {
        period,
        window: windowed.window,
        selected_stations: selection.clone(),
        snapshot_checksum: checksum,
        metrics: compute_metrics(&windowed),
        production_trend: production_trend_chart(&windowed, selection, period, layout),
        occupancy: occupancy_chart(&windowed, selection, layout),
        waiting_time: waiting_time_chart(&windowed, selection, layout),
        status: status_chart(&windowed, selection, layout),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProductionEvent, Station};

    fn create_test_snapshot() -> Snapshot {
        Snapshot {
            faulty_products: 100,
            production_trend: vec![
                ProductionEvent::new(0, 1, 5),
                ProductionEvent::new(3_600, 1, 3),
                ProductionEvent::new(7_200, 2, 2),
            ],
            stations: vec![Station::new(1), Station::new(2)],
            ..Snapshot::default()
        }
    }

    fn loaded_state() -> DashboardState {
        let mut state = DashboardState::default();
        state.update(DashboardEvent::SnapshotLoaded {
            snapshot: create_test_snapshot(),
            checksum: Some("abc".to_string()),
        });
        state
    }

    #[test]
    fn test_no_view_before_load() {
        let state = DashboardState::default();
        assert!(!state.is_loaded());
        assert!(state.view().is_none());
    }

    #[test]
    fn test_view_after_load() {
        let view = loaded_state().view().unwrap();
        assert_eq!(view.period, TimePeriod::Day);
        assert_eq!(view.snapshot_checksum.as_deref(), Some("abc"));
        assert_eq!(view.metrics.total_production, 10);
        assert_eq!(view.metrics.faulty_products, 100);
        assert_eq!(view.production_trend.unwrap().points.len(), 3);
    }

    #[test]
    fn test_period_change_recomputes_from_original() {
        let mut state = loaded_state();
        state.update(DashboardEvent::PeriodSelected(TimePeriod::Year));
        state.update(DashboardEvent::PeriodSelected(TimePeriod::Day));

        assert_eq!(state.snapshot(), Some(&create_test_snapshot()));
        let view = state.view().unwrap();
        assert_eq!(view.metrics.total_production, 10);
        assert_eq!(view.window.unwrap().duration_secs, 86_400);
    }

    #[test]
    fn test_toggle_filters_charts_not_metrics() {
        let mut state = loaded_state();
        state.update(DashboardEvent::StationToggled {
            station_id: StationId(1),
            enabled: false,
        });

        let view = state.view().unwrap();
        assert!(!view.selected_stations.contains(StationId(1)));
        assert_eq!(view.metrics.total_production, 10);
        let trend = view.production_trend.unwrap();
        assert!(trend.points.iter().all(|p| p.station_id == StationId(2)));
        let occupancy = view.occupancy.unwrap();
        assert_eq!(occupancy.bars.len(), 1);
    }

    #[test]
    fn test_deselect_all_hides_charts() {
        let mut state = loaded_state();
        for id in 1..=6 {
            state.update(DashboardEvent::StationToggled {
                station_id: StationId(id),
                enabled: false,
            });
        }
        let view = state.view().unwrap();
        assert!(view.production_trend.is_none());
        assert!(view.occupancy.is_none());
        assert!(view.status.is_none());
    }

    #[test]
    fn test_resize_changes_frame() {
        let mut state = loaded_state();
        state.update(DashboardEvent::Resized {
            container_width: 470.0,
        });
        let view = state.view().unwrap();
        assert_eq!(view.occupancy.unwrap().frame.width, 400.0);
    }

    #[test]
    fn test_from_fetched_snapshot() {
        let event: DashboardEvent = FetchedSnapshot {
            snapshot: Snapshot::default(),
            checksum: "ff".to_string(),
        }
        .into();
        let mut state = DashboardState::default();
        state.update(event);
        assert_eq!(state.checksum(), Some("ff"));

        // Empty snapshots pass through without a window.
        let view = state.view().unwrap();
        assert!(view.window.is_none());
        assert!(view.production_trend.is_none());
    }
}
