//! Per-chart projections of a windowed snapshot.
//!
//! Each projection keeps the selected stations only, reshapes the data into
//! plotting tuples and applies the chart's scales so a renderer can draw the
//! result directly. A projection is `None` when no selected station has data.

use std::collections::BTreeMap;

use crate::api::{
    AxisDomain, Bar, BarChart, ChartFrame, Margins, ProductionTrendChart, StatusChart,
    StatusColumn, StatusSegment, Theme, TrendPoint,
};
use crate::models::{
    format_tick, StationId, StationSelection, StationStatus, TimePeriod, WindowedSnapshot,
};
use crate::services::scales::{BandScale, LinearScale};

/// Inner padding between bars, as a fraction of the band step.
pub const BAR_PADDING: f64 = 0.1;

/// Chart sizing and colors shared by all projections.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    /// Measured width of each chart's container.
    pub container_width: f64,
    /// Outer height of each chart.
    pub height: f64,
    pub margin: Margins,
    pub theme: Theme,
    /// Station whose waiting-time bar is drawn in the warning color.
    pub highlight_station: Option<StationId>,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            container_width: 960.0,
            height: 300.0,
            margin: Margins::default(),
            theme: Theme::default(),
            highlight_station: Some(StationId(3)),
        }
    }
}

impl ChartLayout {
    pub fn frame(&self) -> ChartFrame {
        ChartFrame {
            width: (self.container_width - self.margin.left - self.margin.right).max(0.0),
            height: (self.height - self.margin.top - self.margin.bottom).max(0.0),
            margin: self.margin,
        }
    }

    fn status_color(&self, status: StationStatus) -> &str {
        match status {
            StationStatus::Operational => &self.theme.accent,
            StationStatus::Down => &self.theme.warning,
            StationStatus::WaitingForRestock => &self.theme.secondary,
        }
    }
}

/// Entries of a per-station map restricted to the selection, in station order.
fn selected_entries<'a, V>(
    map: &'a BTreeMap<StationId, V>,
    selection: &'a StationSelection,
) -> impl Iterator<Item = (StationId, &'a V)> + 'a {
    map.iter()
        .filter(move |(id, _)| selection.contains(**id))
        .map(|(id, v)| (*id, v))
}

/// Cumulative production line over time.
pub fn production_trend_chart(
    windowed: &WindowedSnapshot,
    selection: &StationSelection,
    period: TimePeriod,
    layout: &ChartLayout,
) -> Option<ProductionTrendChart> {
    let events: Vec<_> = windowed
        .production_trend
        .iter()
        .filter(|e| selection.contains(e.station_id))
        .collect();

    let t_min = events.iter().map(|e| e.timestamp).min()?;
    let t_max = events.iter().map(|e| e.timestamp).max()?;
    let y_max = events
        .iter()
        .map(|e| e.cumulative_production)
        .max()
        .unwrap_or(0);

    let frame = layout.frame();
    let x = LinearScale::new((t_min as f64, t_max as f64), (0.0, frame.width));
    let y = LinearScale::new((0.0, y_max as f64), (frame.height, 0.0));

    let points = events
        .iter()
        .map(|e| TrendPoint {
            timestamp: e.timestamp,
            station_id: e.station_id,
            cumulative_production: e.cumulative_production,
            x: x.apply(e.timestamp as f64),
            y: y.apply(e.cumulative_production as f64),
            tick_label: format_tick(e.timestamp, period),
        })
        .collect();

    Some(ProductionTrendChart {
        frame,
        x_domain: x.axis_domain(),
        y_domain: y.axis_domain(),
        tick_format: period.tick_format().to_string(),
        color: layout.theme.accent.clone(),
        points,
    })
}

/// Build bars for `(station, value)` pairs on a shared y-domain.
fn bar_chart<F, C>(
    values: Vec<(StationId, f64)>,
    y_max: f64,
    layout: &ChartLayout,
    label: F,
    color: C,
) -> Option<BarChart>
where
    F: Fn(f64) -> String,
    C: Fn(StationId) -> String,
{
    if values.is_empty() {
        return None;
    }

    let frame = layout.frame();
    let band = BandScale::new(
        values.iter().map(|(id, _)| *id).collect(),
        frame.width,
        BAR_PADDING,
    );
    let y = LinearScale::new((0.0, y_max), (frame.height, 0.0));

    let bars = values
        .into_iter()
        .map(|(station_id, value)| {
            let top = y.apply(value);
            Bar {
                station_id,
                value,
                label: label(value),
                x: band.position(&station_id).unwrap_or(0.0),
                y: top,
                width: band.bandwidth(),
                height: frame.height - top,
                color: color(station_id),
            }
        })
        .collect();

    Some(BarChart {
        frame,
        y_domain: y.axis_domain(),
        bars,
    })
}

/// Occupancy per station in percent.
///
/// The y-domain is `[0, 100]`, widened when a modeled occupancy exceeds 100%.
pub fn occupancy_chart(
    windowed: &WindowedSnapshot,
    selection: &StationSelection,
    layout: &ChartLayout,
) -> Option<BarChart> {
    let values: Vec<(StationId, f64)> = selected_entries(&windowed.occupancy_rates, selection)
        .map(|(id, rate)| (id, rate * 100.0))
        .collect();
    let y_max = values.iter().map(|(_, v)| *v).fold(100.0, f64::max);
    let color = layout.theme.secondary.clone();

    bar_chart(
        values,
        y_max,
        layout,
        |v| format!("{:.1}%", v),
        |_| color.clone(),
    )
}

/// Mean waiting time per station in hours.
pub fn waiting_time_chart(
    windowed: &WindowedSnapshot,
    selection: &StationSelection,
    layout: &ChartLayout,
) -> Option<BarChart> {
    let values: Vec<(StationId, f64)> = selected_entries(&windowed.waiting_times, selection)
        .map(|(id, hours)| (id, hours.value()))
        .collect();
    let max = values.iter().map(|(_, v)| *v).fold(0.0, f64::max);
    // All-zero waits keep a unit domain so bars sit on the axis.
    let y_max = if max > 0.0 { max } else { 1.0 };

    bar_chart(
        values,
        y_max,
        layout,
        |v| format!("{:.1}h", v),
        |id| {
            if Some(id) == layout.highlight_station {
                layout.theme.warning.clone()
            } else {
                layout.theme.secondary.clone()
            }
        },
    )
}

/// Stacked status fractions per station.
pub fn status_chart(
    windowed: &WindowedSnapshot,
    selection: &StationSelection,
    layout: &ChartLayout,
) -> Option<StatusChart> {
    let partitions: Vec<_> = selected_entries(&windowed.status_partitions, selection).collect();
    if partitions.is_empty() {
        return None;
    }

    let frame = layout.frame();
    let band = BandScale::new(
        partitions.iter().map(|(id, _)| *id).collect(),
        frame.width,
        BAR_PADDING,
    );
    let y = LinearScale::new((0.0, 1.0), (frame.height, 0.0));

    let columns = partitions
        .into_iter()
        .map(|(station_id, partition)| {
            let mut y0 = 0.0;
            let segments = StationStatus::ALL
                .iter()
                .map(|&status| {
                    let y1 = y0 + partition.get(status);
                    let segment = StatusSegment {
                        status,
                        y0,
                        y1,
                        y: y.apply(y1),
                        height: y.apply(y0) - y.apply(y1),
                        color: layout.status_color(status).to_string(),
                    };
                    y0 = y1;
                    segment
                })
                .collect();

            StatusColumn {
                station_id,
                x: band.position(&station_id).unwrap_or(0.0),
                width: band.bandwidth(),
                segments,
            }
        })
        .collect();

    Some(StatusChart {
        frame,
        y_domain: AxisDomain { min: 0.0, max: 1.0 },
        columns,
    })
}

#[cfg(test)]
#[path = "charts_tests.rs"]
mod charts_tests;
