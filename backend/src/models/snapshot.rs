use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Station identifier as reported by the simulation.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct StationId(pub u32);

impl StationId {
    pub fn new(value: u32) -> Self {
        StationId(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for StationId {
    fn from(v: u32) -> Self {
        StationId(v)
    }
}

/// A factory work cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    pub station_id: StationId,
}

impl Station {
    pub fn new(station_id: u32) -> Self {
        Self {
            station_id: StationId(station_id),
        }
    }
}

/// Operating state of a station.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StationStatus {
    #[serde(rename = "Operational")]
    Operational,
    #[serde(rename = "Down")]
    Down,
    #[serde(rename = "Waiting for restock")]
    WaitingForRestock,
}

impl StationStatus {
    /// Stacking order used by the status chart.
    pub const ALL: [StationStatus; 3] = [
        StationStatus::Operational,
        StationStatus::Down,
        StationStatus::WaitingForRestock,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StationStatus::Operational => "Operational",
            StationStatus::Down => "Down",
            StationStatus::WaitingForRestock => "Waiting for restock",
        }
    }
}

impl fmt::Display for StationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fraction of time a station spent in each status.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StatusPartition {
    #[serde(rename = "Operational", default)]
    pub operational: f64,
    #[serde(rename = "Down", default)]
    pub down: f64,
    #[serde(rename = "Waiting for restock", default)]
    pub waiting_for_restock: f64,
}

impl StatusPartition {
    pub fn new(operational: f64, down: f64, waiting_for_restock: f64) -> Self {
        Self {
            operational,
            down,
            waiting_for_restock,
        }
    }

    pub fn get(&self, status: StationStatus) -> f64 {
        match status {
            StationStatus::Operational => self.operational,
            StationStatus::Down => self.down,
            StationStatus::WaitingForRestock => self.waiting_for_restock,
        }
    }

    pub fn get_mut(&mut self, status: StationStatus) -> &mut f64 {
        match status {
            StationStatus::Operational => &mut self.operational,
            StationStatus::Down => &mut self.down,
            StationStatus::WaitingForRestock => &mut self.waiting_for_restock,
        }
    }

    pub fn total(&self) -> f64 {
        self.operational + self.down + self.waiting_for_restock
    }
}

/// One production record on the trend series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionEvent {
    /// Seconds since the simulation epoch. Fractional inputs are floored.
    #[serde(deserialize_with = "deserialize_whole_seconds")]
    pub timestamp: i64,
    pub station_id: StationId,
    pub production: u64,
    /// Running total; recomputed whenever a window is applied.
    #[serde(default)]
    pub cumulative_production: u64,
}

impl ProductionEvent {
    pub fn new(timestamp: i64, station_id: u32, production: u64) -> Self {
        Self {
            timestamp,
            station_id: StationId(station_id),
            production,
            cumulative_production: 0,
        }
    }
}

/// Full-history dataset served by the factory-data endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub total_production: u64,
    #[serde(default)]
    pub faulty_products: u64,
    #[serde(default)]
    pub production_trend: Vec<ProductionEvent>,
    #[serde(default)]
    pub occupancy_rates: BTreeMap<StationId, f64>,
    #[serde(default)]
    pub waiting_times: BTreeMap<StationId, qtty::Hours>,
    #[serde(default)]
    pub status_partitions: BTreeMap<StationId, StatusPartition>,
    #[serde(default)]
    pub stations: Vec<Station>,
}

impl Snapshot {
    /// Parse a snapshot from the endpoint's JSON body.
    pub fn from_json_str(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    /// Latest recorded timestamp, if any events exist.
    pub fn latest_timestamp(&self) -> Option<i64> {
        self.production_trend.iter().map(|e| e.timestamp).max()
    }

    pub fn station_ids(&self) -> impl Iterator<Item = StationId> + '_ {
        self.stations.iter().map(|s| s.station_id)
    }
}

/// Trailing slice of the event history that a windowed snapshot covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: i64,
    pub end: i64,
    pub duration_secs: i64,
}

impl TimeWindow {
    /// Window of `duration_secs` ending at `latest`.
    pub fn ending_at(latest: i64, duration_secs: i64) -> Self {
        Self {
            start: latest.saturating_sub(duration_secs),
            end: latest,
            duration_secs,
        }
    }

    pub fn contains(&self, timestamp: i64) -> bool {
        timestamp >= self.start && timestamp <= self.end
    }

    pub fn duration_hours(&self) -> f64 {
        self.duration_secs as f64 / 3600.0
    }
}

/// Snapshot scoped to a time window.
///
/// `window` is `None` when the source snapshot had no trend data and was passed
/// through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowedSnapshot {
    pub window: Option<TimeWindow>,
    pub total_production: u64,
    pub faulty_products: u64,
    pub production_trend: Vec<ProductionEvent>,
    pub occupancy_rates: BTreeMap<StationId, f64>,
    pub waiting_times: BTreeMap<StationId, qtty::Hours>,
    pub status_partitions: BTreeMap<StationId, StatusPartition>,
    pub stations: Vec<Station>,
}

impl WindowedSnapshot {
    /// Carry a snapshot over without applying any window.
    pub fn unwindowed(snapshot: &Snapshot) -> Self {
        Self {
            window: None,
            total_production: snapshot.total_production,
            faulty_products: snapshot.faulty_products,
            production_trend: snapshot.production_trend.clone(),
            occupancy_rates: snapshot.occupancy_rates.clone(),
            waiting_times: snapshot.waiting_times.clone(),
            status_partitions: snapshot.status_partitions.clone(),
            stations: snapshot.stations.clone(),
        }
    }

    pub fn is_windowed(&self) -> bool {
        self.window.is_some()
    }
}

fn deserialize_whole_seconds<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Seconds {
        Whole(i64),
        Fractional(f64),
    }

    match Seconds::deserialize(deserializer)? {
        Seconds::Whole(v) => Ok(v),
        Seconds::Fractional(v) if v.is_finite() => Ok(v.floor() as i64),
        Seconds::Fractional(v) => Err(serde::de::Error::custom(format!(
            "timestamp must be finite, got {}",
            v
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_id_display() {
        assert_eq!(StationId::new(4).to_string(), "4");
    }

    #[test]
    fn test_parse_endpoint_payload() {
        let body = r#"{
            "total_production": 3,
            "faulty_products": 1,
            "production_trend": [
                {"timestamp": 0, "production": 1, "cumulative_production": 1, "station_id": 1},
                {"timestamp": 3600.75, "production": 1, "cumulative_production": 2, "station_id": 2}
            ],
            "occupancy_rates": {"1": 0.5, "2": 0.25},
            "waiting_times": {"1": 0, "2": 1.5},
            "status_partitions": {
                "1": {"Operational": 0.8, "Down": 0.1, "Waiting for restock": 0.1}
            },
            "stations": [{"station_id": 1}, {"station_id": 2}]
        }"#;

        let snapshot = Snapshot::from_json_str(body).unwrap();
        assert_eq!(snapshot.production_trend.len(), 2);
        assert_eq!(snapshot.production_trend[1].timestamp, 3600);
        assert_eq!(snapshot.occupancy_rates[&StationId(2)], 0.25);
        assert_eq!(snapshot.waiting_times[&StationId(2)].value(), 1.5);
        assert_eq!(snapshot.status_partitions[&StationId(1)].down, 0.1);
        assert_eq!(snapshot.latest_timestamp(), Some(3600));
    }

    #[test]
    fn test_missing_fields_default() {
        let snapshot = Snapshot::from_json_str(r#"{"stations": [{"station_id": 7}]}"#).unwrap();
        assert!(snapshot.production_trend.is_empty());
        assert_eq!(snapshot.faulty_products, 0);
        assert_eq!(snapshot.station_ids().collect::<Vec<_>>(), vec![StationId(7)]);
        assert_eq!(snapshot.latest_timestamp(), None);
    }

    #[test]
    fn test_non_numeric_timestamp_rejected() {
        let result: Result<ProductionEvent, _> =
            serde_json::from_str(r#"{"timestamp": "soon", "station_id": 1, "production": 1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_status_partition_serializes_labels() {
        let partition = StatusPartition::new(0.5, 0.25, 0.25);
        let json = serde_json::to_value(partition).unwrap();
        assert_eq!(json["Waiting for restock"], 0.25);
        assert_eq!(partition.total(), 1.0);
    }

    #[test]
    fn test_partial_status_partition_defaults_to_zero() {
        let partition: StatusPartition = serde_json::from_str(r#"{"Down": 1.0}"#).unwrap();
        assert_eq!(partition.operational, 0.0);
        assert_eq!(partition.get(StationStatus::Down), 1.0);
    }

    #[test]
    fn test_time_window_bounds() {
        let window = TimeWindow::ending_at(7200, 3000);
        assert_eq!(window.start, 4200);
        assert!(window.contains(7200));
        assert!(window.contains(4200));
        assert!(!window.contains(3600));
    }

    #[test]
    fn test_time_window_start_saturates() {
        let window = TimeWindow::ending_at(i64::MIN + 10, 86_400);
        assert_eq!(window.start, i64::MIN);
        assert!(window.contains(i64::MIN));
    }

    #[test]
    fn test_unwindowed_carries_fields() {
        let mut snapshot = Snapshot::default();
        snapshot.total_production = 42;
        snapshot.occupancy_rates.insert(StationId(1), 0.3);
        let windowed = WindowedSnapshot::unwindowed(&snapshot);
        assert!(!windowed.is_windowed());
        assert_eq!(windowed.total_production, 42);
        assert_eq!(windowed.occupancy_rates[&StationId(1)], 0.3);
    }
}
