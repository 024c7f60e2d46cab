use factory_dashboard::models::{
    Snapshot, StationId, StationSelection, StationStatus, TimePeriod, HOUR_SECS,
};
use factory_dashboard::services::snapshot_builder::StationHistory;
use factory_dashboard::services::{
    aggregate, build_snapshot, build_windowed_snapshot, compute_metrics, status_partition_in_window,
    status_chart, ChartLayout, FactoryRun,
};

fn create_test_run() -> FactoryRun {
    let stations = (1..=3)
        .map(|id| {
            let mut station = StationHistory::new(id);
            // One production start per hour for 48 hours; station 3 is down during hour 10.
            for hour in 0..48 {
                if id == 3 && hour == 10 {
                    continue;
                }
                station.record((hour * HOUR_SECS) as f64 + 0.5, StationStatus::Operational);
            }
            if id == 3 {
                station.record(10.0 * HOUR_SECS as f64, StationStatus::Down);
                station.num_breakdowns = 1;
                station.total_waiting_time_secs = 1_800.0;
            }
            station.busy_time_secs = 24.0 * HOUR_SECS as f64;
            station
        })
        .collect();

    FactoryRun {
        total_produced: 144,
        faulty_products: 8,
        horizon_secs: 48.0 * HOUR_SECS as f64,
        stations,
    }
}

#[test]
fn test_built_snapshot_survives_endpoint_round_trip() {
    let snapshot = build_snapshot(&create_test_run());
    let body = serde_json::to_string(&snapshot).unwrap();
    let parsed = Snapshot::from_json_str(&body).unwrap();
    assert_eq!(parsed, snapshot);
}

#[test]
fn test_built_snapshot_windows_to_last_day() {
    let snapshot = build_snapshot(&create_test_run());
    assert_eq!(snapshot.production_trend.len(), 143);
    assert_eq!(snapshot.latest_timestamp(), Some(47 * HOUR_SECS));

    let windowed = aggregate(&snapshot, TimePeriod::Day);
    // Hours 23..=47 fall in [47h - 24h, 47h].
    assert_eq!(windowed.production_trend.len(), 75);
    assert_eq!(windowed.total_production, 75);
    assert_eq!(windowed.faulty_products, 4);

    let occupancy = windowed.occupancy_rates[&StationId(1)];
    assert!((occupancy - 25.0 / 24.0).abs() < 1e-12);
    assert_eq!(windowed.waiting_times[&StationId(3)].value(), 0.5);
}

#[test]
fn test_window_partition_from_raw_history() {
    let run = create_test_run();
    let station = &run.stations[2];
    assert_eq!(station.station_id, StationId(3));

    let mut history = station.status_history.clone();
    history.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));

    let start = 9.0 * HOUR_SECS as f64;
    let end = 12.0 * HOUR_SECS as f64;
    let partition = status_partition_in_window(&history, start, end);
    // Operational 9h..10h, Down 10h..11h; the 11h restart has no successor in range.
    assert!(partition.down > 0.33 && partition.down < 0.34);
    assert!(partition.total() <= 1.0);
}

#[test]
fn test_windowed_run_drops_earlier_breakdown() {
    let run = create_test_run();
    let windowed = build_windowed_snapshot(&run, TimePeriod::Day);

    // Hours 24..=47 for each of the three stations.
    assert_eq!(windowed.production_trend.len(), 72);
    assert_eq!(windowed.total_production, 72);
    assert_eq!(windowed.faulty_products, 4);

    for id in 1..=3 {
        let occupancy = windowed.occupancy_rates[&StationId(id)];
        assert!((occupancy - 23.0 / 24.0).abs() < 1e-9);
    }
    // The hour-10 breakdown is outside the last day.
    assert_eq!(windowed.status_partitions[&StationId(3)].down, 0.0);
    assert_eq!(windowed.waiting_times[&StationId(3)].value(), 0.5);

    let metrics = compute_metrics(&windowed);
    assert_eq!(metrics.production_rate_per_hour, Some(3.0));
    let selection: StationSelection = (1..=3).map(StationId).collect();
    let chart = status_chart(&windowed, &selection, &ChartLayout::default()).unwrap();
    assert_eq!(chart.columns.len(), 3);
}
