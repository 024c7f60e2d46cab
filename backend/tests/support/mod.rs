#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Write;
use std::sync::Mutex;

use tempfile::NamedTempFile;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Every variable the dashboard configuration reads.
pub const DASHBOARD_VARS: [&str; 6] = [
    "DASHBOARD_SOURCE",
    "DASHBOARD_URL",
    "DASHBOARD_FILE",
    "DASHBOARD_PERIOD",
    "DASHBOARD_STATIONS",
    "DASHBOARD_TIMEOUT_SECS",
];

/// Runs `f` with exactly the given `DASHBOARD_*` variables set.
///
/// All other dashboard variables are cleared for the duration of `f`. Access is
/// serialized because the environment is process-global, and the previous
/// values are restored on unwind.
pub fn with_dashboard_env<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(vars);
    f()
}

struct ScopedEnv {
    saved: HashMap<&'static str, Option<String>>,
}

impl ScopedEnv {
    fn new(vars: &[(&str, &str)]) -> Self {
        let saved = DASHBOARD_VARS
            .iter()
            .map(|&k| (k, std::env::var(k).ok()))
            .collect();

        for k in DASHBOARD_VARS {
            std::env::remove_var(k);
        }
        for (k, v) in vars {
            std::env::set_var(k, v);
        }

        Self { saved }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.saved.drain() {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }
    }
}

/// Factory-data response with three stations over two hours, as served by
/// the simulation (fractional timestamps, string station keys).
pub fn fixture_snapshot_json() -> &'static str {
    r#"{
        "total_production": 10,
        "faulty_products": 100,
        "production_trend": [
            {"timestamp": 0.0, "station_id": 1, "production": 5, "cumulative_production": 5},
            {"timestamp": 3600.4, "station_id": 1, "production": 3, "cumulative_production": 8},
            {"timestamp": 7200.9, "station_id": 2, "production": 2, "cumulative_production": 10}
        ],
        "occupancy_rates": {"1": 0.4, "2": 0.2, "3": 0.0},
        "waiting_times": {"1": 0, "2": 1.25, "3": 2.5},
        "status_partitions": {
            "1": {"Operational": 0.9, "Down": 0.05, "Waiting for restock": 0.05},
            "2": {"Operational": 0.7, "Down": 0.2, "Waiting for restock": 0.1},
            "3": {"Operational": 0.5, "Down": 0.25, "Waiting for restock": 0.25}
        },
        "stations": [{"station_id": 1}, {"station_id": 2}, {"station_id": 3}]
    }"#
}

/// Write `body` to a temporary file that lives as long as the handle.
pub fn write_temp_file(body: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(body.as_bytes()).unwrap();
    file
}
