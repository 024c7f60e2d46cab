//! Factory Dashboard Binary
//!
//! Fetches the factory snapshot once, applies the configured period and
//! station selection, and prints the resulting dashboard view as JSON.
//!
//! # Usage
//!
//! ```bash
//! # Fetch from a running factory-data server
//! DASHBOARD_URL=http://localhost:5000 cargo run --bin factory-dashboard
//!
//! # Replay a saved snapshot for the last week, stations 1-3 only
//! DASHBOARD_SOURCE=file DASHBOARD_FILE=snapshot.json \
//!   DASHBOARD_PERIOD=week DASHBOARD_STATIONS=1,2,3 \
//!   cargo run --bin factory-dashboard
//! ```
//!
//! # Environment Variables
//!
//! - `DASHBOARD_*`: see [`factory_dashboard::config`]
//! - `RUST_LOG`: Log level (default: info)

use std::env;

use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use factory_dashboard::config::DashboardConfig;
use factory_dashboard::dashboard::{DashboardEvent, DashboardState};
use factory_dashboard::source::SourceFactory;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only the view.
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting factory dashboard");

    let config = DashboardConfig::load()?;
    let source = SourceFactory::create(&config.source)?;
    info!("Snapshot source: {}", source.describe());

    let mut state = DashboardState::from_config(&config);

    // Single attempt; on failure the dashboard stays empty.
    let fetched = match source.fetch_snapshot().await {
        Ok(fetched) => fetched,
        Err(e) => {
            error!("Error fetching data: {}", e);
            std::process::exit(1);
        }
    };
    state.update(DashboardEvent::from(fetched));

    let Some(view) = state.view() else {
        anyhow::bail!("dashboard has no snapshot after load");
    };
    info!(
        "Rendering {} view for {} stations",
        view.period,
        view.selected_stations.len()
    );
    println!("{}", serde_json::to_string_pretty(&view)?);

    Ok(())
}
