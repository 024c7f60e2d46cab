use crate::api::MetricsSummary;
use crate::models::WindowedSnapshot;

/// Share of faulty units among everything that left the line, in percent.
pub(crate) fn faulty_rate_percent(faulty: u64, produced: u64) -> f64 {
    let total = faulty as f64 + produced as f64;
    if total == 0.0 {
        return 0.0;
    }
    faulty as f64 / total * 100.0
}

/// Compute the summary metrics panel for a windowed snapshot.
pub fn compute_metrics(windowed: &WindowedSnapshot) -> MetricsSummary {
    let faulty_rate = faulty_rate_percent(windowed.faulty_products, windowed.total_production);

    let production_rate_per_hour = windowed.window.and_then(|w| {
        let hours = w.duration_hours();
        (hours > 0.0).then(|| windowed.total_production as f64 / hours)
    });

    MetricsSummary {
        total_production: windowed.total_production,
        faulty_products: windowed.faulty_products,
        faulty_rate_percent: faulty_rate,
        faulty_rate_label: format!("{:.2}%", faulty_rate),
        production_rate_per_hour,
    }
}
