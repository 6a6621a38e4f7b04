use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the Prometheus exporter and register all application metrics.
/// Returns a `PrometheusHandle` whose `render()` method produces the
/// text/plain Prometheus scrape payload.
///
/// Only one recorder can exist per process, so later calls return the
/// handle installed by the first one.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = HANDLE.get_or_try_init(|| -> anyhow::Result<PrometheusHandle> {
        let handle = PrometheusBuilder::new().install_recorder()?;

        // Pre-register counters so they appear even before the first increment.
        counter!("journal_submissions_total").absolute(0);
        counter!("journal_entries_inserted_total").absolute(0);
        counter!("journal_invalid_tokens_total").absolute(0);
        counter!("metrics_cache_hits_total").absolute(0);
        counter!("metrics_cache_misses_total").absolute(0);

        gauge!("metrics_cache_entries").set(0.0);

        // Histogram is lazily created on first record; force creation.
        histogram!("metrics_compute_seconds").record(0.0);

        Ok(handle)
    })?;

    Ok(handle.clone())
}
