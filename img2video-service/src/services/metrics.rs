use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::Duration;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder. Safe to call more than once; later calls are ignored.
pub fn init_metrics() {
    if METRICS_HANDLE.get().is_some() {
        return;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            let _ = METRICS_HANDLE.set(handle);
        }
        Err(e) => tracing::warn!(error = %e, "Failed to install Prometheus recorder"),
    }
}

pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

/// Record one vendor round trip by outcome.
pub fn record_vendor_call(outcome: &'static str, elapsed: Duration) {
    counter!("vendor_requests_total", "outcome" => outcome).increment(1);
    histogram!("vendor_request_duration_seconds", "outcome" => outcome)
        .record(elapsed.as_secs_f64());
}
