//! Prometheus metrics setup and metric definitions

use anyhow::{Context, Result};
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus recorder and return a handle for rendering metrics.
pub fn install_prometheus_recorder() -> Result<PrometheusHandle> {
    // Seconds. Identity calls dominate the upper buckets.
    let buckets = [0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];

    PrometheusBuilder::new()
        .set_buckets(&buckets)
        .context("failed to set histogram buckets")?
        .install_recorder()
        .context("failed to install Prometheus recorder")
}

/// Register descriptions and zero values so HELP/TYPE lines appear from startup.
pub fn describe_metrics() {
    describe_counter!("syra_http_requests_total", "Total number of HTTP requests");
    describe_histogram!(
        "syra_http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
    describe_gauge!(
        "syra_http_requests_in_flight",
        "Number of HTTP requests currently being processed"
    );
    describe_counter!(
        "syra_identity_requests_total",
        "Calls to the identity provider by operation and outcome"
    );

    counter!("syra_identity_requests_total", "operation" => "fetch_profile", "outcome" => "success")
        .absolute(0);
    counter!("syra_identity_requests_total", "operation" => "exchange_code", "outcome" => "success")
        .absolute(0);
    gauge!("syra_http_requests_in_flight").set(0.0);
}
