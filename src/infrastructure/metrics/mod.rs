//! Prometheus Metrics Module
//!
//! Provides application-wide metrics collection using Prometheus.
//!
//! # Metrics Collected
//! - HTTP request counts by method, path, and status
//! - HTTP request latency histograms
//! - Jobs enqueued by task
//! - Jobs executed by task and outcome, with duration histograms

use once_cell::sync::Lazy;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};

/// Global metrics registry
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

/// HTTP request counter - tracks total requests by method, path, and status code
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("http_requests_total", "Total number of HTTP requests")
            .namespace("service_rating"),
        &["method", "path", "status"],
    )
    .expect("Failed to create HTTP_REQUESTS_TOTAL metric")
});

/// HTTP request latency histogram - tracks request duration in seconds
pub static HTTP_REQUEST_DURATION_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    let buckets = vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];
    HistogramVec::new(
        HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        )
        .namespace("service_rating")
        .buckets(buckets),
        &["method", "path"],
    )
    .expect("Failed to create HTTP_REQUEST_DURATION_SECONDS metric")
});

/// Jobs pushed onto the queue
pub static JOBS_ENQUEUED_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("jobs_enqueued_total", "Total number of background jobs enqueued")
            .namespace("service_rating"),
        &["task"],
    )
    .expect("Failed to create JOBS_ENQUEUED_TOTAL metric")
});

/// Jobs executed by a worker
pub static JOBS_EXECUTED_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("jobs_executed_total", "Total number of background jobs executed")
            .namespace("service_rating"),
        &["task", "outcome"], // "succeeded", "failed"
    )
    .expect("Failed to create JOBS_EXECUTED_TOTAL metric")
});

/// Job execution time
pub static JOB_DURATION_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    let buckets = vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0];
    HistogramVec::new(
        HistogramOpts::new("job_duration_seconds", "Background job duration in seconds")
            .namespace("service_rating")
            .buckets(buckets),
        &["task"],
    )
    .expect("Failed to create JOB_DURATION_SECONDS metric")
});

/// Register all metrics with the registry
fn register_metrics(registry: &Registry) {
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .expect("Failed to register HTTP_REQUESTS_TOTAL");
    registry
        .register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()))
        .expect("Failed to register HTTP_REQUEST_DURATION_SECONDS");
    registry
        .register(Box::new(JOBS_ENQUEUED_TOTAL.clone()))
        .expect("Failed to register JOBS_ENQUEUED_TOTAL");
    registry
        .register(Box::new(JOBS_EXECUTED_TOTAL.clone()))
        .expect("Failed to register JOBS_EXECUTED_TOTAL");
    registry
        .register(Box::new(JOB_DURATION_SECONDS.clone()))
        .expect("Failed to register JOB_DURATION_SECONDS");
}

/// Collect and encode all metrics as Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

/// Helper to record HTTP request metrics
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, &status.to_string()])
        .inc();
    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, path])
        .observe(duration_secs);
}

/// Helper to count an enqueued job
pub fn record_job_enqueued(task: &str) {
    JOBS_ENQUEUED_TOTAL.with_label_values(&[task]).inc();
}

/// Helper to record a finished job
pub fn record_job(task: &str, outcome: &str, duration_secs: f64) {
    JOBS_EXECUTED_TOTAL
        .with_label_values(&[task, outcome])
        .inc();
    JOB_DURATION_SECONDS
        .with_label_values(&[task])
        .observe(duration_secs);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_registration() {
        // Force lazy initialization
        let _ = &*REGISTRY;
        let _ = &*HTTP_REQUESTS_TOTAL;
        let _ = &*JOBS_EXECUTED_TOTAL;
    }

    #[test]
    fn test_record_http_request() {
        record_http_request("GET", "/health", 200, 0.001);
        let metrics = gather_metrics();
        assert!(metrics.contains("http_requests_total"));
    }

    #[test]
    fn test_record_job() {
        record_job("send_invite_message", "failed", 0.02);
        record_job_enqueued("deliver_hook");
        let metrics = gather_metrics();
        assert!(metrics.contains("service_rating_jobs_executed_total"));
        assert!(metrics.contains("service_rating_jobs_enqueued_total"));
    }
}
