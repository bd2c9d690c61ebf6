//! Metrics collection and exposition.
//!
//! # Metrics
//! - `miniblog_requests_total` (counter): requests by method, status, outcome
//! - `miniblog_request_duration_seconds` (histogram): dispatch latency
//! - `miniblog_sessions_active` (gauge): sessions held by the store
//!
//! # Design Decisions
//! - Exposed through the Prometheus exporter's own HTTP listener
//! - Label values come from small closed sets

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

pub const REQUESTS_TOTAL: &str = "miniblog_requests_total";
pub const REQUEST_DURATION_SECONDS: &str = "miniblog_request_duration_seconds";
pub const SESSIONS_ACTIVE: &str = "miniblog_sessions_active";

/// Install the Prometheus recorder and serve it on `addr`.
///
/// Must run inside the tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Prometheus exporter listening");
    Ok(())
}

/// Record one completed dispatch.
pub fn record_dispatch(method: &str, status: u16, outcome: &'static str, start: Instant) {
    metrics::counter!(
        REQUESTS_TOTAL,
        "method" => method.to_string(),
        "status" => status.to_string(),
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!(REQUEST_DURATION_SECONDS, "method" => method.to_string())
        .record(start.elapsed().as_secs_f64());
}

pub fn record_sessions(count: usize) {
    metrics::gauge!(SESSIONS_ACTIVE).set(count as f64);
}
