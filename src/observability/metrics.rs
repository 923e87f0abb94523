//! Metrics collection and exposition.
//!
//! # Metrics
//! - `immersa_requests_total` (counter): requests by route, method, status
//! - `immersa_request_duration_seconds` (histogram): latency by route
//! - `immersa_upstream_errors_total` (counter): failed relays by kind
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed, so tests and
//!   metrics-disabled deployments pay nothing
//! - Labels for route, method, status code; non-standard methods share
//!   one `other` label value

use std::net::SocketAddr;
use std::time::Instant;

use axum::http::Method;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

pub const REQUESTS_TOTAL: &str = "immersa_requests_total";
pub const REQUEST_DURATION_SECONDS: &str = "immersa_request_duration_seconds";
pub const UPSTREAM_ERRORS_TOTAL: &str = "immersa_upstream_errors_total";

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one handled request.
pub fn record_request(route: &'static str, method: &Method, status: u16, start: Instant) {
    metrics::counter!(
        REQUESTS_TOTAL,
        "route" => route,
        "method" => method_label(method),
        "status" => status.to_string()
    )
    .increment(1);

    metrics::histogram!(REQUEST_DURATION_SECONDS, "route" => route)
        .record(start.elapsed().as_secs_f64());
}

/// Label value for a request method.
pub fn method_label(method: &Method) -> &'static str {
    match method.as_str() {
        "GET" => "GET",
        "HEAD" => "HEAD",
        "POST" => "POST",
        "PUT" => "PUT",
        "PATCH" => "PATCH",
        "DELETE" => "DELETE",
        "OPTIONS" => "OPTIONS",
        "CONNECT" => "CONNECT",
        "TRACE" => "TRACE",
        _ => "other",
    }
}

/// Record a relay that never produced an upstream response.
pub fn record_upstream_error(kind: &'static str) {
    metrics::counter!(UPSTREAM_ERRORS_TOTAL, "kind" => kind).increment(1);
}
