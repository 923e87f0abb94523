//! Access-log events.
//!
//! One event per handled request on every route, emitted under the
//! `immersa::access` target so it can be filtered or shipped separately.

use std::time::Instant;

use axum::http::{Method, StatusCode};

use crate::http::request::RequestContext;
use crate::observability::metrics;

pub const ACCESS_TARGET: &str = "immersa::access";

/// Log and count one handled request.
pub fn record_access(
    ctx: &RequestContext,
    route: &'static str,
    method: &Method,
    status: StatusCode,
    start: Instant,
) {
    let duration_ms = start.elapsed().as_millis() as u64;

    tracing::info!(
        target: ACCESS_TARGET,
        request_id = %ctx.request_id,
        route,
        method = %method,
        status = status.as_u16(),
        duration_ms,
        session = ctx.session_id.is_some(),
        "request handled"
    );

    metrics::record_request(route, method, status.as_u16(), start);
}
