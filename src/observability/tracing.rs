//! Request spans.
//!
//! Every inbound request gets one span carrying its request ID, so all log
//! lines emitted while handling it can be correlated.

use axum::http::Request;
use tracing::Span;

use crate::http::request::RequestIdExt;

/// `make_span_with` callback for `TraceLayer`.
pub fn make_request_span<B>(request: &Request<B>) -> Span {
    tracing::info_span!(
        "request",
        request_id = %request.request_id(),
        method = %request.method(),
        path = %request.uri().path(),
    )
}
