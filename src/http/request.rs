//! Request identification and per-request context.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) for every inbound request
//! - Resolve the caller's session and locale once, up front
//! - Hand handlers an explicit [`RequestContext`] instead of ambient lookups
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - A client-supplied `x-request-id` is kept, not replaced

use axum::{
    body::Body,
    extract::State,
    http::{header::ACCEPT_LANGUAGE, HeaderName, Request},
    middleware::Next,
    response::Response,
};
use tower_http::request_id::{MakeRequestId, RequestId as TowerRequestId};

use crate::http::server::AppState;
use crate::i18n::Locale;
use crate::session::{self, SessionId, SessionToken};

/// Header carrying the request ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Request ID as seen by handlers and logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(String);

impl RequestId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read the request ID from a request's headers.
pub trait RequestIdExt {
    fn request_id(&self) -> RequestId;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> RequestId {
        let id = self
            .headers()
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown");
        RequestId::new(id)
    }
}

/// Generates UUID v4 request IDs for `SetRequestIdLayer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<TowerRequestId> {
        let id = uuid::Uuid::new_v4().to_string();
        id.parse().ok().map(TowerRequestId::new)
    }
}

/// Everything a handler may know about the caller.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: RequestId,
    pub session_id: Option<SessionId>,
    pub token: Option<SessionToken>,
    pub locale: Locale,
}

#[cfg(test)]
impl RequestContext {
    /// A context with no session.
    pub fn anonymous() -> Self {
        Self {
            request_id: RequestId::new("unknown"),
            session_id: None,
            token: None,
            locale: Locale::default(),
        }
    }
}

/// Middleware that builds the [`RequestContext`] and stores it in the
/// request extensions.
pub async fn context_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let (session_id, token) = session::resolve(
        state.sessions.as_ref(),
        req.headers(),
        &state.config.session.cookie_name,
        &state.config.session.token_key,
    );

    let locale = Locale::negotiate(
        req.headers().get(ACCEPT_LANGUAGE).and_then(|v| v.to_str().ok()),
        state.default_locale,
    );

    let ctx = RequestContext {
        request_id: req.request_id(),
        session_id,
        token,
        locale,
    };

    tracing::trace!(
        request_id = %ctx.request_id,
        has_session = ctx.session_id.is_some(),
        has_token = ctx.token.is_some(),
        locale = %ctx.locale,
        "Request context resolved"
    );

    req.extensions_mut().insert(ctx);
    next.run(req).await
}
