//! HTTP server setup and dispatch.
//!
//! # Responsibilities
//! - Create the Axum Router and wire up middleware (request ID, tracing,
//!   request context)
//! - Dispatch requests through the route table and its permission gates
//! - Enforce the optional per-request deadline inside dispatch, so a timed
//!   out request still gets a JSON error and an access event
//! - Serve the shell routes and relay the segments route
//! - Record one access event per handled request

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware,
    response::{IntoResponse, Redirect, Response},
    routing::any,
    Extension, Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::http::request::{context_middleware, RequestContext, UuidRequestId, X_REQUEST_ID};
use crate::http::response::ApiError;
use crate::i18n::Locale;
use crate::observability::{events, metrics, tracing::make_request_span};
use crate::relay::{RelayClient, RelayRequest};
use crate::resilience::timeouts::request_timeout;
use crate::routing::{RouteKind, RouteMatch, RouteTable};
use crate::security::limits::read_body;
use crate::session::SessionStore;
use crate::templates::AppShell;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub routes: Arc<RouteTable>,
    pub relay: RelayClient,
    pub sessions: Arc<dyn SessionStore>,
    pub shell: AppShell,
    pub default_locale: Locale,
    pub request_timeout: Option<Duration>,
}

/// HTTP server for the Immersa views.
pub struct HttpServer {
    router: Router,
    config: Arc<GatewayConfig>,
}

impl HttpServer {
    /// Create a new HTTP server from validated configuration and its collaborators.
    pub fn new(
        config: GatewayConfig,
        relay: RelayClient,
        sessions: Arc<dyn SessionStore>,
        shell: AppShell,
    ) -> Self {
        let config = Arc::new(config);
        let routes = Arc::new(RouteTable::immersa(&config.app.route_base));
        let default_locale = Locale::from_tag(&config.i18n.default_locale).unwrap_or_default();

        let state = AppState {
            config: config.clone(),
            routes,
            relay,
            sessions,
            shell,
            default_locale,
            request_timeout: request_timeout(&config.timeouts),
        };

        let router = Self::build_router(state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(dispatch))
            .route("/", any(dispatch))
            .layer(middleware::from_fn_with_state(state.clone(), context_middleware))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId))
                    .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
                    .layer(PropagateRequestIdLayer::new(X_REQUEST_ID)),
            )
    }

    /// The fully layered router, e.g. for driving with `tower::ServiceExt`.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            route_base = %self.config.app.route_base,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Single entry point: match the route table, run the route's gate, then
/// its handler.
async fn dispatch(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    request: Request<Body>,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let (route_name, result) = match state.routes.match_request(&method, &path) {
        RouteMatch::Found { route, tail } => {
            let result = match route.permission.check(&ctx) {
                Ok(()) => {
                    let handled = handle(&state, &ctx, route.kind, tail, request);
                    match state.request_timeout {
                        Some(deadline) => tokio::time::timeout(deadline, handled)
                            .await
                            .unwrap_or_else(|_| Err(ApiError::RequestTimeout(deadline))),
                        None => handled.await,
                    }
                }
                Err(e) => Err(e),
            };
            (route.name, result)
        }
        RouteMatch::AddTrailingSlash => {
            let location = match request.uri().query() {
                Some(query) => format!("{path}/?{query}"),
                None => format!("{path}/"),
            };
            ("redirect", Ok(Redirect::permanent(&location).into_response()))
        }
        RouteMatch::MethodNotAllowed { allowed } => {
            ("none", Err(ApiError::MethodNotAllowed { allowed }))
        }
        RouteMatch::NotFound => ("none", Err(ApiError::NotFound)),
    };

    let response = match result {
        Ok(response) => response,
        Err(err) => {
            if err.is_server_error() {
                tracing::error!(
                    request_id = %ctx.request_id,
                    route = route_name,
                    error = %err,
                    cause = ?std::error::Error::source(&err),
                    "Request failed"
                );
            } else {
                tracing::debug!(request_id = %ctx.request_id, route = route_name, error = %err, "Request rejected");
            }
            err.to_response(ctx.locale)
        }
    };

    events::record_access(&ctx, route_name, &method, response.status(), start);
    response
}

async fn handle(
    state: &AppState,
    ctx: &RequestContext,
    kind: RouteKind,
    tail: Option<&str>,
    request: Request<Body>,
) -> Result<Response, ApiError> {
    match kind {
        RouteKind::Root | RouteKind::List => Ok(state.shell.clone().into_response()),
        RouteKind::Segments => {
            let token = ctx.token.clone().ok_or(ApiError::MissingToken)?;
            let (parts, body) = request.into_parts();
            let body = read_body(&parts.headers, body, state.config.security.max_body_size).await?;

            let relay_request = RelayRequest {
                method: parts.method,
                suffix: tail.unwrap_or_default().to_string(),
                body,
                token,
            };

            match state.relay.relay(relay_request).await {
                Ok(relayed) => Ok(relayed.into_response()),
                Err(err) => {
                    metrics::record_upstream_error(match &err {
                        ApiError::UpstreamTimeout(_) => "timeout",
                        ApiError::InvalidTarget { .. } => "invalid_target",
                        _ => "transport",
                    });
                    Err(err)
                }
            }
        }
    }
}
