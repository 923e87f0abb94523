//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Initialize logging, metrics, sessions, the shell and the relay client
//!   in dependency order
//! - Bind the listener last
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - A missing `LIVEOPS_SERVICE_URL` stops startup instead of producing
//!   malformed upstream URLs later

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use metrics_exporter_prometheus::BuildError;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{load_config, ConfigError, GatewayConfig};
use crate::http::HttpServer;
use crate::observability::{logging, metrics};
use crate::relay::{RelayClient, RelayError};
use crate::session::{MemorySessionStore, SessionError, SessionStore};
use crate::templates::{AppShell, TemplateError};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to initialize logging: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),

    #[error("failed to start metrics endpoint: {0}")]
    Metrics(#[from] BuildError),

    #[error("failed to load sessions: {0}")]
    Sessions(#[from] SessionError),

    #[error("failed to render application shell: {0}")]
    Template(#[from] TemplateError),

    #[error("failed to build upstream client: {0}")]
    Relay(#[from] RelayError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// A server ready to run on a bound listener.
pub struct Prepared {
    pub server: HttpServer,
    pub listener: TcpListener,
}

/// Build the session store named by the configuration.
pub fn build_sessions(config: &GatewayConfig) -> Result<Arc<dyn SessionStore>, SessionError> {
    let store = match config.session.store_path.as_deref() {
        Some(path) => MemorySessionStore::load_from_file(path)?,
        None => MemorySessionStore::default(),
    };
    Ok(Arc::new(store))
}

/// Build the server from validated configuration.
pub fn build_server(config: GatewayConfig) -> Result<HttpServer, StartupError> {
    let sessions = build_sessions(&config)?;
    let shell = AppShell::from_config(&config)?;
    let relay = RelayClient::from_config(&config.upstream)?;

    tracing::info!(
        upstream = %relay.base().as_str(),
        upstream_timeout_secs = ?config.upstream.timeout_secs,
        "Upstream relay configured"
    );

    Ok(HttpServer::new(config, relay, sessions, shell))
}

/// Run every startup step up to and including binding the listener.
pub async fn prepare(config_path: Option<&Path>) -> Result<Prepared, StartupError> {
    let config = load_config(config_path)?;
    logging::init_logging(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        route_base = %config.app.route_base,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        // Validation already checked the address.
        if let Ok(addr) = config.observability.metrics_address.parse::<SocketAddr>() {
            metrics::init_metrics(addr)?;
        }
    }

    let bind_address = config.listener.bind_address.clone();
    let server = build_server(config)?;

    let listener = TcpListener::bind(&bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: bind_address.clone(),
            source,
        })?;

    Ok(Prepared { server, listener })
}
