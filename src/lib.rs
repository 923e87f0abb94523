//! Immersa gateway library.
//!
//! Serves the Immersa application shell and relays `segments` calls to the
//! LiveOps service with the caller's session token attached.

pub mod config;
pub mod http;
pub mod i18n;
pub mod lifecycle;
pub mod observability;
pub mod relay;
pub mod resilience;
pub mod routing;
pub mod security;
pub mod session;
pub mod templates;

pub use config::schema::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
