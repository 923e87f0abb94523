//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Fail fast on a missing or malformed upstream URL
//! - Validate value ranges (timeouts > 0, limits > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;
use crate::i18n::Locale;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("upstream base URL is not set (LIVEOPS_SERVICE_URL)")]
    MissingUpstreamUrl,

    #[error("upstream base URL {value:?} is invalid: {reason}")]
    InvalidUpstreamUrl { value: String, reason: String },

    #[error("upstream base URL must use http or https, got {0:?}")]
    UnsupportedUpstreamScheme(String),

    #[error("bind address {0:?} is not a socket address")]
    InvalidBindAddress(String),

    #[error("metrics address {0:?} is not a socket address")]
    InvalidMetricsAddress(String),

    #[error("route base {0:?} must start with '/' and must not end with '/'")]
    InvalidRouteBase(String),

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("security.max_body_size must be greater than zero")]
    ZeroBodyLimit,

    #[error("session.{0} must not be empty")]
    EmptySessionField(&'static str),

    #[error("unsupported default locale {0:?}")]
    UnknownLocale(String),
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match config.upstream.base_url.as_deref().map(str::trim) {
        None | Some("") => errors.push(ValidationError::MissingUpstreamUrl),
        Some(raw) => match Url::parse(raw) {
            Ok(url) if url.scheme() != "http" && url.scheme() != "https" => {
                errors.push(ValidationError::UnsupportedUpstreamScheme(url.scheme().to_string()));
            }
            Ok(url) if url.cannot_be_a_base() || url.host_str().is_none() => {
                errors.push(ValidationError::InvalidUpstreamUrl {
                    value: raw.to_string(),
                    reason: "missing host".to_string(),
                });
            }
            Ok(_) => {}
            Err(e) => errors.push(ValidationError::InvalidUpstreamUrl {
                value: raw.to_string(),
                reason: e.to_string(),
            }),
        },
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(config.listener.bind_address.clone()));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    let base = &config.app.route_base;
    if !base.starts_with('/') || base.ends_with('/') {
        errors.push(ValidationError::InvalidRouteBase(base.clone()));
    }

    if config.upstream.timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout("upstream.timeout_secs"));
    }
    if config.upstream.connect_timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout("upstream.connect_timeout_secs"));
    }
    if config.timeouts.request_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout("timeouts.request_secs"));
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if config.session.cookie_name.trim().is_empty() {
        errors.push(ValidationError::EmptySessionField("cookie_name"));
    }
    if config.session.token_key.trim().is_empty() {
        errors.push(ValidationError::EmptySessionField("token_key"));
    }

    if Locale::from_tag(&config.i18n.default_locale).is_none() {
        errors.push(ValidationError::UnknownLocale(config.i18n.default_locale.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
