//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Application mount point and display name.
    pub app: AppConfig,

    /// Upstream LiveOps service.
    pub upstream: UpstreamConfig,

    /// Session lookup settings.
    pub session: SessionConfig,

    /// Shell template settings.
    pub templates: TemplateConfig,

    /// Inbound timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Request limits.
    pub security: SecurityConfig,

    /// Message localization.
    pub i18n: I18nConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8088").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8088".to_string(),
        }
    }
}

/// Where the Immersa views are mounted.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Route base shared by all three routes (no trailing slash).
    pub route_base: String,

    /// Application name shown in the shell title.
    pub name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            route_base: "/immersa".to_string(),
            name: "Superset".to_string(),
        }
    }
}

/// Upstream service configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the LiveOps service. Overridden by `LIVEOPS_SERVICE_URL`.
    pub base_url: Option<String>,

    /// Total deadline for one relayed call. Unset means no deadline.
    pub timeout_secs: Option<u64>,

    /// Connection establishment deadline. Unset means no deadline.
    pub connect_timeout_secs: Option<u64>,

    /// Ignore `HTTP_PROXY`/`HTTPS_PROXY` when calling the upstream.
    pub no_proxy: bool,
}

/// Session lookup configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Name of the cookie carrying the session id.
    pub cookie_name: String,

    /// Session key holding the OAuth token list.
    pub token_key: String,

    /// Optional JSON file the in-memory store is seeded from.
    pub store_path: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "session".to_string(),
            token_key: "oauth".to_string(),
            store_path: None,
        }
    }
}

/// Application shell template configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Prefix for static asset URLs.
    pub static_prefix: String,

    /// Optional template file replacing the built-in shell.
    pub shell_path: Option<String>,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            static_prefix: "/static/assets".to_string(),
            shell_path: None,
        }
    }
}

/// Inbound timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Deadline for handling a whole inbound request. Unset means none.
    pub request_secs: Option<u64>,
}

/// Request limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum inbound body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// Localization configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct I18nConfig {
    /// Locale used when `Accept-Language` names nothing we support.
    pub default_locale: String,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_locale: "en".to_string(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
