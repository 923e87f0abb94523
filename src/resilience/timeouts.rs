//! Timeout configuration.
//!
//! # Responsibilities
//! - Apply connect and total deadlines to the upstream client
//! - Provide the optional inbound request deadline
//!
//! # Design Decisions
//! - Every deadline is opt-in; an unset value means no deadline
//! - Timeout errors are distinct from other errors
//! - Timed-out relays return 504 Gateway Timeout

use std::time::Duration;

use crate::config::{TimeoutConfig, UpstreamConfig};

/// Apply the configured upstream deadlines to a client builder.
pub fn apply_upstream_timeouts(
    mut builder: reqwest::ClientBuilder,
    config: &UpstreamConfig,
) -> reqwest::ClientBuilder {
    if let Some(d) = upstream_timeout(config) {
        builder = builder.timeout(d);
    }
    if let Some(secs) = config.connect_timeout_secs {
        builder = builder.connect_timeout(Duration::from_secs(secs));
    }
    builder
}

/// Total deadline for one relayed call.
pub fn upstream_timeout(config: &UpstreamConfig) -> Option<Duration> {
    config.timeout_secs.map(Duration::from_secs)
}

/// Deadline for a whole inbound request.
pub fn request_timeout(config: &TimeoutConfig) -> Option<Duration> {
    config.request_secs.map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_means_unbounded() {
        assert_eq!(upstream_timeout(&UpstreamConfig::default()), None);
        assert_eq!(request_timeout(&TimeoutConfig::default()), None);
    }

    #[test]
    fn test_configured_timeouts() {
        let config = UpstreamConfig {
            timeout_secs: Some(30),
            ..Default::default()
        };
        assert_eq!(upstream_timeout(&config), Some(Duration::from_secs(30)));
        assert_eq!(
            request_timeout(&TimeoutConfig { request_secs: Some(5) }),
            Some(Duration::from_secs(5))
        );
    }
}
