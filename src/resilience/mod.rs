//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Relay to upstream:
//!     → timeouts.rs (connect/total deadline on the shared client)
//!     → On timeout: ApiError::UpstreamTimeout (504)
//! ```
//!
//! # Design Decisions
//! - No retries: each inbound request makes exactly one upstream call
//! - Deadlines default to unbounded and are enabled through config

pub mod timeouts;
