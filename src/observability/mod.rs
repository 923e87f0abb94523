//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → tracing.rs (per-request span with request ID)
//!     → events.rs (one access event per handled request)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout, pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Request ID flows through all log lines via the request span
//! - Metrics are optional and cheap when disabled

pub mod events;
pub mod logging;
pub mod metrics;
pub mod tracing;
