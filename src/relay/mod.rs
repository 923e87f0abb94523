//! Segments relay subsystem.
//!
//! # Data Flow
//! ```text
//! RequestContext.token + method + path suffix + body
//!     → target.rs ({base}/segments/{suffix})
//!     → client.rs (Authorization: Bearer, Content-Type: application/json)
//!     → LiveOps service
//!     → RelayResponse (status + body, mimetype forced to application/json)
//! ```
//!
//! # Design Decisions
//! - One shared client, one upstream call per inbound request
//! - The path suffix is forwarded byte-for-byte; the query string is not
//! - Upstream errors are relayed, not translated

pub mod client;
pub mod target;

pub use client::{RelayClient, RelayError, RelayRequest, RelayResponse, RELAY_CONTENT_TYPE};
pub use target::UpstreamBase;
