//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Relayed request:
//!     → limits.rs (check request body size)
//!     → Pass to relay
//! ```
//!
//! # Design Decisions
//! - Fail closed: reject bodies over the limit instead of truncating
//! - Access gates live with the routes (routing::permission)

pub mod limits;
