//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, raw path)
//!     → router.rs (route table lookup)
//!     → matcher.rs (evaluate path pattern and method)
//!     → permission.rs (gate against the RequestContext)
//!     → Return: matched Route, MethodNotAllowed or NotFound
//! ```
//!
//! # Design Decisions
//! - Table built at startup from the configured route base, immutable at runtime
//! - Each route carries its own permission; gates run before the handler
//! - Deterministic: same input always matches same route

pub mod matcher;
pub mod permission;
pub mod router;

pub use permission::Permission;
pub use router::{Route, RouteKind, RouteMatch, RouteTable};
