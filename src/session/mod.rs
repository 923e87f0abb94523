//! Session subsystem.
//!
//! # Data Flow
//! ```text
//! Cookie header
//!     → cookie.rs (find the session cookie)
//!     → store.rs (SessionStore::load)
//!     → record.rs (read the token under the configured key)
//!     → RequestContext (http::request)
//! ```
//!
//! # Design Decisions
//! - Read-only: sessions are written by the login flow, not by this service
//! - Token lookup tolerates malformed records (treated as "no token")

pub mod cookie;
pub mod record;
pub mod store;

pub use record::{SessionId, SessionRecord, SessionToken};
pub use store::{MemorySessionStore, SessionError, SessionStore};

use axum::http::HeaderMap;

/// Resolve the session id and token for a request.
pub fn resolve(
    store: &dyn SessionStore,
    headers: &HeaderMap,
    cookie_name: &str,
    token_key: &str,
) -> (Option<SessionId>, Option<SessionToken>) {
    let Some(id) = cookie::find(headers, cookie_name) else {
        return (None, None);
    };
    let token = store.load(&id).and_then(|record| record.token(token_key));
    (Some(id), token)
}
