//! Per-route access gates.

use crate::http::request::RequestContext;
use crate::http::response::ApiError;

/// Capability a caller must hold before a route's handler runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// No gate beyond whatever middleware already ran.
    Public,
    /// The caller's session must carry an access token.
    SessionToken,
}

impl Permission {
    pub fn check(&self, ctx: &RequestContext) -> Result<(), ApiError> {
        match self {
            Permission::Public => Ok(()),
            Permission::SessionToken if ctx.token.is_some() => Ok(()),
            Permission::SessionToken => Err(ApiError::MissingToken),
        }
    }
}
