//! Route table lookup.
//!
//! # Responsibilities
//! - Store the compiled route table
//! - Look up the matching route for a request
//! - Return matched route, method mismatch, or explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) scan; first match wins
//! - Explicit NotFound rather than silent default
//! - A path missing only the trailing slash of an exact route is answered
//!   with a permanent redirect to the slash form

use axum::http::Method;

use crate::routing::matcher::{MethodFilter, PathPattern};
use crate::routing::permission::Permission;

/// Handler a route dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    /// Application root shell.
    Root,
    /// List shell.
    List,
    /// Relay to the upstream segments API.
    Segments,
}

/// One entry of the route table.
#[derive(Debug, Clone)]
pub struct Route {
    /// Route identifier for logging/metrics.
    pub name: &'static str,
    pub kind: RouteKind,
    pub methods: MethodFilter,
    pub pattern: PathPattern,
    pub permission: Permission,
}

/// Outcome of a route lookup.
#[derive(Debug)]
pub enum RouteMatch<'r, 'p> {
    Found {
        route: &'r Route,
        tail: Option<&'p str>,
    },
    MethodNotAllowed {
        allowed: Vec<Method>,
    },
    /// The path plus a trailing `/` names a route that accepts the method.
    AddTrailingSlash,
    NotFound,
}

/// Ordered route table.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// The Immersa view mounted under `base` (e.g. "/immersa").
    pub fn immersa(base: &str) -> Self {
        Self::new(vec![
            Route {
                name: "root",
                kind: RouteKind::Root,
                methods: MethodFilter::get(),
                pattern: PathPattern::parse(&format!("{base}/")),
                permission: Permission::Public,
            },
            // The list shell has never been gated; it stays open until a
            // product decision says otherwise.
            Route {
                name: "list",
                kind: RouteKind::List,
                methods: MethodFilter::get(),
                pattern: PathPattern::parse(&format!("{base}/list/")),
                permission: Permission::Public,
            },
            Route {
                name: "segments",
                kind: RouteKind::Segments,
                methods: MethodFilter::Any,
                pattern: PathPattern::parse(&format!("{base}/segments/{{*path}}")),
                permission: Permission::SessionToken,
            },
        ])
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Find the route for a method and raw path.
    pub fn match_request<'r, 'p>(&'r self, method: &Method, path: &'p str) -> RouteMatch<'r, 'p> {
        let mut allowed: Vec<Method> = Vec::new();

        for route in &self.routes {
            let Some(m) = route.pattern.match_path(path) else {
                continue;
            };
            if route.methods.matches(method) {
                return RouteMatch::Found { route, tail: m.tail };
            }
            for method in route.methods.allowed() {
                if !allowed.contains(&method) {
                    allowed.push(method);
                }
            }
        }

        if !allowed.is_empty() {
            return RouteMatch::MethodNotAllowed { allowed };
        }

        if !path.ends_with('/') {
            let with_slash = format!("{path}/");
            for route in &self.routes {
                if !matches!(route.pattern, PathPattern::Exact(_)) {
                    continue;
                }
                if route.pattern.match_path(&with_slash).is_none() {
                    continue;
                }
                if route.methods.matches(method) {
                    return RouteMatch::AddTrailingSlash;
                }
                for method in route.methods.allowed() {
                    if !allowed.contains(&method) {
                        allowed.push(method);
                    }
                }
            }
            if !allowed.is_empty() {
                return RouteMatch::MethodNotAllowed { allowed };
            }
        }

        RouteMatch::NotFound
    }
}
