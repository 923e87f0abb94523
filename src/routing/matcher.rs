//! Route matching logic.
//!
//! # Responsibilities
//! - Match request paths against literal or tail-capturing patterns
//! - Match request methods against a route's allowed set
//!
//! # Design Decisions
//! - Path matching is case-sensitive and works on the raw (still
//!   percent-encoded) path so captured tails are forwarded unmodified
//! - Tail patterns require a non-empty tail
//! - Tails with `.` or `..` segments (literal or `%2e`-encoded) never match,
//!   since the upstream URL parser would resolve them out of the prefix
//! - No regex to guarantee O(n) matching

use axum::http::Method;

/// A compiled path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPattern {
    /// Matches exactly this path.
    Exact(String),
    /// Matches `prefix` followed by at least one more character, capturing the rest.
    Tail { prefix: String },
}

impl PathPattern {
    /// Compile a pattern. A trailing `{*name}` segment makes it a tail pattern.
    pub fn parse(pattern: &str) -> Self {
        if let Some(start) = pattern.rfind("{*") {
            if pattern.ends_with('}') {
                return PathPattern::Tail {
                    prefix: pattern[..start].to_string(),
                };
            }
        }
        PathPattern::Exact(pattern.to_string())
    }

    /// Match a request path, returning the captured tail for tail patterns.
    pub fn match_path<'a>(&self, path: &'a str) -> Option<PathMatch<'a>> {
        match self {
            PathPattern::Exact(expected) => (path == expected).then_some(PathMatch { tail: None }),
            PathPattern::Tail { prefix } => path
                .strip_prefix(prefix.as_str())
                .filter(|tail| !tail.is_empty() && !has_dot_segment(tail))
                .map(|tail| PathMatch { tail: Some(tail) }),
        }
    }
}

/// True if any `/`- or `\`-separated segment is `.` or `..`, counting
/// `%2e` (either case) as a dot.
pub fn has_dot_segment(tail: &str) -> bool {
    tail.split(['/', '\\']).any(|segment| {
        let decoded = segment.to_ascii_lowercase().replace("%2e", ".");
        decoded == "." || decoded == ".."
    })
}

/// Result of a successful path match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathMatch<'a> {
    pub tail: Option<&'a str>,
}

/// Methods a route accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodFilter {
    Any,
    Only(Vec<Method>),
}

impl MethodFilter {
    /// GET routes also answer HEAD.
    pub fn get() -> Self {
        MethodFilter::Only(vec![Method::GET, Method::HEAD])
    }

    pub fn matches(&self, method: &Method) -> bool {
        match self {
            MethodFilter::Any => true,
            MethodFilter::Only(methods) => methods.contains(method),
        }
    }

    /// Methods to advertise in an `Allow` header.
    pub fn allowed(&self) -> Vec<Method> {
        match self {
            MethodFilter::Any => Vec::new(),
            MethodFilter::Only(methods) => methods.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_pattern() {
        let pattern = PathPattern::parse("/immersa/list/");
        assert_eq!(pattern, PathPattern::Exact("/immersa/list/".into()));
        assert!(pattern.match_path("/immersa/list/").is_some());
        assert!(pattern.match_path("/immersa/list").is_none());
        assert!(pattern.match_path("/IMMERSA/list/").is_none()); // Case sensitive
    }

    #[test]
    fn test_tail_pattern() {
        let pattern = PathPattern::parse("/immersa/segments/{*path}");
        assert_eq!(
            pattern,
            PathPattern::Tail {
                prefix: "/immersa/segments/".into()
            }
        );

        let m = pattern.match_path("/immersa/segments/regions/42").unwrap();
        assert_eq!(m.tail, Some("regions/42"));

        let m = pattern.match_path("/immersa/segments/a%20b/c:d").unwrap();
        assert_eq!(m.tail, Some("a%20b/c:d"));

        assert!(pattern.match_path("/immersa/segments/").is_none());
        assert!(pattern.match_path("/immersa/segments").is_none());
        assert!(pattern.match_path("/immersa/other/x").is_none());
    }

    #[test]
    fn test_tail_rejects_dot_segments() {
        let pattern = PathPattern::parse("/immersa/segments/{*path}");

        for path in [
            "/immersa/segments/../admin/users",
            "/immersa/segments/%2e%2e/admin",
            "/immersa/segments/%2E%2e/admin",
            "/immersa/segments/.%2E/admin",
            "/immersa/segments/regions/../../admin",
            "/immersa/segments/./regions",
            "/immersa/segments/regions/%2e",
            "/immersa/segments/regions\\..\\admin",
            "/immersa/segments/..",
        ] {
            assert!(pattern.match_path(path).is_none(), "{path}");
        }

        // Dots inside a segment are ordinary characters.
        for path in [
            "/immersa/segments/v1.2/regions",
            "/immersa/segments/...",
            "/immersa/segments/a..b",
            "/immersa/segments/.hidden",
        ] {
            assert!(pattern.match_path(path).is_some(), "{path}");
        }
    }

    #[test]
    fn test_method_filter() {
        let get = MethodFilter::get();
        assert!(get.matches(&Method::GET));
        assert!(get.matches(&Method::HEAD));
        assert!(!get.matches(&Method::POST));
        assert!(MethodFilter::Any.matches(&Method::PATCH));
        assert!(MethodFilter::Any.allowed().is_empty());
    }
}
