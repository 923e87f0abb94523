//! Upstream URL construction.

use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
#[error("invalid upstream base URL {value:?}: {reason}")]
pub struct InvalidBase {
    pub value: String,
    pub reason: String,
}

/// Validated base URL of the LiveOps service, kept without a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamBase(String);

impl UpstreamBase {
    pub fn parse(raw: &str) -> Result<Self, InvalidBase> {
        let raw = raw.trim();
        let url = Url::parse(raw).map_err(|e| InvalidBase {
            value: raw.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(InvalidBase {
                value: raw.to_string(),
                reason: "expected an http(s) URL with a host".to_string(),
            });
        }
        Ok(Self(raw.trim_end_matches('/').to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `{base}/segments/{suffix}`, with the suffix spliced in as received.
    ///
    /// The HTTP client still parses the result as a URL: characters not
    /// allowed in a path (`{`, `}`, `"`, space, ...) go out percent-encoded
    /// and existing `%XX` escapes are kept. The parser resolves dot segments,
    /// so callers reject those first (`routing::matcher::has_dot_segment`).
    pub fn segments_url(&self, suffix: &str) -> String {
        format!("{}/segments/{}", self.0, suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_url() {
        let base = UpstreamBase::parse("https://liveops.example").unwrap();
        assert_eq!(
            base.segments_url("regions/42"),
            "https://liveops.example/segments/regions/42"
        );
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let base = UpstreamBase::parse("https://liveops.example/api/").unwrap();
        assert_eq!(base.as_str(), "https://liveops.example/api");
        assert_eq!(base.segments_url("me"), "https://liveops.example/api/segments/me");
    }

    #[test]
    fn test_suffix_is_not_reencoded() {
        let base = UpstreamBase::parse("http://127.0.0.1:9000").unwrap();
        assert_eq!(
            base.segments_url("a%20b/c:d@e"),
            "http://127.0.0.1:9000/segments/a%20b/c:d@e"
        );
    }

    #[test]
    fn test_rejects_bad_base() {
        assert!(UpstreamBase::parse("None").is_err());
        assert!(UpstreamBase::parse("").is_err());
        assert!(UpstreamBase::parse("mailto:ops@example.com").is_err());
    }
}
