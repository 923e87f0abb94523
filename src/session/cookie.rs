//! Session cookie extraction.

use axum::http::{header::COOKIE, HeaderMap};

use crate::session::record::SessionId;

/// Find the named cookie across all `Cookie` headers. Empty values and
/// non-UTF-8 headers are ignored; the first match wins.
pub fn find(headers: &HeaderMap, name: &str) -> Option<SessionId> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, value)| *key == name && !value.is_empty())
        .map(|(_, value)| SessionId::new(value.trim_matches('"')))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(values: &[&'static str]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for v in values {
            map.append(COOKIE, HeaderValue::from_static(v));
        }
        map
    }

    #[test]
    fn test_find_cookie() {
        let h = headers(&["a=1; session=abc; b=2"]);
        assert_eq!(find(&h, "session"), Some(SessionId::new("abc")));
        assert_eq!(find(&h, "missing"), None);
    }

    #[test]
    fn test_find_across_headers() {
        let h = headers(&["a=1", "session=xyz"]);
        assert_eq!(find(&h, "session"), Some(SessionId::new("xyz")));
    }

    #[test]
    fn test_name_must_match_exactly() {
        let h = headers(&["my_session=abc; session="]);
        assert_eq!(find(&h, "session"), None);
    }

    #[test]
    fn test_quoted_value() {
        let h = headers(&["session=\"q1\""]);
        assert_eq!(find(&h, "session"), Some(SessionId::new("q1")));
    }
}
