//! Request body limits.
//!
//! # Responsibilities
//! - Enforce maximum request body size before relaying
//!
//! # Design Decisions
//! - A declared `Content-Length` over the limit is rejected before reading
//! - Otherwise the body is buffered up to the limit and rejected past it
//! - Returns 413 Payload Too Large

use axum::{
    body::{to_bytes, Body, Bytes},
    http::{header::CONTENT_LENGTH, HeaderMap},
};

use crate::http::response::ApiError;

/// Buffer a request body, failing once it exceeds `limit` bytes.
pub async fn read_body(headers: &HeaderMap, body: Body, limit: usize) -> Result<Bytes, ApiError> {
    let declared = headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok());

    if declared.is_some_and(|len| len > limit) {
        return Err(ApiError::PayloadTooLarge { limit });
    }

    to_bytes(body, limit).await.map_err(|e| {
        tracing::debug!(error = %e, limit, "Failed to buffer request body");
        ApiError::PayloadTooLarge { limit }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[tokio::test]
    async fn test_within_limit() {
        let bytes = read_body(&HeaderMap::new(), Body::from("{\"k\":1}"), 16).await.unwrap();
        assert_eq!(&bytes[..], b"{\"k\":1}");
    }

    #[tokio::test]
    async fn test_empty_body() {
        let bytes = read_body(&HeaderMap::new(), Body::empty(), 16).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_over_limit() {
        let err = read_body(&HeaderMap::new(), Body::from(vec![0u8; 32]), 16).await.unwrap_err();
        assert!(matches!(err, ApiError::PayloadTooLarge { limit: 16 }));
    }

    #[tokio::test]
    async fn test_declared_length_over_limit() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_LENGTH, HeaderValue::from_static("1000"));
        let err = read_body(&headers, Body::empty(), 16).await.unwrap_err();
        assert!(matches!(err, ApiError::PayloadTooLarge { .. }));
    }
}
