//! Error responses.
//!
//! # Responsibilities
//! - Define the errors a request can end in
//! - Map each to an HTTP status and a localized JSON body `{"error": "..."}`
//!
//! # Design Decisions
//! - Upstream 4xx/5xx are relayed, never turned into an `ApiError`
//! - Transport failures collapse into one generic message; details go to logs
//! - Upstream timeouts result in 504 Gateway Timeout
//! - The inbound request deadline results in 408 Request Timeout

use std::time::Duration;

use axum::{
    http::{header::ALLOW, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::i18n::{Locale, Message};

/// Errors surfaced to callers as JSON.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The session has no access token.
    #[error("request missing token")]
    MissingToken,

    #[error("no route matches the request")]
    NotFound,

    #[error("method not allowed")]
    MethodNotAllowed { allowed: Vec<Method> },

    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("request not handled within {0:?}")]
    RequestTimeout(Duration),

    #[error("upstream request timed out")]
    UpstreamTimeout(#[source] reqwest::Error),

    #[error("upstream request failed")]
    Upstream(#[source] reqwest::Error),

    #[error("invalid upstream target {url}")]
    InvalidTarget {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl ApiError {
    /// Classify a client error from the relay call.
    pub fn from_upstream(err: reqwest::Error, url: &str) -> Self {
        if err.is_timeout() {
            ApiError::UpstreamTimeout(err)
        } else if err.is_builder() {
            ApiError::InvalidTarget {
                url: url.to_string(),
                source: err,
            }
        } else {
            ApiError::Upstream(err)
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingToken => StatusCode::UNAUTHORIZED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::RequestTimeout(_) => StatusCode::REQUEST_TIMEOUT,
            ApiError::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Upstream(_) | ApiError::InvalidTarget { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn message(&self) -> Message {
        match self {
            ApiError::MissingToken => Message::MissingToken,
            ApiError::NotFound => Message::NotFound,
            ApiError::MethodNotAllowed { .. } => Message::MethodNotAllowed,
            ApiError::PayloadTooLarge { .. } => Message::PayloadTooLarge,
            ApiError::RequestTimeout(_) => Message::RequestTimeout,
            ApiError::UpstreamTimeout(_) => Message::UpstreamTimeout,
            ApiError::Upstream(_) | ApiError::InvalidTarget { .. } => Message::Unexpected,
        }
    }

    /// True for failures the caller did not cause.
    pub fn is_server_error(&self) -> bool {
        self.status().is_server_error()
    }

    /// Render in the caller's locale.
    pub fn to_response(&self, locale: Locale) -> Response {
        let mut response = json_error_response(self.message().text(locale), self.status());
        if let ApiError::MethodNotAllowed { allowed } = self {
            let allow = allowed
                .iter()
                .map(Method::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            if let Ok(value) = HeaderValue::from_str(&allow) {
                response.headers_mut().insert(ALLOW, value);
            }
        }
        response
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.to_response(Locale::default())
    }
}

/// `{"error": message}` with the given status.
pub fn json_error_response(message: &str, status: StatusCode) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::header::CONTENT_TYPE;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_missing_token_response() {
        let response = ApiError::MissingToken.to_response(Locale::En);
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Request missing token." })
        );
    }

    #[tokio::test]
    async fn test_localized_body() {
        let response = ApiError::MissingToken.to_response(Locale::Es);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Falta el token en la solicitud." })
        );
    }

    #[test]
    fn test_allow_header() {
        let err = ApiError::MethodNotAllowed {
            allowed: vec![Method::GET, Method::HEAD],
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[ALLOW], "GET, HEAD");
    }

    #[test]
    fn test_statuses() {
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::PayloadTooLarge { limit: 1 }.status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            ApiError::RequestTimeout(Duration::from_secs(1)).status(),
            StatusCode::REQUEST_TIMEOUT
        );
        assert!(!ApiError::MissingToken.is_server_error());
    }
}
