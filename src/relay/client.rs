//! The segments relay.

use axum::{
    body::Bytes,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method, StatusCode,
    },
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::config::UpstreamConfig;
use crate::http::response::ApiError;
use crate::relay::target::{InvalidBase, UpstreamBase};
use crate::resilience::timeouts::apply_upstream_timeouts;
use crate::session::SessionToken;

/// Mimetype of every relayed response.
pub const RELAY_CONTENT_TYPE: &str = "application/json";

/// Errors building the relay client at startup.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("upstream base URL is not configured")]
    MissingBase,

    #[error(transparent)]
    InvalidBase(#[from] InvalidBase),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// One inbound request to forward.
#[derive(Debug)]
pub struct RelayRequest {
    pub method: Method,
    /// Path after `/segments/`, as received.
    pub suffix: String,
    pub body: Bytes,
    pub token: SessionToken,
}

/// The upstream answer, relayed as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl IntoResponse for RelayResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(CONTENT_TYPE, HeaderValue::from_static(RELAY_CONTENT_TYPE))],
            self.body,
        )
            .into_response()
    }
}

/// Forwards segment requests to the LiveOps service.
#[derive(Debug, Clone)]
pub struct RelayClient {
    client: reqwest::Client,
    base: UpstreamBase,
}

impl RelayClient {
    pub fn from_config(config: &UpstreamConfig) -> Result<Self, RelayError> {
        let raw = config.base_url.as_deref().ok_or(RelayError::MissingBase)?;
        let base = UpstreamBase::parse(raw)?;
        let mut builder = apply_upstream_timeouts(reqwest::Client::builder(), config);
        if config.no_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;
        Ok(Self::new(client, base))
    }

    pub fn new(client: reqwest::Client, base: UpstreamBase) -> Self {
        Self { client, base }
    }

    pub fn base(&self) -> &UpstreamBase {
        &self.base
    }

    /// Issue one upstream call mirroring the inbound method and body.
    ///
    /// Any upstream status, including 4xx/5xx, is a successful relay.
    pub async fn relay(&self, request: RelayRequest) -> Result<RelayResponse, ApiError> {
        let url = self.base.segments_url(&request.suffix);

        tracing::debug!(
            method = %request.method,
            url = %url,
            body_len = request.body.len(),
            "Relaying to upstream"
        );

        let response = self
            .client
            .request(request.method, url.as_str())
            .header(AUTHORIZATION, request.token.bearer())
            .header(CONTENT_TYPE, RELAY_CONTENT_TYPE)
            .body(request.body)
            .send()
            .await
            .map_err(|e| ApiError::from_upstream(e, &url))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::from_upstream(e, &url))?;

        tracing::debug!(status = %status, body_len = body.len(), "Upstream responded");

        Ok(RelayResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn test_from_config_requires_base() {
        let err = RelayClient::from_config(&UpstreamConfig::default()).unwrap_err();
        assert!(matches!(err, RelayError::MissingBase));

        let config = UpstreamConfig {
            base_url: Some("not a url".into()),
            ..Default::default()
        };
        assert!(matches!(
            RelayClient::from_config(&config),
            Err(RelayError::InvalidBase(_))
        ));
    }

    #[tokio::test]
    async fn test_relay_response_forces_json() {
        let response = RelayResponse {
            status: StatusCode::IM_A_TEAPOT,
            body: Bytes::from_static(b"<html>nope</html>"),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"<html>nope</html>");
    }
}
