//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::{to_bytes, Body, Bytes},
    http::{header::CONTENT_TYPE, HeaderMap, Method, Request, Response, StatusCode},
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceExt;

use immersa_gateway::relay::RelayClient;
use immersa_gateway::session::{MemorySessionStore, SessionId, SessionRecord};
use immersa_gateway::templates::AppShell;
use immersa_gateway::{GatewayConfig, HttpServer};

/// A request as the mock upstream saw it.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: Method,
    pub uri: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// What the mock upstream answers with.
#[derive(Debug, Clone)]
pub struct MockReply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
    pub delay: Duration,
}

impl MockReply {
    pub fn json(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: body.as_bytes().to_vec(),
            delay: Duration::ZERO,
        }
    }
}

/// A LiveOps stand-in that records every request it receives.
pub struct MockUpstream {
    pub addr: SocketAddr,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl MockUpstream {
    pub async fn start(reply: MockReply) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let captured = Arc::new(Mutex::new(Vec::new()));

        let sink = captured.clone();
        let app = Router::new().fallback(move |request: Request<Body>| {
            let sink = sink.clone();
            let reply = reply.clone();
            async move {
                let (parts, body) = request.into_parts();
                let body = to_bytes(body, usize::MAX).await.unwrap();
                sink.lock().unwrap().push(CapturedRequest {
                    method: parts.method,
                    uri: parts.uri.to_string(),
                    headers: parts.headers,
                    body,
                });

                if !reply.delay.is_zero() {
                    tokio::time::sleep(reply.delay).await;
                }

                Response::builder()
                    .status(reply.status)
                    .header(CONTENT_TYPE, reply.content_type)
                    .body(Body::from(reply.body))
                    .unwrap()
            }
        });

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, captured }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.captured.lock().unwrap().clone()
    }
}

/// An address nothing listens on.
#[allow(dead_code)]
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn test_config(base_url: &str) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.upstream.base_url = Some(base_url.to_string());
    config.upstream.no_proxy = true;
    config
}

/// Session store holding `session_id` → `{"oauth": [token]}`.
pub fn sessions_with_token(session_id: &str, token: &str) -> MemorySessionStore {
    let store = MemorySessionStore::default();
    store.insert(SessionId::new(session_id), SessionRecord::with_token("oauth", token));
    store
}

pub fn build_server(config: GatewayConfig, sessions: MemorySessionStore) -> HttpServer {
    let relay = RelayClient::from_config(&config.upstream).unwrap();
    let shell = AppShell::from_config(&config).unwrap();
    HttpServer::new(config, relay, Arc::new(sessions), shell)
}

pub fn gateway(config: GatewayConfig, sessions: MemorySessionStore) -> Router {
    build_server(config, sessions).router()
}

/// Drive one request through the router.
pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Bytes) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, body)
}
