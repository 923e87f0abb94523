//! Full server over TCP: bind, serve, relay, shut down.

use std::time::Duration;

use immersa_gateway::lifecycle::Shutdown;

mod common;

use common::{build_server, sessions_with_token, test_config, MockReply, MockUpstream};

#[tokio::test]
async fn test_serves_over_tcp_and_shuts_down() {
    let upstream = MockUpstream::start(MockReply::json(201, r#"{"id":"seg-1"}"#)).await;
    let server = build_server(test_config(&upstream.base_url()), sessions_with_token("s1", "abc123"));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let handle = tokio::spawn(async move { server.run(listener, server_shutdown).await });

    let client = reqwest::Client::builder().no_proxy().build().unwrap();

    let res = client
        .post(format!("http://{}/immersa/segments/regions", addr))
        .header("cookie", "session=s1")
        .body(r#"{"name":"EU"}"#)
        .send()
        .await
        .expect("gateway unreachable");

    assert_eq!(res.status(), 201);
    assert_eq!(res.headers()["content-type"], "application/json");
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(res.text().await.unwrap(), r#"{"id":"seg-1"}"#);

    let outbound = &upstream.requests()[0];
    assert_eq!(outbound.uri, "/segments/regions");
    assert_eq!(outbound.headers["authorization"], "Bearer abc123");

    let res = client
        .get(format!("http://{}/immersa/", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server did not stop")
        .unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_inbound_request_timeout() {
    let upstream = MockUpstream::start(MockReply {
        delay: Duration::from_secs(3),
        ..MockReply::json(200, "{}")
    })
    .await;
    let mut config = test_config(&upstream.base_url());
    config.timeouts.request_secs = Some(1);
    let router = common::gateway(config, sessions_with_token("s1", "t"));

    let request = axum::http::Request::builder()
        .uri("/immersa/segments/slow")
        .header("cookie", "session=s1")
        .body(axum::body::Body::empty())
        .unwrap();
    let (status, headers, body) = common::send(&router, request).await;
    assert_eq!(status, axum::http::StatusCode::REQUEST_TIMEOUT);
    assert_eq!(headers["content-type"], "application/json");
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body, serde_json::json!({ "error": "Request timed out" }));
}
