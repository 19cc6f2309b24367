//! Tests against a live socket, checking what actually goes on the wire.

use std::sync::Arc;

use axum::{extract::Query, routing::get, Router};
use serde::Deserialize;
use serde_json::json;

use api_responder::config::ApiConfig;
use api_responder::http::{ApiController, ApiError, ApiResponse, ResponseSettings};
use api_responder::{HttpServer, Shutdown};

mod common;

#[derive(Deserialize)]
struct StatusQuery {
    code: u16,
}

async fn echo_code(
    Query(query): Query<StatusQuery>,
    api: ApiController,
) -> Result<ApiResponse, ApiError> {
    api.send_data(&json!({"code": query.code}), Some(query.code), &[])
}

/// Router that answers with whatever status the `code` query parameter names.
fn status_router() -> Router {
    Router::new()
        .route("/code", get(echo_code))
        .with_state(Arc::new(ResponseSettings::default()))
}

fn status_line(response: &str) -> &str {
    response.lines().next().unwrap()
}

#[tokio::test]
async fn reason_phrases_follow_the_table() {
    let shutdown = Shutdown::new();
    let addr = common::serve(status_router(), &shutdown).await;

    let cases = [
        (200, "HTTP/1.1 200 OK"),
        (400, "HTTP/1.1 400 Bad Request"),
        (401, "HTTP/1.1 401 Unauthorized"),
        (402, "HTTP/1.1 402 Payment Required"),
        (403, "HTTP/1.1 403 Forbidden"),
        (404, "HTTP/1.1 404 Not Found"),
        (500, "HTTP/1.1 500 Internal Server Error"),
        (501, "HTTP/1.1 501 Not Implemented"),
    ];
    for (code, expected) in cases {
        let response = common::raw_get(addr, &format!("/code?code={code}")).await;
        assert_eq!(status_line(&response), expected);
    }

    shutdown.trigger();
}

#[tokio::test]
async fn unknown_codes_have_an_empty_reason() {
    let shutdown = Shutdown::new();
    let addr = common::serve(status_router(), &shutdown).await;

    for code in [201, 418, 503] {
        let response = common::raw_get(addr, &format!("/code?code={code}")).await;
        assert_eq!(status_line(&response).trim_end(), format!("HTTP/1.1 {code}"));
    }

    shutdown.trigger();
}

#[tokio::test]
async fn http_server_serves_both_formats() {
    let shutdown = Shutdown::new();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(ApiConfig::default());
    let server_shutdown = shutdown.subscribe();

    let handle = tokio::spawn(async move { server.run(listener, server_shutdown).await });

    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap();

    let res = client
        .get(format!("http://{addr}/status"))
        .send()
        .await
        .expect("server unreachable");
    assert_eq!(res.status(), 200);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], "operational");

    let res = client
        .get(format!("http://{addr}/restricted?format=xml"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 403);
    assert!(res.text().await.unwrap().contains("<status>403</status>"));

    shutdown.trigger();
    assert!(handle.await.unwrap().is_ok());
}
