use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::Value;
use sporlmix::{SpotifyError, api::CodeHandoff, server::CallbackServer};
use tokio::sync::oneshot;

fn http() -> Client {
    Client::builder()
        .no_proxy()
        .build()
        .expect("Failed to create HTTP client")
}

async fn start_server() -> CallbackServer {
    CallbackServer::start("127.0.0.1:0".parse().expect("addr"))
        .await
        .expect("server starts")
}

#[tokio::test]
async fn test_callback_hands_off_code() {
    let server = start_server().await;
    let url = format!("http://{}/callback?code=AUTH123", server.local_addr());

    let request = tokio::spawn(async move { http().get(url).send().await });
    let code = server
        .wait_for_code(Duration::from_secs(5))
        .await
        .expect("code received");

    assert_eq!(code, "AUTH123");
    let response = request.await.expect("join").expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_callback_provider_error() {
    let server = start_server().await;
    let url = format!("http://{}/callback?error=access_denied", server.local_addr());

    let request = tokio::spawn(async move { http().get(url).send().await });
    let err = server
        .wait_for_code(Duration::from_secs(5))
        .await
        .unwrap_err();

    match &err {
        SpotifyError::Callback(msg) => assert_eq!(msg, "access_denied"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.requires_login());
    let response = request.await.expect("join").expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_callback_without_code_keeps_waiting() {
    let server = start_server().await;
    let addr = server.local_addr();

    let response = http()
        .get(format!("http://{addr}/callback"))
        .send()
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let request = tokio::spawn(async move {
        http()
            .get(format!("http://{addr}/callback?code=LATE"))
            .send()
            .await
    });
    let code = server
        .wait_for_code(Duration::from_secs(5))
        .await
        .expect("code received");

    assert_eq!(code, "LATE");
    request.await.expect("join").expect("response");
}

#[tokio::test]
async fn test_callback_timeout() {
    let server = start_server().await;

    let err = server
        .wait_for_code(Duration::from_millis(50))
        .await
        .unwrap_err();

    assert!(matches!(err, SpotifyError::CallbackTimeout(d) if d == Duration::from_millis(50)));
}

#[tokio::test]
async fn test_health() {
    let server = start_server().await;

    let body: Value = http()
        .get(format!("http://{}/health", server.local_addr()))
        .send()
        .await
        .expect("response")
        .json()
        .await
        .expect("json");

    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "sporlmix");
}

#[tokio::test]
async fn test_code_handoff_delivers_once() {
    let (tx, rx) = oneshot::channel();
    let handoff = CodeHandoff::new(tx);

    assert!(handoff.deliver(Ok("first".to_string())).await);
    assert!(!handoff.deliver(Ok("second".to_string())).await);

    assert_eq!(rx.await.expect("received"), Ok("first".to_string()));
}
