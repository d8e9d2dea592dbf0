//! Tests for the license API client against an in-process server.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;

use super::{Absent, LicenseApiClient, LicenseCredentials};
use crate::config::UpdaterConfig;

type SeenQueries = Arc<Mutex<Vec<HashMap<String, String>>>>;

/// Serve `body` with `status` on `/api/v1/info`, recording the query of every request.
async fn spawn_license_server(status: StatusCode, body: &'static str) -> (SocketAddr, SeenQueries) {
    let seen: SeenQueries = Arc::new(Mutex::new(Vec::new()));

    let app = Router::new()
        .route(
            "/api/v1/info",
            get(
                move |State(seen): State<SeenQueries>, Query(query): Query<HashMap<String, String>>| async move {
                    seen.lock().unwrap().push(query);
                    (status, body)
                },
            ),
        )
        .with_state(seen.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, seen)
}

fn client_for(addr: SocketAddr) -> LicenseApiClient {
    LicenseApiClient::new(UpdaterConfig::with_endpoint(format!("http://{addr}/api/v1")))
}

fn credentials() -> LicenseCredentials {
    LicenseCredentials::new("42", "jane+shop@example.com", "KEY 123&x")
}

#[test]
fn info_url_encodes_credentials_as_query() {
    let client = LicenseApiClient::new(UpdaterConfig::with_endpoint("https://licenses.example.com/api/v1/"));
    let url = client.info_url(&credentials()).unwrap();

    assert_eq!(
        url.as_str(),
        "https://licenses.example.com/api/v1/info?p=42&e=jane%2Bshop%40example.com&l=KEY+123%26x"
    );
}

#[test]
fn info_url_rejects_invalid_endpoint() {
    let client = LicenseApiClient::new(UpdaterConfig::with_endpoint("not a url"));
    assert!(matches!(
        client.info_url(&credentials()),
        Err(Absent::TransportFailure(_))
    ));
}

#[tokio::test]
async fn fetch_sends_credentials_and_parses_response() {
    let (addr, seen) = spawn_license_server(
        StatusCode::OK,
        r#"{"version": "3.2.0", "package_url": "https://x/y.zip", "name": "Example"}"#,
    )
    .await;

    let info = client_for(addr).fetch_license_info(&credentials()).await.unwrap();
    assert_eq!(info.version.as_deref(), Some("3.2.0"));
    assert_eq!(info.package_url.as_deref(), Some("https://x/y.zip"));
    assert_eq!(info.name.as_deref(), Some("Example"));

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].get("p").map(String::as_str), Some("42"));
    assert_eq!(seen[0].get("e").map(String::as_str), Some("jane+shop@example.com"));
    assert_eq!(seen[0].get("l").map(String::as_str), Some("KEY 123&x"));
}

#[tokio::test]
async fn fetch_reports_api_error() {
    let (addr, _) = spawn_license_server(StatusCode::OK, r#"{"error": "Invalid license key"}"#).await;

    let result = client_for(addr).fetch_license_info(&credentials()).await;
    assert_eq!(result, Err(Absent::ApiReportedError("Invalid license key".to_string())));
}

#[tokio::test]
async fn fetch_reads_error_body_regardless_of_status() {
    let (addr, _) = spawn_license_server(StatusCode::FORBIDDEN, r#"{"error": "License expired"}"#).await;

    let result = client_for(addr).fetch_license_info(&credentials()).await;
    assert_eq!(result, Err(Absent::ApiReportedError("License expired".to_string())));
}

#[tokio::test]
async fn fetch_classifies_html_as_malformed() {
    let (addr, _) = spawn_license_server(StatusCode::BAD_GATEWAY, "<html>Bad Gateway</html>").await;

    let result = client_for(addr).fetch_license_info(&credentials()).await;
    assert!(matches!(result, Err(Absent::MalformedResponse(_))));
}

#[tokio::test]
async fn fetch_reports_transport_failure_when_server_is_down() {
    // Grab a free port, then close it again
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = client_for(addr).fetch_license_info(&credentials()).await;
    assert!(matches!(result, Err(Absent::TransportFailure(_))));
}
