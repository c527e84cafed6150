//! API route configuration.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::state::AppState;

/// Room left above the file cap for multipart framing and other fields.
const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Creates the API router with all routes configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    let body_limit = state
        .config
        .max_upload_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))

        // Storage
        .route(
            "/api/pinata/upload",
            post(handlers::upload_file).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route("/api/pinata/fetchHash", get(handlers::fetch_file))

        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use synapse_core::types::Credentials;
    use synapse_gateway::GatewayConfig;
    use synapse_ipfs::PinataConfig;
    use tempfile::{tempdir, TempDir};
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::state::ApiConfig;

    const BOUNDARY: &str = "synapse-test-boundary";

    fn local_app() -> (Router, TempDir) {
        let dir = tempdir().unwrap();
        let config = ApiConfig {
            gateway: GatewayConfig::default().with_upload_dir(dir.path().join("uploads")),
            ..ApiConfig::default()
        };
        let state = Arc::new(AppState::new(config).unwrap());
        (create_router(state), dir)
    }

    fn remote_app(server: &MockServer) -> (Router, TempDir) {
        let dir = tempdir().unwrap();
        let config = ApiConfig {
            credentials: Some(Credentials::new("key", "secret")),
            gateway: GatewayConfig::default()
                .with_upload_dir(dir.path().join("uploads"))
                .with_pinata(
                    PinataConfig::default()
                        .with_endpoint(format!("{}/pinning/pinFileToIPFS", server.uri())),
                ),
            ..ApiConfig::default()
        };
        let state = Arc::new(AppState::new(config).unwrap());
        (create_router(state), dir)
    }

    fn multipart_request(field: &str, filename: &str, data: &[u8]) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/api/pinata/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let (app, _dir) = local_app();

        let response = app.oneshot(get_request("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["storage"], "local");
    }

    #[tokio::test]
    async fn test_local_upload_and_fetch() {
        let (app, dir) = local_app();

        let response = app
            .clone()
            .oneshot(multipart_request("file", "report.csv", b"12345"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        let address = json["result"].as_str().unwrap().to_string();
        let prefix = format!("local:{}/", dir.path().join("uploads").display());
        assert!(address.starts_with(&prefix));
        assert!(address.ends_with("-report.csv"));
        assert_eq!(json["filename"], "report.csv");
        assert_eq!(json["size"], 5);

        let response = app
            .oneshot(get_request(&format!("/api/pinata/fetchHash?hash={}", address)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/octet-stream"
        );
        assert_eq!(body_bytes(response).await, b"12345");
    }

    #[tokio::test]
    async fn test_zero_byte_upload() {
        let (app, _dir) = local_app();

        let response = app
            .clone()
            .oneshot(multipart_request("file", "empty.bin", b""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["size"], 0);

        let address = json["result"].as_str().unwrap();
        let response = app
            .oneshot(get_request(&format!("/api/pinata/fetchHash?hash={}", address)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_bytes(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_upload_without_file_field() {
        let (app, _dir) = local_app();

        let response = app
            .oneshot(multipart_request("other", "a.txt", b"x"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["message"], "file is required");
    }

    #[tokio::test]
    async fn test_upload_without_multipart_body() {
        let (app, _dir) = local_app();

        let request = Request::builder()
            .method("POST")
            .uri("/api/pinata/upload")
            .body(Body::from("not multipart"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_too_large() {
        let dir = tempdir().unwrap();
        let config = ApiConfig {
            gateway: GatewayConfig::default().with_upload_dir(dir.path()),
            max_upload_bytes: 4,
            ..ApiConfig::default()
        };
        let app = create_router(Arc::new(AppState::new(config).unwrap()));

        let response = app
            .oneshot(multipart_request("file", "big.bin", b"0123456789"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["message"], "file too large");
    }

    #[tokio::test]
    async fn test_fetch_requires_hash() {
        let (app, _dir) = local_app();

        let response = app
            .clone()
            .oneshot(get_request("/api/pinata/fetchHash"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .oneshot(get_request("/api/pinata/fetchHash?hash="))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["message"], "hash is required");
    }

    #[tokio::test]
    async fn test_fetch_missing_local_file() {
        let (app, _dir) = local_app();

        let response = app
            .oneshot(get_request("/api/pinata/fetchHash?hash=local:/nonexistent/path"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"]["message"], "local file not found");
    }

    #[tokio::test]
    async fn test_fetch_remote_returns_link() {
        let (app, _dir) = local_app();

        let response = app
            .oneshot(get_request("/api/pinata/fetchHash?hash=QmABC"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["link"], "https://gateway.pinata.cloud/ipfs/QmABC");
    }

    #[tokio::test]
    async fn test_remote_upload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/pinning/pinFileToIPFS"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "IpfsHash": "QmABC" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let (app, _dir) = remote_app(&server);

        let response = app
            .clone()
            .oneshot(multipart_request("file", "report.csv", b"12345"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["result"], "QmABC");

        let response = app.oneshot(get_request("/health")).await.unwrap();
        assert_eq!(body_json(response).await["storage"], "remote");
    }

    #[tokio::test]
    async fn test_remote_failure_hides_upstream_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("rate limited"))
            .expect(1)
            .mount(&server)
            .await;

        let (app, _dir) = remote_app(&server);

        let response = app
            .oneshot(multipart_request("file", "report.csv", b"12345"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let text = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(!text.contains("rate limited"));
    }
}
