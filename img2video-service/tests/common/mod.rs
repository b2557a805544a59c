#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use img2video_service::config::{Img2VideoConfig, VendorConfig};
use img2video_service::{build_router, AppState, Application};
use serde_json::Value;
use service_core::config::Config as CoreConfig;
use tower::ServiceExt;

pub const TEST_API_KEY: &str = "test-novita-key";
pub const VENDOR_PATH: &str = "/v1/img2video";

pub fn test_config(api_key: Option<&str>, vendor_endpoint: &str) -> Img2VideoConfig {
    Img2VideoConfig {
        common: CoreConfig {
            host: "127.0.0.1".to_string(),
            port: 0, // Random port
            ..CoreConfig::default()
        },
        vendor: VendorConfig::new(api_key.map(str::to_string), vendor_endpoint),
    }
}

/// Router wired to a vendor at `vendor_base` (typically a wiremock server URI).
pub fn test_router(api_key: Option<&str>, vendor_base: &str) -> Router {
    let endpoint = format!("{}{}", vendor_base, VENDOR_PATH);
    build_router(AppState::new(test_config(api_key, &endpoint)))
}

/// POST `body` to `/v1/img2video` and return status plus parsed JSON body.
pub async fn post_img2video(router: Router, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/img2video")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, json)
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
}

impl TestApp {
    pub async fn spawn(api_key: Option<&str>, vendor_base: &str) -> Self {
        let endpoint = format!("{}{}", vendor_base, VENDOR_PATH);
        let app = Application::build(test_config(api_key, &endpoint))
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        }

        TestApp { address, port }
    }
}
