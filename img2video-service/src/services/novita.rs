//! Novita AI image-to-video client.
//!
//! One call per inbound request: credential check, payload derivation, a single POST, and
//! response normalization. No retries.

use crate::config::VendorConfig;
use crate::dtos::{GenericTaskResponse, Img2VideoRequest};
use crate::services::metrics::record_vendor_call;
use crate::services::payload::{build_vendor_payload, PayloadError};
use crate::services::result::normalize_response;
use reqwest::{header, Client};
use secrecy::ExposeSecret;
use serde_json::{json, Value};
use service_core::error::AppError;
use std::time::Instant;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("NOVITA_API_KEY not configured")]
    NotConfigured,

    #[error(transparent)]
    InvalidRequest(#[from] PayloadError),

    #[error("Vendor request error: {0}")]
    Unavailable(String),

    #[error("Vendor returned status {status}")]
    Vendor { status: u16, body: Value },

    #[error("Vendor returned an unparseable response: {0}")]
    InvalidResponse(String),
}

impl From<DispatchError> for AppError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::NotConfigured => AppError::ConfigError(anyhow::anyhow!("{}", err)),
            DispatchError::InvalidRequest(e) => AppError::BadRequest(anyhow::Error::new(e)),
            DispatchError::Unavailable(_) | DispatchError::InvalidResponse(_) => {
                AppError::BadGateway(err.to_string())
            }
            DispatchError::Vendor { status, body } => AppError::Upstream { status, body },
        }
    }
}

#[derive(Clone)]
pub struct NovitaClient {
    client: Client,
    config: VendorConfig,
}

impl NovitaClient {
    pub fn new(config: VendorConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// Submit an image-to-video generation and normalize the vendor's answer.
    pub async fn img2video(
        &self,
        request: &Img2VideoRequest,
    ) -> Result<GenericTaskResponse, DispatchError> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or(DispatchError::NotConfigured)?;

        let payload = build_vendor_payload(request)?;

        tracing::debug!(
            endpoint = %self.config.endpoint,
            image_url = payload.contains_key("image_url"),
            image_base64 = payload.contains_key("image_base64"),
            "Sending img2video request to Novita"
        );

        let started = Instant::now();
        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(api_key.expose_secret())
            .header(header::CONTENT_TYPE, "application/json")
            .timeout(self.config.timeout)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to reach Novita");
                record_vendor_call("unavailable", started.elapsed());
                DispatchError::Unavailable(e.to_string())
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::error!(error = %e, status = %status, "Failed to read Novita response body");
            record_vendor_call("unavailable", started.elapsed());
            DispatchError::Unavailable(e.to_string())
        })?;

        if status.as_u16() >= 400 {
            tracing::warn!(status = %status, body = %body, "Novita returned an error");
            record_vendor_call("vendor_error", started.elapsed());
            return Err(DispatchError::Vendor {
                status: status.as_u16(),
                body: error_body(&body),
            });
        }

        let data: Value = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(error = %e, status = %status, "Novita returned non-JSON body");
            record_vendor_call("invalid_response", started.elapsed());
            DispatchError::InvalidResponse(e.to_string())
        })?;

        let result = normalize_response(data);
        record_vendor_call(result.status.as_str(), started.elapsed());

        tracing::info!(
            status = %result.status,
            task_id = ?result.task_id,
            result_url = ?result.result_url,
            "Novita img2video request completed"
        );

        Ok(result)
    }
}

/// Vendor error bodies are relayed as JSON when they parse, else wrapped as `{"text": ...}`.
fn error_body(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| json!({ "text": body }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_VENDOR_URL;
    use axum::http::StatusCode;

    #[test]
    fn test_is_configured() {
        let client = NovitaClient::new(VendorConfig::new(Some("sk".into()), DEFAULT_VENDOR_URL));
        assert!(client.is_configured());

        let client = NovitaClient::new(VendorConfig::new(None, DEFAULT_VENDOR_URL));
        assert!(!client.is_configured());
    }

    #[test]
    fn test_error_body_json_or_text() {
        assert_eq!(error_body(r#"{"error":"overloaded"}"#), json!({"error": "overloaded"}));
        assert_eq!(error_body("Bad Gateway"), json!({"text": "Bad Gateway"}));
    }

    #[test]
    fn test_dispatch_error_status_mapping() {
        let cases = [
            (DispatchError::NotConfigured, StatusCode::INTERNAL_SERVER_ERROR),
            (
                DispatchError::InvalidRequest(PayloadError::MissingImage),
                StatusCode::BAD_REQUEST,
            ),
            (
                DispatchError::InvalidRequest(PayloadError::MalformedDataUrl),
                StatusCode::BAD_REQUEST,
            ),
            (
                DispatchError::Unavailable("connection refused".into()),
                StatusCode::BAD_GATEWAY,
            ),
            (
                DispatchError::Vendor {
                    status: 429,
                    body: json!({}),
                },
                StatusCode::TOO_MANY_REQUESTS,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(AppError::from(err).status_code(), expected);
        }
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_validation() {
        let client = NovitaClient::new(VendorConfig::new(None, DEFAULT_VENDOR_URL));
        let request: Img2VideoRequest =
            serde_json::from_value(json!({ "prompt": "no image either" })).unwrap();

        let err = client.img2video(&request).await.unwrap_err();
        assert!(matches!(err, DispatchError::NotConfigured));
    }

    #[tokio::test]
    async fn test_empty_key_is_not_configured() {
        let client = NovitaClient::new(VendorConfig::new(Some(String::new()), DEFAULT_VENDOR_URL));
        assert!(!client.is_configured());
        assert_eq!(client.endpoint(), DEFAULT_VENDOR_URL);

        let request: Img2VideoRequest = serde_json::from_value(json!({
            "image_url": "https://example.com/cat.png",
            "prompt": "p"
        }))
        .unwrap();

        let err = client.img2video(&request).await.unwrap_err();
        assert!(matches!(err, DispatchError::NotConfigured));
    }
}
