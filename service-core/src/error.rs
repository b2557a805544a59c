use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(anyhow::Error),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),

    #[error("Bad Gateway: {0}")]
    BadGateway(String),

    /// An upstream service answered with an error status; its status and body are relayed.
    #[error("Upstream error {status}: {body}")]
    Upstream {
        status: u16,
        body: serde_json::Value,
    },

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vendor_error: Option<serde_json::Value>,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::InternalError(_) | AppError::ConfigError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            AppError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            AppError::ValidationError(err) => ErrorResponse {
                error: "Validation error".to_string(),
                details: Some(err.to_string()),
                vendor_error: None,
            },
            AppError::BadRequest(err) => ErrorResponse {
                error: err.to_string(),
                details: None,
                vendor_error: None,
            },
            AppError::InternalError(err) => {
                tracing::error!(error = ?err, "Internal server error");
                ErrorResponse {
                    error: "Internal server error".to_string(),
                    details: None,
                    vendor_error: None,
                }
            }
            AppError::BadGateway(msg) => ErrorResponse {
                error: format!("Bad Gateway: {}", msg),
                details: None,
                vendor_error: None,
            },
            AppError::Upstream { status: code, body } => ErrorResponse {
                error: format!("Upstream returned status {}", code),
                details: None,
                vendor_error: Some(body),
            },
            AppError::ConfigError(err) => ErrorResponse {
                error: "Configuration error".to_string(),
                details: Some(err.to_string()),
                vendor_error: None,
            },
        };

        (status, Json(body)).into_response()
    }
}
