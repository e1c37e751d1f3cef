//! Typed errors and HTTP mapping.

use crate::service::ValidationErrors;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

pub const PRODUCT_NOT_FOUND: &str = "Product not found";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {var}: '{value}'")]
    InvalidVar { var: &'static str, value: String },
    #[error("invalid DATABASE_URL: {0}")]
    DatabaseUrl(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Product not found")]
    NotFound,
    #[error("validation failed: {} error(s)", .0.len())]
    Validation(ValidationErrors),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

/// Body for persistence and runtime failures: `{ status, message, error }`.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    pub status: &'static str,
    pub message: String,
    pub error: ErrorDetail,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorDetail {
    pub code: &'static str,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct NotFoundBody {
    pub message: &'static str,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Config(_) | AppError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            AppError::NotFound => (
                status,
                Json(NotFoundBody {
                    message: PRODUCT_NOT_FOUND,
                }),
            )
                .into_response(),
            AppError::Validation(errors) => (status, Json(errors)).into_response(),
            other => {
                let code = match &other {
                    AppError::Config(_) => "config_error",
                    AppError::BadRequest(_) => "bad_request",
                    AppError::PayloadTooLarge(_) => "payload_too_large",
                    _ => "database_error",
                };
                if status.is_server_error() {
                    tracing::error!(error = %other, "request failed");
                }
                let body = ErrorBody {
                    status: "error",
                    message: other.to_string(),
                    error: ErrorDetail { code },
                };
                (status, Json(body)).into_response()
            }
        }
    }
}
