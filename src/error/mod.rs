use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::extract::encoding::DecodeError;
use crate::fetch::FetchError;
use crate::response::PrettyJson;

pub const MISSING_URL_MESSAGE: &str = "No URL was found.";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{}", MISSING_URL_MESSAGE)]
    MissingUrl,

    #[error("Failed to fetch URL: {0}")]
    Fetch(String),

    #[error("Failed to decode page: {0}")]
    Decode(String),

    #[error("Internal server error")]
    Internal,
}

impl From<FetchError> for AppError {
    fn from(e: FetchError) -> Self {
        AppError::Fetch(e.to_string())
    }
}

impl From<DecodeError> for AppError {
    fn from(e: DecodeError) -> Self {
        AppError::Decode(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::MissingUrl => StatusCode::BAD_REQUEST,
            AppError::Fetch(msg) => {
                tracing::warn!(error = %msg, "Page fetch failed");
                StatusCode::BAD_GATEWAY
            }
            AppError::Decode(msg) => {
                tracing::warn!(error = %msg, "Page decode failed");
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Internal => {
                tracing::error!("Internal server error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, PrettyJson(json!({ "error": self.to_string() }))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
