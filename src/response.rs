use axum::{
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::AppError;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Like `axum::Json`, but pretty-printed with two-space indentation and an
/// explicit `charset=utf-8` on the content type.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrettyJson<T>(pub T);

impl<T: Serialize> IntoResponse for PrettyJson<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec_pretty(&self.0) {
            Ok(body) => (
                [(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static(JSON_CONTENT_TYPE),
                )],
                body,
            )
                .into_response(),
            Err(e) => {
                tracing::error!(error = ?e, "Failed to serialize response body");
                AppError::Internal.into_response()
            }
        }
    }
}
