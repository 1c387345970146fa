use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use utoipa::ToSchema;

use crate::store::StoreError;

#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    pub message: String,
}

/// Failure taxonomy for the HTTP surface. Missing fields and unknown note
/// ids both map to 400 — clients of the original service branch on that
/// status plus the message text, so it is kept as-is.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Conflict(&'static str),
    Unauthorized,
    Store(StoreError),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(ErrorBody { message })).into_response()
            }
            ApiError::Conflict(message) => (
                StatusCode::CONFLICT,
                Json(ErrorBody {
                    message: message.to_string(),
                }),
            )
                .into_response(),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorBody {
                    message: "Unauthorized".to_string(),
                }),
            )
                .into_response(),
            ApiError::Store(e) => {
                tracing::error!("store error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody {
                        message: "Internal server error".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
