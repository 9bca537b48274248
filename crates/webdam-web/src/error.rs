use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use webdam_core::{CoreError, RemoteError};

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Unprocessable(String),
    BadGateway(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Unprocessable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::BadGateway(msg) => {
                tracing::warn!("Webdam request failed: {}", msg);
                (StatusCode::BAD_GATEWAY, msg)
            }
            AppError::Internal(msg) => {
                // Log the real error server-side, return generic message to client
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = ErrorBody {
            success: false,
            error: message,
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(e: CoreError) -> Self {
        let message = e.to_string();
        match e {
            CoreError::FolderFetch {
                source: RemoteError::NotFound(_),
                ..
            }
            | CoreError::Remote(RemoteError::NotFound(_)) => AppError::NotFound(message),
            CoreError::FolderFetch { .. } | CoreError::Remote(_) => AppError::BadGateway(message),
            CoreError::InvalidTrail(_) => AppError::BadRequest(message),
            CoreError::TooManyAssets { .. } => AppError::Unprocessable(message),
            _ => AppError::Internal(message),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        AppError::Internal(format!("{e:#}"))
    }
}
