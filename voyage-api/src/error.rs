use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use voyage_core::TripError;

#[derive(Debug)]
pub enum AppError {
    ValidationError(String),
    NotFoundError(String),
    BadGateway(String),
    RequestTimeout,
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::RequestTimeout => {
                (StatusCode::REQUEST_TIMEOUT, "request timed out".to_string())
            }
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<TripError> for AppError {
    fn from(err: TripError) -> Self {
        match err {
            TripError::Validation(msg) => AppError::ValidationError(msg),
            TripError::NotFound(_) => AppError::NotFoundError(err.to_string()),
            TripError::SubBookingNotFound { .. } | TripError::Downstream { .. } => {
                AppError::BadGateway(err.to_string())
            }
            TripError::Persistence(_) => AppError::InternalServerError(err.to_string()),
        }
    }
}
