use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use shared_types::ErrorResponse;

use crate::storage::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Maps a store failure onto a response. Storage details are logged and
    /// replaced by `context` so they never reach the client.
    pub fn from_store(err: StoreError, context: impl Into<String>) -> Self {
        match err {
            StoreError::NotFound { label, .. } => ApiError::NotFound(format!("{} not found", label)),
            StoreError::Validation(msg) => ApiError::BadRequest(msg),
            other => {
                let context = context.into();
                tracing::error!("{}: {}", context, other);
                ApiError::Internal(context)
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse::new(self.to_string()))
    }
}
