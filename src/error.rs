use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{response::ApiResponse, storage::StorageError, validation::FieldErrors};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed")]
    Validation(FieldErrors),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    /// A store write failed after validation passed.
    #[error("{0}")]
    Persistence(String),

    #[error("Failed to store image")]
    Storage(#[from] StorageError),

    #[error("Database error")]
    OrmError(#[from] sea_orm::DbErr),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Persistence(_) => StatusCode::BAD_REQUEST,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::OrmError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            AppError::Validation(errors) => {
                let body = ApiResponse {
                    status: false,
                    message: "Validation failed".to_string(),
                    data: Some(errors),
                };
                (status, Json(body)).into_response()
            }
            other => {
                if status.is_server_error() {
                    tracing::error!(error = ?other, "request failed");
                }
                (status, Json(ApiResponse::<()>::failure(other.to_string()))).into_response()
            }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
