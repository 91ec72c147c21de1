use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::services::boot::BootError;
use crate::services::hostname::HostResolveError;
use crate::services::store::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not acceptable: {0}")]
    NotAcceptable(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Boot(#[from] BootError),

    #[error(transparent)]
    HostResolve(#[from] HostResolveError),
}

#[derive(Serialize)]
struct ErrorResponse {
    err: String,
}

impl AppError {
    /// Status code and client-facing message for this error
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotAcceptable(msg) => (StatusCode::NOT_ACCEPTABLE, msg.clone()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            AppError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Database error".to_string(),
                )
            }
            AppError::Store(e) => {
                tracing::error!("Store error: {}", e);
                (StatusCode::SERVICE_UNAVAILABLE, e.to_string())
            }
            AppError::Boot(e) => {
                let status = match e {
                    BootError::UnknownMachine(_) => StatusCode::NOT_FOUND,
                    BootError::DanglingBootConfigReference { .. } => StatusCode::CONFLICT,
                    BootError::Template { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                    BootError::UpstreamStoreFailure(_) => {
                        tracing::error!("Boot resolution store failure: {}", e);
                        StatusCode::SERVICE_UNAVAILABLE
                    }
                };
                (status, e.to_string())
            }
            AppError::HostResolve(e) => (StatusCode::NOT_FOUND, e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, Json(ErrorResponse { err: message })).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
