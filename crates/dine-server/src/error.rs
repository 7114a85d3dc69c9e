//! Client-facing error envelope
//!
//! Every failure becomes exactly one response with a `{"message": ...}` body.
//! Store faults are logged here and replaced by a fixed message.

use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::storage::StoreError;

pub const STORE_FAULT_MESSAGE: &str = "Some error occurred";

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The query matched zero rows
    #[error("{0}")]
    NotFound(String),

    /// A path or query parameter could not be parsed
    #[error("{0}")]
    InvalidParameter(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        ApiError::NotFound(msg.into())
    }

    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        ApiError::InvalidParameter(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidParameter(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::InvalidParameter(rejection.body_text())
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::Store(e) => {
                tracing::error!("Catalog query failed: {}", e);
                STORE_FAULT_MESSAGE.to_string()
            }
            other => other.to_string(),
        };

        (status, Json(MessageResponse { message })).into_response()
    }
}
