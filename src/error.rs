//! Error types and error handling for both services
//!
//! Every handler error is an `AppError`. The wiki answers with plain text,
//! the catalog with a `{"message": ...}` JSON body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Reading or writing a page file failed
    #[error("{0}")]
    Storage(#[from] std::io::Error),

    /// Rendering an HTML template failed
    #[error("{0}")]
    Template(#[from] askama::Error),

    /// Page name cannot be mapped to a file
    #[error("invalid page name: {0:?}")]
    InvalidPageName(String),

    /// No catalog item with the given id
    #[error("item not found")]
    ItemNotFound(String),

    /// Save request carried an unreadable form body
    #[error("invalid form: {0}")]
    InvalidForm(String),

    /// Request body could not be decoded as an item
    #[error("invalid item: {0}")]
    InvalidItem(String),

    /// Internal server error (catch-all for unexpected errors)
    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// HTTP status this error maps to
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Storage(_) | AppError::Template(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::InvalidPageName(_) | AppError::ItemNotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidItem(_) | AppError::InvalidForm(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::ItemNotFound(_) | AppError::InvalidItem(_) => {
                let body = Json(json!({ "message": self.to_string() }));
                (status, body).into_response()
            }
            AppError::InvalidPageName(name) => {
                tracing::debug!(name = %name, "rejected page name");
                (status, "404 page not found\n").into_response()
            }
            AppError::InvalidForm(_) => (status, format!("{}\n", self)).into_response(),
            _ => {
                tracing::error!(error = %self, "request failed");
                (status, format!("{}\n", self)).into_response()
            }
        }
    }
}
