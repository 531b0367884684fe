//! Application error types and HTTP response mapping.
//!
//! Defines `AppError` enum for all error conditions and implements Axum's
//! `IntoResponse` to automatically convert errors to appropriate HTTP responses
//! with JSON error bodies.
//!
//! Error mappings:
//! - `PathNotFound`, `NoRepository` → 404
//! - `InvalidRepo` → 400
//! - `NotAFolder` → 409
//! - `Http`, `Upstream` → 502
//! - `Internal` → 500
//!
//! Annotation never surfaces these: the annotator turns every failure into
//! placeholder commit data. Only loading the listing and explicit user actions
//! (toggle, refresh) return them.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream returned {status} for {url}")]
    Upstream { status: u16, url: String },

    #[error("Invalid repository: {0}")]
    InvalidRepo(String),

    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("Not a folder: {0}")]
    NotAFolder(String),

    #[error("No repository loaded")]
    NoRepository,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Http(_) | AppError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            AppError::InvalidRepo(_) => StatusCode::BAD_REQUEST,
            AppError::PathNotFound(_) | AppError::NoRepository => StatusCode::NOT_FOUND,
            AppError::NotAFolder(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
