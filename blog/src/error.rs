//! Error types for the blog
//!
//! - `BlogError`: loading and parsing posts, fatal at load time
//! - `AppError`: HTTP handler errors (rendered as JSON)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Post loading errors
#[derive(Debug, Error)]
pub enum BlogError {
    /// Malformed or incomplete frontmatter
    #[error("Invalid frontmatter in {file}: {reason}")]
    Format { file: String, reason: String },

    #[error("Duplicate slug '{slug}' in {first} and {second}")]
    DuplicateSlug {
        slug: String,
        first: String,
        second: String,
    },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl BlogError {
    pub(crate) fn format(file: &str, reason: impl Into<String>) -> Self {
        BlogError::Format {
            file: file.to_string(),
            reason: reason.into(),
        }
    }
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "Not found", Some(msg.clone())),
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_error_names_file() {
        let err = BlogError::format("2026-02-13-hello.md", "missing required fields: date");
        assert_eq!(
            err.to_string(),
            "Invalid frontmatter in 2026-02-13-hello.md: missing required fields: date"
        );
    }

    #[test]
    fn not_found_maps_to_404() {
        let response = AppError::NotFound("Post not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
