//! HTTP handlers
//!
//! Read-only endpoints over the loaded posts.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use crate::error::AppError;
use crate::feed;
use crate::posts::{Post, PostSummary};
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    posts: usize,
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        posts: state.posts.len(),
    })
}

/// GET /blog
///
/// Post summaries, newest first.
pub async fn list_posts(State(state): State<AppState>) -> Json<Vec<PostSummary>> {
    Json(state.posts.summaries())
}

/// GET /blog/:slug
pub async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Post>, AppError> {
    state
        .posts
        .find(&slug)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))
}

/// GET /blog/rss.xml
///
/// The document is rendered once at startup.
pub async fn rss_feed(State(state): State<AppState>) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, feed::CONTENT_TYPE),
            (header::CACHE_CONTROL, feed::CACHE_CONTROL),
        ],
        state.rss.to_string(),
    )
}
