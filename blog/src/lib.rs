//! Aivena blog
//!
//! Markdown posts with frontmatter, rendered to HTML and an RSS 2.0 feed.
//! Posts are loaded once, eagerly; a malformed post fails the load.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod export;
pub mod feed;
pub mod frontmatter;
pub mod handlers;
pub mod posts;

pub use error::{AppError, BlogError};
pub use feed::FeedChannel;
pub use posts::{Post, PostIndex, PostSummary};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostIndex>,
    /// Pre-rendered feed document
    pub rss: Arc<str>,
}

impl AppState {
    pub fn new(posts: PostIndex, channel: FeedChannel) -> Self {
        let rss = feed::render_rss(posts.posts(), &channel);
        Self {
            posts: Arc::new(posts),
            rss: Arc::from(rss),
        }
    }
}

/// Build the blog router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/blog", get(handlers::list_posts))
        .route("/blog/rss.xml", get(handlers::rss_feed))
        .route("/blog/:slug", get(handlers::get_post))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
