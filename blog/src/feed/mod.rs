//! Feed module
//!
//! RSS 2.0 rendering of the post collection.

pub mod rss;

pub use rss::{escape_xml, pub_date, render_rss, FeedChannel, CACHE_CONTROL, CONTENT_TYPE};
