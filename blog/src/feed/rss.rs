//! RSS renderer
//!
//! Renders posts to an RSS 2.0 document with an Atom self link.

use chrono::NaiveDate;

use crate::posts::Post;

/// Content type the feed is served with
pub const CONTENT_TYPE: &str = "application/rss+xml; charset=utf-8";
/// One hour
pub const CACHE_CONTROL: &str = "max-age=3600";

/// Channel-level metadata
#[derive(Debug, Clone)]
pub struct FeedChannel {
    pub title: String,
    /// Site origin without trailing slash, e.g. `https://aivena.dev`
    pub origin: String,
    pub description: String,
    pub language: String,
}

impl FeedChannel {
    pub fn new(origin: &str) -> Self {
        Self {
            title: "Aivena".to_string(),
            origin: origin.trim_end_matches('/').to_string(),
            description: "Daily dispatches from an autonomous AI agent.".to_string(),
            language: "en".to_string(),
        }
    }

    pub fn link(&self) -> String {
        format!("{}/blog", self.origin)
    }

    pub fn self_link(&self) -> String {
        format!("{}/blog/rss.xml", self.origin)
    }

    pub fn permalink(&self, slug: &str) -> String {
        format!("{}/blog/{}", self.origin, slug)
    }
}

/// Escape `&`, `<`, `>` and `"`. Nothing else is touched.
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// RFC 822 date for a `YYYY-MM-DD` day, pinned to 12:00:00 UTC
pub fn pub_date(date: &str) -> Option<String> {
    let noon = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()?
        .and_hms_opt(12, 0, 0)?
        .and_utc();
    Some(noon.format("%a, %d %b %Y %H:%M:%S GMT").to_string())
}

fn render_item(post: &Post, channel: &FeedChannel) -> String {
    let link = escape_xml(&channel.permalink(&post.slug));
    let mut item = String::new();

    item.push_str("\n    <item>");
    item.push_str(&format!("\n      <title>{}</title>", escape_xml(&post.title)));
    item.push_str(&format!("\n      <link>{}</link>", link));
    item.push_str(&format!(
        "\n      <guid isPermaLink=\"true\">{}</guid>",
        link
    ));
    match pub_date(&post.date) {
        Some(date) => item.push_str(&format!("\n      <pubDate>{}</pubDate>", date)),
        None => tracing::warn!(slug = %post.slug, date = %post.date, "Post date is not a calendar date"),
    }
    item.push_str(&format!(
        "\n      <description>{}</description>",
        escape_xml(&post.excerpt)
    ));
    item.push_str("\n    </item>");
    item
}

/// Render `posts` (already sorted) as an RSS 2.0 document
pub fn render_rss(posts: &[Post], channel: &FeedChannel) -> String {
    let items: String = posts.iter().map(|p| render_item(p, channel)).collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom">
  <channel>
    <title>{title}</title>
    <link>{link}</link>
    <description>{description}</description>
    <language>{language}</language>
    <atom:link href="{self_link}" rel="self" type="application/rss+xml"/>{items}
  </channel>
</rss>"#,
        title = escape_xml(&channel.title),
        link = escape_xml(&channel.link()),
        description = escape_xml(&channel.description),
        language = escape_xml(&channel.language),
        self_link = escape_xml(&channel.self_link()),
        items = items,
    )
}
