//! Static export of the feed

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::BlogError;
use crate::feed::{render_rss, FeedChannel};
use crate::posts::PostIndex;

/// Write `<out>/blog/rss.xml` and return its path
pub fn write_feed(
    out: &Path,
    posts: &PostIndex,
    channel: &FeedChannel,
) -> Result<PathBuf, BlogError> {
    let dir = out.join("blog");
    let io_err = |path: &Path| {
        let path = path.display().to_string();
        move |source: std::io::Error| BlogError::Io { path, source }
    };

    fs::create_dir_all(&dir).map_err(io_err(dir.as_path()))?;
    let target = dir.join("rss.xml");
    fs::write(&target, render_rss(posts.posts(), channel)).map_err(io_err(target.as_path()))?;

    tracing::info!(path = %target.display(), posts = posts.len(), "Wrote feed");
    Ok(target)
}
