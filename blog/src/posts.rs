//! Post pipeline
//!
//! Reads every `YYYY-MM-DD-<slug>.md` file up front, parses frontmatter,
//! renders the body to HTML and keeps the result sorted newest first.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use pulldown_cmark::{html, Options, Parser};
use regex::Regex;
use serde::Serialize;

use crate::error::BlogError;
use crate::frontmatter;

static DATE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}-").expect("valid prefix regex"));

/// A parsed, rendered blog post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub slug: String,
    pub title: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    /// Raw markdown body
    pub content: String,
    pub html: String,
}

/// Listing view of a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostSummary {
    pub slug: String,
    pub title: String,
    pub date: String,
    pub excerpt: String,
    pub tags: Vec<String>,
}

impl From<&Post> for PostSummary {
    fn from(post: &Post) -> Self {
        PostSummary {
            slug: post.slug.clone(),
            title: post.title.clone(),
            date: post.date.clone(),
            excerpt: post.excerpt.clone(),
            tags: post.tags.clone(),
        }
    }
}

/// `2026-02-13-hello-world.md` -> `hello-world`
pub fn slug_from_filename(file_name: &str) -> String {
    let stem = file_name.strip_suffix(".md").unwrap_or(file_name);
    DATE_PREFIX.replace(stem, "").into_owned()
}

/// Render markdown to HTML
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(markdown, options);

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Build one post from a file name and its contents
pub fn parse_post(file_name: &str, raw: &str) -> Result<Post, BlogError> {
    let doc = frontmatter::parse(file_name, raw)?;
    let html = render_markdown(&doc.body);
    Ok(Post {
        slug: slug_from_filename(file_name),
        title: doc.frontmatter.title,
        date: doc.frontmatter.date,
        excerpt: doc.frontmatter.excerpt,
        tags: doc.frontmatter.tags,
        content: doc.body,
        html,
    })
}

/// Sort newest first by date string; equal dates fall back to slug order
pub fn sort_posts(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));
}

/// Load and parse every `.md` file directly inside `dir`
///
/// Any malformed post or repeated slug fails the whole load.
pub fn load_posts(dir: &Path) -> Result<Vec<Post>, BlogError> {
    let io_err = |source| BlogError::Io {
        path: dir.display().to_string(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "md") {
            files.push(path);
        }
    }
    // read_dir order is platform-dependent
    files.sort();

    let mut posts = Vec::with_capacity(files.len());
    let mut origins: HashMap<String, String> = HashMap::new();

    for path in files {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let raw = fs::read_to_string(&path).map_err(|source| BlogError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let post = parse_post(&file_name, &raw)?;
        if let Some(first) = origins.get(&post.slug) {
            return Err(BlogError::DuplicateSlug {
                slug: post.slug,
                first: first.clone(),
                second: file_name,
            });
        }
        origins.insert(post.slug.clone(), file_name);
        posts.push(post);
    }

    sort_posts(&mut posts);
    tracing::info!(count = posts.len(), dir = %dir.display(), "Loaded posts");
    Ok(posts)
}

/// The loaded post collection, newest first
#[derive(Debug, Clone, Default)]
pub struct PostIndex {
    posts: Vec<Post>,
}

impl PostIndex {
    /// Wrap already-parsed posts, sorting them
    pub fn new(mut posts: Vec<Post>) -> Self {
        sort_posts(&mut posts);
        Self { posts }
    }

    pub fn load(dir: &Path) -> Result<Self, BlogError> {
        Ok(Self {
            posts: load_posts(dir)?,
        })
    }

    pub fn find(&self, slug: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.slug == slug)
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn summaries(&self) -> Vec<PostSummary> {
        self.posts.iter().map(PostSummary::from).collect()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}
