//! Frontmatter parser
//!
//! Posts start with a `---` delimited header of `key: value` lines:
//!
//! ```text
//! ---
//! title: "Hello World"
//! date: 2026-02-13
//! excerpt: "First post."
//! tags: [origins, "heartbeat"]
//! ---
//! Body in markdown...
//! ```
//!
//! `title`, `date` and `excerpt` are required. Unknown keys are ignored.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::BlogError;

const DELIMITER: &str = "---";

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"));

/// Metadata extracted from a post header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    pub title: String,
    pub date: String,
    pub excerpt: String,
    pub tags: Vec<String>,
}

/// A source file split into metadata and markdown body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub frontmatter: Frontmatter,
    pub body: String,
}

/// Parse `raw` (the contents of `file`) into frontmatter and body
pub fn parse(file: &str, raw: &str) -> Result<Document, BlogError> {
    let text = raw.replace("\r\n", "\n");
    let (header, body) = split(file, &text)?;

    let mut fm = Frontmatter::default();
    let mut seen: Vec<&str> = Vec::new();

    for (idx, line) in header.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        // +2: 1-based, and the opening delimiter is line 1
        let line_no = idx + 2;
        let (key, value) = trimmed.split_once(':').ok_or_else(|| {
            BlogError::format(file, format!("line {}: expected 'key: value'", line_no))
        })?;
        let key = key.trim();
        let value = value.trim();

        if matches!(key, "title" | "date" | "excerpt" | "tags") {
            if seen.contains(&key) {
                return Err(BlogError::format(
                    file,
                    format!("line {}: duplicate field '{}'", line_no, key),
                ));
            }
            seen.push(key);
        }

        match key {
            "title" => fm.title = unquote(value),
            "excerpt" => fm.excerpt = unquote(value),
            "date" => fm.date = parse_date(file, line_no, value)?,
            "tags" => fm.tags = parse_tags(file, line_no, value)?,
            _ => tracing::debug!(file, key, "Ignoring unknown frontmatter field"),
        }
    }

    let missing: Vec<&str> = [
        ("title", &fm.title),
        ("date", &fm.date),
        ("excerpt", &fm.excerpt),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(name, _)| name)
    .collect();

    if !missing.is_empty() {
        return Err(BlogError::format(
            file,
            format!("missing required fields: {}", missing.join(", ")),
        ));
    }

    Ok(Document {
        frontmatter: fm,
        // leading indentation is significant markdown (code blocks)
        body: body.trim_start_matches('\n').trim_end().to_string(),
    })
}

/// Split into (header, body) around the two delimiter lines
fn split<'a>(file: &str, text: &'a str) -> Result<(&'a str, &'a str), BlogError> {
    let rest = text
        .strip_prefix(DELIMITER)
        .and_then(|r| r.strip_prefix('\n'))
        .ok_or_else(|| BlogError::format(file, "must start with a '---' line"))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            let header = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Ok((header, body));
        }
        offset += line.len();
    }

    Err(BlogError::format(file, "missing closing '---' line"))
}

/// Strip one layer of matching quotes; `\"` and `\\` are unescaped inside
/// double quotes
fn unquote(value: &str) -> String {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        let inner = &value[1..value.len() - 1];
        let mut out = String::with_capacity(inner.len());
        let mut chars = inner.chars();
        while let Some(c) = chars.next() {
            if c == '\\' {
                match chars.next() {
                    Some(next @ ('"' | '\\')) => out.push(next),
                    Some(other) => {
                        out.push('\\');
                        out.push(other);
                    }
                    None => out.push('\\'),
                }
            } else {
                out.push(c);
            }
        }
        out
    } else if value.len() >= 2 && value.starts_with('\'') && value.ends_with('\'') {
        value[1..value.len() - 1].to_string()
    } else {
        value.to_string()
    }
}

fn parse_date(file: &str, line_no: usize, value: &str) -> Result<String, BlogError> {
    let date = unquote(value);
    if date.is_empty() {
        return Ok(date);
    }
    if !ISO_DATE.is_match(&date) || NaiveDate::parse_from_str(&date, "%Y-%m-%d").is_err() {
        return Err(BlogError::format(
            file,
            format!("line {}: date '{}' is not YYYY-MM-DD", line_no, date),
        ));
    }
    Ok(date)
}

/// `[a, "b", 'c']` -> `["a", "b", "c"]`, first occurrence wins on repeats
fn parse_tags(file: &str, line_no: usize, value: &str) -> Result<Vec<String>, BlogError> {
    if value.is_empty() {
        return Ok(Vec::new());
    }
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or_else(|| {
            BlogError::format(
                file,
                format!("line {}: tags must be a bracketed list", line_no),
            )
        })?;

    let mut tags: Vec<String> = Vec::new();
    for item in inner.split(',') {
        let tag = unquote(item.trim());
        if !tag.is_empty() && !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    Ok(tags)
}
