//! Query string builder for optional filters

use urlencoding::encode;

/// Ordered query parameters; absent values are skipped
#[derive(Debug, Clone, Default)]
pub struct Query {
    pairs: Vec<(&'static str, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// String parameter, skipped when `None` or empty
    pub fn str(mut self, name: &'static str, value: Option<&str>) -> Self {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.pairs.push((name, value.to_string()));
        }
        self
    }

    pub fn num(mut self, name: &'static str, value: Option<i64>) -> Self {
        if let Some(value) = value {
            self.pairs.push((name, value.to_string()));
        }
        self
    }

    /// Boolean flag, sent as `name=1` when set and omitted otherwise
    pub fn flag(mut self, name: &'static str, on: bool) -> Self {
        if on {
            self.pairs.push((name, "1".to_string()));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Append to `path`, adding `?` only when there is something to add
    pub fn apply(&self, path: &str) -> String {
        if self.pairs.is_empty() {
            return path.to_string();
        }
        let query = self
            .pairs
            .iter()
            .map(|(name, value)| format!("{}={}", name, encode(value)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", path, query)
    }
}
