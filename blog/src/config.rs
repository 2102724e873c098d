use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding `YYYY-MM-DD-<slug>.md` sources
    pub posts_dir: PathBuf,
    /// Origin used for permalinks in the feed
    pub site_origin: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            posts_dir: env::var("POSTS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("posts")),
            site_origin: env::var("SITE_ORIGIN")
                .unwrap_or_else(|_| "https://aivena.dev".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
        }
    }
}
