//! Aivena blog server
//!
//! `serve` (default) answers the blog endpoints over HTTP; `build` writes the
//! feed to disk for static hosting. Both load every post first and refuse to
//! start on a malformed one.

use std::net::SocketAddr;
use std::path::PathBuf;

use aivena_blog::config::Config;
use aivena_blog::{build_router, export, AppState, FeedChannel, PostIndex};
use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "aivena-blog")]
#[command(about = "Aivena blog: markdown posts to HTML and RSS")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override POSTS_DIR
    #[arg(long, value_name = "DIR")]
    posts: Option<PathBuf>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Serve the blog endpoints
    Serve,
    /// Write the RSS feed to a directory
    Build {
        /// Output directory; the feed lands in <OUT>/blog/rss.xml
        #[arg(long, default_value = "build")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,aivena_blog=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env();
    if let Some(posts) = cli.posts {
        config.posts_dir = posts;
    }

    let posts = PostIndex::load(&config.posts_dir)
        .with_context(|| format!("Failed to load posts from {}", config.posts_dir.display()))?;
    let channel = FeedChannel::new(&config.site_origin);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(&config, posts, channel).await,
        Commands::Build { out } => {
            export::write_feed(&out, &posts, &channel)?;
            Ok(())
        }
    }
}

async fn serve(config: &Config, posts: PostIndex, channel: FeedChannel) -> Result<()> {
    let app = build_router(AppState::new(posts, channel));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
