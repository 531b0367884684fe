//! Repository Browser - GitHub repository tree with per-file commit info
//!
//! # Usage
//! ```bash
//! repo-browser serve --repo octo/demo          # Start server with a tree loaded
//! repo-browser serve --port 4000               # Start empty, load via the API
//! repo-browser tree --repo octo/demo -b dev    # Print the annotated tree
//! ```

use std::time::Duration;

use axum::Router;
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use repo_browser::browser::RepoBrowser;
use repo_browser::config::{
    BrowserConfig, DEFAULT_AVATAR_URL, DEFAULT_BACKEND_URL, DEFAULT_BATCH_SIZE,
    DEFAULT_GITHUB_API_URL, DEFAULT_STAGGER_MS,
};
use repo_browser::models::{RepoRef, DEFAULT_BRANCH};
use repo_browser::routes;
use repo_browser::tree::render_tree;

/// Repository Browser - Browse a GitHub repository tree with commit info
#[derive(Parser)]
#[command(name = "repo-browser")]
#[command(about = "Repository tree browser with per-file commit annotations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    backend: BackendArgs,
}

#[derive(Args)]
struct BackendArgs {
    /// Repository backend base URL, including the /api prefix
    #[arg(long, global = true, env = "REPO_BROWSER_BACKEND_URL", default_value = DEFAULT_BACKEND_URL)]
    backend_url: String,

    /// GitHub REST API base URL used for avatars
    #[arg(long, global = true, env = "GITHUB_API_URL", default_value = DEFAULT_GITHUB_API_URL)]
    github_api_url: String,

    /// Token sent to the GitHub API
    #[arg(long, global = true, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    /// Files annotated per batch
    #[arg(long, global = true, env = "REPO_BROWSER_BATCH_SIZE", default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// Milliseconds between requests inside a batch
    #[arg(long, global = true, env = "REPO_BROWSER_STAGGER_MS", default_value_t = DEFAULT_STAGGER_MS)]
    stagger_ms: u64,
}

impl BackendArgs {
    fn config(&self) -> BrowserConfig {
        BrowserConfig {
            backend_url: self.backend_url.clone(),
            github_api_url: self.github_api_url.clone(),
            github_token: self.github_token.clone().filter(|t| !t.is_empty()),
            batch_size: self.batch_size,
            stagger: Duration::from_millis(self.stagger_ms),
            default_avatar_url: DEFAULT_AVATAR_URL.to_string(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Repository to load on startup, as owner/name
        #[arg(long)]
        repo: Option<String>,

        #[arg(short, long, default_value = DEFAULT_BRANCH)]
        branch: String,

        /// Port to run the server on
        #[arg(short, long, default_value = "3001")]
        port: u16,
    },
    /// Build, annotate and print a repository tree
    Tree {
        /// Repository as owner/name
        #[arg(long)]
        repo: String,

        #[arg(short, long, default_value = DEFAULT_BRANCH)]
        branch: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing (quieter for production)
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = cli.backend.config();
    let browser = RepoBrowser::from_config(&config)?;

    match cli.command {
        Commands::Serve { repo, branch, port } => serve(browser, repo, branch, port).await,
        Commands::Tree { repo, branch } => print_tree(browser, &repo, branch).await,
    }
}

async fn print_tree(
    browser: RepoBrowser,
    repo: &str,
    branch: String,
) -> anyhow::Result<()> {
    let repo = RepoRef::parse(repo, branch)?;
    let loaded = browser.load(repo).await?;
    let report = loaded.annotation.await?;
    info!(
        "Annotated {} files in {} batches ({} fallback, {} sentinel)",
        report.total, report.batches, report.fallback, report.sentinel
    );

    let snapshot = browser.snapshot()?;
    print!("{}", render_tree(&snapshot.root, Utc::now(), false));
    Ok(())
}

async fn serve(
    browser: RepoBrowser,
    repo: Option<String>,
    branch: String,
    port: u16,
) -> anyhow::Result<()> {
    if let Some(repo) = repo {
        let repo = RepoRef::parse(&repo, branch)?;
        // Annotation keeps running in the background.
        browser.load(repo).await?;
    }

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(routes::create_router(browser))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = format!("127.0.0.1:{}", port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("✗ Failed to bind to port {}: {}", port, e);
            eprintln!("  Try a different port with --port <PORT>");
            std::process::exit(1);
        }
    };

    println!();
    println!("  Repository Browser");
    println!("  Server: http://{}", addr);
    println!("  Press Ctrl+C to stop");
    println!();

    let shutdown = async {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!("\n  Shutting down...");
        }
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
