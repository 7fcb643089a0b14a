use anyhow::Context;
use clap::Parser;
use colored::*;
use portfolio_projects::cli::{Cli, Command};
use portfolio_projects::github::GitHubClient;
use portfolio_projects::loader::ProjectsLoader;
use portfolio_projects::page::{PageHandle, ProjectsPage};
use portfolio_projects::refresh::Refresher;
use portfolio_projects::render::render_document;
use portfolio_projects::site::{start_server, AppState};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    // Logs go to stderr so `render` can write the page to stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let client = GitHubClient::new(cli.client_config()).context("Failed to create GitHub client")?;
    let loader = Arc::new(ProjectsLoader::new(Arc::new(client), cli.loader_config()));

    match cli.command {
        Command::Render { output } => render_once(&loader, output).await,
        Command::Serve {
            port,
            refresh_interval,
        } => serve(loader, port, refresh_interval).await,
    }
}

async fn render_once(loader: &ProjectsLoader, output: Option<PathBuf>) -> anyhow::Result<()> {
    let mut page = ProjectsPage::default();
    let outcome = loader.refresh(&mut page).await;
    let html = render_document(&page, &loader.config().username);

    match &output {
        Some(path) => {
            tokio::fs::write(path, html)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("{} {}", "✅ Wrote".green(), path.display());
        }
        None => print!("{}", html),
    }

    if !outcome.is_loaded() {
        anyhow::bail!("Unable to load GitHub projects for {}", loader.config().username);
    }

    Ok(())
}

async fn serve(loader: Arc<ProjectsLoader>, port: u16, refresh_interval: u64) -> anyhow::Result<()> {
    println!("{}", "Portfolio Projects Server".bold().green());
    println!("{}\n", "=".repeat(50).dimmed());
    println!("👤 GitHub account: {}", loader.config().username);

    let page = PageHandle::new();

    let refresher = if refresh_interval > 0 {
        println!("🔄 Refreshing every {} seconds", refresh_interval);
        Some(
            Refresher::start(
                loader.clone(),
                page.clone(),
                Duration::from_secs(refresh_interval),
            )
            .context("Failed to start periodic refresh")?,
        )
    } else {
        println!("{}", "Automatic refresh disabled".yellow());
        let mut initial = page.clone();
        loader.refresh(&mut initial).await;
        None
    };

    let state = AppState::new(page, loader);

    println!("📡 Listening on http://0.0.0.0:{}", port);
    println!("\nPress Ctrl+C to stop the server\n");

    let result = tokio::select! {
        result = start_server(state, port) => result.context("Server failed"),
        _ = tokio::signal::ctrl_c() => {
            println!("\n🛑 Shutting down server...");
            Ok(())
        }
    };

    if let Some(refresher) = refresher {
        refresher.stop().await;
    }

    println!("✅ Server stopped");
    result
}
