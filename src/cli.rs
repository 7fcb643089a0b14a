use crate::github::{ClientConfig, API_BASE_URL};
use crate::loader::{LoaderConfig, DEFAULT_PER_PAGE, DEFAULT_USERNAME};
use crate::models::{RepoFilter, DEFAULT_EXCLUDED_REPOS};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "portfolio-projects")]
#[command(about = "Portfolio Projects - Renders a GitHub account's public repositories as portfolio cards")]
#[command(version)]
pub struct Cli {
    /// GitHub account whose repositories are shown
    #[arg(long, env = "GITHUB_USERNAME", default_value = DEFAULT_USERNAME, global = true)]
    pub username: String,

    /// Number of most recently updated repositories to request
    #[arg(long, env = "GITHUB_PER_PAGE", default_value_t = DEFAULT_PER_PAGE, global = true)]
    pub per_page: u32,

    /// Repository names to hide (case-insensitive, comma separated)
    #[arg(
        long,
        env = "GITHUB_EXCLUDE",
        value_delimiter = ',',
        default_values = DEFAULT_EXCLUDED_REPOS,
        global = true
    )]
    pub exclude: Vec<String>,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = API_BASE_URL, global = true)]
    pub api_url: String,

    /// Optional GitHub token, raises the API rate limit
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// HTTP request timeout in seconds
    #[arg(long, env = "HTTP_TIMEOUT", default_value_t = 30, global = true)]
    pub timeout: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch once and write the rendered page
    Render {
        /// Output file, stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Serve the page and keep it refreshed
    Serve {
        /// Port to listen on
        #[arg(long, env = "PORT", default_value_t = 8080)]
        port: u16,

        /// Seconds between automatic refreshes, 0 disables them
        #[arg(long, env = "REFRESH_INTERVAL", default_value_t = 300)]
        refresh_interval: u64,
    },
}

impl Cli {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            api_url: self.api_url.clone(),
            token: self.token.clone(),
            timeout: Duration::from_secs(self.timeout),
        }
    }

    pub fn loader_config(&self) -> LoaderConfig {
        LoaderConfig {
            username: self.username.clone(),
            per_page: self.per_page,
            filter: RepoFilter::new(&self.exclude),
        }
    }
}
