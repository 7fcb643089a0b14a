use crate::error::{PortfolioError, Result};
use crate::github::RepoSource;
use crate::models::{Panel, RepoFilter, RepoStats};
use crate::page::RenderTarget;
use crate::types::GitHubRepo;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

pub const DEFAULT_USERNAME: &str = "Basudev-Das25";
pub const DEFAULT_PER_PAGE: u32 = 20;

#[derive(Debug, Clone)]
pub struct LoaderConfig {
    pub username: String,
    pub per_page: u32,
    pub filter: RepoFilter,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
            per_page: DEFAULT_PER_PAGE,
            filter: RepoFilter::default(),
        }
    }
}

/// Filtered repositories of one successful load
#[derive(Debug, Clone)]
pub struct RepoSet {
    pub repos: Vec<GitHubRepo>,
    pub stats: RepoStats,
}

#[derive(Debug)]
pub enum LoadOutcome {
    Loaded { stats: RepoStats, cards: usize },
    Failed(PortfolioError),
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded { .. })
    }
}

/// Fetch, filter and aggregate pipeline for one account.
pub struct ProjectsLoader {
    source: Arc<dyn RepoSource>,
    config: LoaderConfig,
}

impl ProjectsLoader {
    pub fn new(source: Arc<dyn RepoSource>, config: LoaderConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub async fn load(&self) -> Result<RepoSet> {
        let fetched = self
            .source
            .fetch_repositories(&self.config.username, self.config.per_page)
            .await?;

        let fetched_count = fetched.len();
        let repos = self.config.filter.apply(fetched);
        let stats = RepoStats::from_repos(&repos);

        info!(
            username = %self.config.username,
            fetched = fetched_count,
            repos = stats.repo_count,
            languages = stats.language_count,
            stars = stats.total_stars,
            "Loaded repositories"
        );

        Ok(RepoSet { repos, stats })
    }

    /// Runs one load and presents the result on `target`.
    ///
    /// On failure only the panel changes; counters from an earlier load are
    /// left as they were. The spinner is hidden either way, also when the
    /// returned future is dropped before it completes.
    pub async fn refresh<T>(&self, target: &mut T) -> LoadOutcome
    where
        T: RenderTarget + ?Sized,
    {
        let started = Instant::now();
        let mut target = Loading::start(target);

        let outcome = match self.load().await {
            Ok(set) => {
                let panel = Panel::from_repos(&set.repos);
                let cards = panel.card_count();
                target.show_stats(&set.stats);
                target.show_panel(panel);
                LoadOutcome::Loaded { stats: set.stats, cards }
            }
            Err(e) => {
                error!(
                    username = %self.config.username,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Error fetching GitHub data: {}",
                    e
                );
                target.show_panel(Panel::Error);
                LoadOutcome::Failed(e)
            }
        };

        drop(target);
        outcome
    }
}

/// Keeps the spinner up for its lifetime.
struct Loading<'a, T: RenderTarget + ?Sized> {
    target: &'a mut T,
}

impl<'a, T: RenderTarget + ?Sized> Loading<'a, T> {
    fn start(target: &'a mut T) -> Self {
        target.set_loading(true);
        Self { target }
    }
}

impl<T: RenderTarget + ?Sized> Deref for Loading<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.target
    }
}

impl<T: RenderTarget + ?Sized> DerefMut for Loading<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.target
    }
}

impl<T: RenderTarget + ?Sized> Drop for Loading<'_, T> {
    fn drop(&mut self) {
        self.target.set_loading(false);
    }
}
