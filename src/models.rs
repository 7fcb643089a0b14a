use crate::types::GitHubRepo;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Upper bound on the cards shown in the projects section
pub const MAX_CARDS: usize = 6;

/// Repository names hidden from the projects section by default
pub const DEFAULT_EXCLUDED_REPOS: &[&str] = &["portfolio", "Basudev-Das25", "resume", "cv", "test"];

/// Drops denylisted, forked and private repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoFilter {
    excluded: Vec<String>,
}

impl RepoFilter {
    pub fn new<I, S>(excluded: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            excluded: excluded
                .into_iter()
                .map(|name| name.as_ref().trim().to_lowercase())
                .filter(|name| !name.is_empty())
                .collect(),
        }
    }

    pub fn excluded(&self) -> &[String] {
        &self.excluded
    }

    pub fn keeps(&self, repo: &GitHubRepo) -> bool {
        let name = repo.name.to_lowercase();
        !repo.fork && !repo.private && !self.excluded.iter().any(|excluded| *excluded == name)
    }

    /// Keeps the API order of the surviving records.
    pub fn apply(&self, repos: Vec<GitHubRepo>) -> Vec<GitHubRepo> {
        repos.into_iter().filter(|repo| self.keeps(repo)).collect()
    }
}

impl Default for RepoFilter {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDED_REPOS)
    }
}

/// Aggregates over the current repository list, recomputed on every load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoStats {
    pub repo_count: usize,
    pub language_count: usize,
    pub languages: Vec<String>,
    pub total_stars: u64,
    pub latest_update: Option<DateTime<Utc>>,
}

impl RepoStats {
    pub fn from_repos(repos: &[GitHubRepo]) -> Self {
        let languages: BTreeSet<&str> = repos.iter().filter_map(GitHubRepo::language).collect();

        Self {
            repo_count: repos.len(),
            language_count: languages.len(),
            languages: languages.into_iter().map(str::to_string).collect(),
            total_stars: repos.iter().map(|repo| u64::from(repo.stargazers_count)).sum(),
            latest_update: repos.iter().map(|repo| repo.updated_at).max(),
        }
    }
}

/// Content of the card container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "repos", rename_all = "snake_case")]
pub enum Panel {
    Cards(Vec<GitHubRepo>),
    Empty,
    Error,
}

impl Panel {
    pub fn from_repos(repos: &[GitHubRepo]) -> Self {
        if repos.is_empty() {
            Panel::Empty
        } else {
            Panel::Cards(repos.iter().take(MAX_CARDS).cloned().collect())
        }
    }

    pub fn card_count(&self) -> usize {
        match self {
            Panel::Cards(repos) => repos.len(),
            Panel::Empty | Panel::Error => 0,
        }
    }
}
