#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use portfolio_projects::error::{PortfolioError, Result};
use portfolio_projects::github::RepoSource;
use portfolio_projects::types::GitHubRepo;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::Semaphore;

pub fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

/// A public, non-fork repository updated on 2024-03-01
pub fn repo(name: &str) -> GitHubRepo {
    GitHubRepo {
        name: name.to_string(),
        description: Some(format!("{} description", name)),
        language: None,
        stargazers_count: 0,
        forks_count: 0,
        updated_at: date(2024, 3, 1),
        html_url: format!("https://github.com/octocat/{}", name),
        homepage: None,
        fork: false,
        private: false,
    }
}

pub fn repo_with(name: &str, language: Option<&str>, stars: u32, updated_at: DateTime<Utc>) -> GitHubRepo {
    GitHubRepo {
        language: language.map(str::to_string),
        stargazers_count: stars,
        updated_at,
        ..repo(name)
    }
}

/// Repository object shaped like the GitHub API payload, extra fields included
pub fn repo_json(name: &str, language: Option<&str>, stars: u32, fork: bool) -> Value {
    json!({
        "id": 1296269,
        "name": name,
        "full_name": format!("octocat/{}", name),
        "owner": { "login": "octocat" },
        "description": "A repository",
        "language": language,
        "stargazers_count": stars,
        "forks_count": 2,
        "watchers_count": stars,
        "updated_at": "2024-03-01T12:00:00Z",
        "pushed_at": "2024-03-01T12:00:00Z",
        "html_url": format!("https://github.com/octocat/{}", name),
        "homepage": "",
        "fork": fork,
        "private": false
    })
}

/// In-memory repository source that counts its calls
pub struct StubSource {
    response: Mutex<std::result::Result<Vec<GitHubRepo>, String>>,
    calls: AtomicUsize,
}

impl StubSource {
    pub fn with_repos(repos: Vec<GitHubRepo>) -> Self {
        Self {
            response: Mutex::new(Ok(repos)),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            response: Mutex::new(Err(message.to_string())),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn set_repos(&self, repos: Vec<GitHubRepo>) {
        *self.response.lock().unwrap() = Ok(repos);
    }

    pub fn set_failing(&self, message: &str) {
        *self.response.lock().unwrap() = Err(message.to_string());
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RepoSource for StubSource {
    async fn fetch_repositories(&self, _username: &str, _per_page: u32) -> Result<Vec<GitHubRepo>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response
            .lock()
            .unwrap()
            .clone()
            .map_err(PortfolioError::ApiError)
    }
}

/// Repository source whose fetches wait until the test releases them
pub struct GatedSource {
    gate: Semaphore,
    repos: Vec<GitHubRepo>,
    calls: AtomicUsize,
}

impl GatedSource {
    pub fn new(repos: Vec<GitHubRepo>) -> Self {
        Self {
            gate: Semaphore::new(0),
            repos,
            calls: AtomicUsize::new(0),
        }
    }

    /// Lets `count` waiting or future fetches complete
    pub fn release(&self, count: usize) {
        self.gate.add_permits(count);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RepoSource for GatedSource {
    async fn fetch_repositories(&self, _username: &str, _per_page: u32) -> Result<Vec<GitHubRepo>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let permit = self
            .gate
            .acquire()
            .await
            .map_err(|e| PortfolioError::ApiError(e.to_string()))?;
        permit.forget();
        Ok(self.repos.clone())
    }
}
