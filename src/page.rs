use crate::models::{Panel, RepoStats};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;

/// Where the load pipeline puts its results.
pub trait RenderTarget {
    fn set_loading(&mut self, loading: bool);
    fn show_stats(&mut self, stats: &RepoStats);
    fn show_panel(&mut self, panel: Panel);
}

/// In-memory state of the projects section
///
/// `loading` stays set while any of the overlapping loads is still running.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectsPage {
    pub loading: bool,
    #[serde(default)]
    pub pending_loads: usize,
    pub stats: Option<RepoStats>,
    pub panel: Option<Panel>,
    pub last_loaded: Option<DateTime<Utc>>,
}

impl ProjectsPage {
    pub fn has_loaded(&self) -> bool {
        self.last_loaded.is_some()
    }

    pub fn is_showing_error(&self) -> bool {
        matches!(self.panel, Some(Panel::Error))
    }
}

impl RenderTarget for ProjectsPage {
    fn set_loading(&mut self, loading: bool) {
        if loading {
            self.pending_loads += 1;
        } else {
            self.pending_loads = self.pending_loads.saturating_sub(1);
        }
        self.loading = self.pending_loads > 0;
    }

    fn show_stats(&mut self, stats: &RepoStats) {
        self.stats = Some(stats.clone());
    }

    fn show_panel(&mut self, panel: Panel) {
        if !matches!(panel, Panel::Error) {
            self.last_loaded = Some(Utc::now());
        }
        self.panel = Some(panel);
    }
}

/// Shared, observable [`ProjectsPage`]. Clones publish to the same page.
#[derive(Debug, Clone)]
pub struct PageHandle {
    tx: Arc<watch::Sender<ProjectsPage>>,
}

impl PageHandle {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(ProjectsPage::default());
        Self { tx: Arc::new(tx) }
    }

    pub fn snapshot(&self) -> ProjectsPage {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ProjectsPage> {
        self.tx.subscribe()
    }
}

impl Default for PageHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderTarget for PageHandle {
    fn set_loading(&mut self, loading: bool) {
        self.tx.send_modify(|page| page.set_loading(loading));
    }

    fn show_stats(&mut self, stats: &RepoStats) {
        self.tx.send_modify(|page| page.show_stats(stats));
    }

    fn show_panel(&mut self, panel: Panel) {
        self.tx.send_modify(|page| page.show_panel(panel));
    }
}
