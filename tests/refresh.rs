mod common;

use common::{repo, GatedSource, StubSource};
use portfolio_projects::error::PortfolioError;
use portfolio_projects::loader::{LoaderConfig, ProjectsLoader};
use portfolio_projects::models::Panel;
use portfolio_projects::page::PageHandle;
use portfolio_projects::refresh::Refresher;
use std::sync::Arc;
use std::time::Duration;

const PERIOD: Duration = Duration::from_secs(300);

fn setup(source: Arc<StubSource>) -> (Arc<ProjectsLoader>, PageHandle) {
    let loader = Arc::new(ProjectsLoader::new(source, LoaderConfig::default()));
    (loader, PageHandle::new())
}

#[tokio::test(start_paused = true)]
async fn test_refreshes_immediately_then_on_interval() {
    let source = Arc::new(StubSource::with_repos(vec![repo("a")]));
    let (loader, page) = setup(source.clone());

    let refresher = Refresher::start(loader, page.clone(), PERIOD).expect("Failed to start refresher");
    assert_eq!(refresher.period(), PERIOD);

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(source.calls(), 1);
    assert_eq!(page.snapshot().panel.as_ref().map(Panel::card_count), Some(1));

    tokio::time::sleep(PERIOD * 2).await;
    assert_eq!(source.calls(), 3);

    refresher.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_no_refresh_after_stop() {
    let source = Arc::new(StubSource::with_repos(vec![repo("a")]));
    let (loader, page) = setup(source.clone());

    let refresher = Refresher::start(loader, page.clone(), PERIOD).expect("Failed to start refresher");
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(refresher.is_running());

    refresher.stop().await;
    let calls = source.calls();

    tokio::time::sleep(PERIOD * 5).await;
    assert_eq!(source.calls(), calls);
    assert!(!page.snapshot().loading);
}

#[tokio::test(start_paused = true)]
async fn test_drop_cancels_refresh() {
    let source = Arc::new(StubSource::with_repos(vec![repo("a")]));
    let (loader, page) = setup(source.clone());

    {
        let _refresher = Refresher::start(loader, page, PERIOD).expect("Failed to start refresher");
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    let calls = source.calls();
    tokio::time::sleep(PERIOD * 3).await;
    assert_eq!(source.calls(), calls);
}

#[tokio::test(start_paused = true)]
async fn test_failed_refresh_recovers_on_next_tick() {
    let source = Arc::new(StubSource::failing("offline"));
    let (loader, page) = setup(source.clone());

    let refresher = Refresher::start(loader, page.clone(), PERIOD).expect("Failed to start refresher");
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(page.snapshot().is_showing_error());

    source.set_repos(vec![repo("a"), repo("b")]);
    tokio::time::sleep(PERIOD).await;

    let snapshot = page.snapshot();
    assert!(!snapshot.is_showing_error());
    assert_eq!(snapshot.stats.map(|s| s.repo_count), Some(2));

    refresher.stop().await;
}

#[tokio::test]
async fn test_zero_period_is_rejected() {
    let source = Arc::new(StubSource::with_repos(vec![repo("a")]));
    let (loader, page) = setup(source.clone());

    match Refresher::start(loader, page.clone(), Duration::ZERO) {
        Err(PortfolioError::ConfigError(_)) => {}
        Err(other) => panic!("Expected ConfigError, got: {:?}", other),
        Ok(_) => panic!("Expected a zero period to be rejected"),
    }

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(source.calls(), 0);
    assert!(!page.snapshot().has_loaded());
}

#[tokio::test(start_paused = true)]
async fn test_stop_during_refresh_hides_spinner() {
    let source = Arc::new(GatedSource::new(vec![repo("a")]));
    let loader = Arc::new(ProjectsLoader::new(source.clone(), LoaderConfig::default()));
    let page = PageHandle::new();

    let refresher = Refresher::start(loader, page.clone(), PERIOD).expect("Failed to start refresher");
    tokio::time::sleep(Duration::from_secs(1)).await;

    assert_eq!(source.calls(), 1);
    assert!(page.snapshot().loading);

    refresher.stop().await;

    let snapshot = page.snapshot();
    assert!(!snapshot.loading);
    assert_eq!(snapshot.pending_loads, 0);
    assert!(!snapshot.has_loaded());
}
