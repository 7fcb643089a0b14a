use crate::error::{PortfolioError, Result};
use crate::loader::ProjectsLoader;
use crate::page::RenderTarget;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Background task that reloads the projects section on a fixed interval.
///
/// The first refresh runs immediately. Dropping the refresher cancels the task;
/// [`Refresher::stop`] also waits for it to exit. A cancelled refresh hides
/// its spinner as it is dropped.
pub struct Refresher {
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
    period: Duration,
}

impl Refresher {
    /// Fails with [`PortfolioError::ConfigError`] for a zero `period`.
    pub fn start<T>(loader: Arc<ProjectsLoader>, mut target: T, period: Duration) -> Result<Self>
    where
        T: RenderTarget + Send + 'static,
    {
        if period.is_zero() {
            return Err(PortfolioError::ConfigError(
                "Refresh interval must be greater than zero".to_string(),
            ));
        }

        let cancel = CancellationToken::new();
        let token = cancel.clone();

        info!(interval_secs = period.as_secs(), "Starting periodic refresh");

        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {}
                }

                // A stop issued mid-refresh abandons the in-flight request
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    outcome = loader.refresh(&mut target) => {
                        debug!(loaded = outcome.is_loaded(), "Periodic refresh finished");
                    }
                }
            }

            debug!("Periodic refresh task exiting");
        });

        Ok(Self {
            cancel,
            handle: Some(handle),
            period,
        })
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    pub async fn stop(mut self) {
        self.cancel.cancel();

        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                warn!("Refresh task ended abnormally: {}", e);
            }
        }

        info!("Periodic refresh stopped");
    }
}

impl Drop for Refresher {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
