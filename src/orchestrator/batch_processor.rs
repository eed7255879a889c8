//! Batch processor - orchestration layer
//!
//! Owns the browser session for a run: acquires it once, feeds every plate
//! through validation and the check flow in input order, paces the
//! browser-backed checks and releases the session however the loop ends.

use crate::browser::{BrowserSession, SessionHandle};
use crate::config::Config;
use crate::error::{AppResult, SetupError};
use crate::infrastructure::PageActions;
use crate::models::{ResultSet, SearchResult};
use crate::services::validate;
use crate::utils::logging;
use crate::workflow::{CheckCtx, PlateCheckFlow};
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

/// What a batch produced
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// One entry per processed input, in input order
    pub results: ResultSet,
    /// The run was stopped by the user before every input was processed
    pub interrupted: bool,
}

/// Sequential plate checks over one session
pub struct BatchProcessor {
    flow: PlateCheckFlow,
    pacing: Duration,
}

impl BatchProcessor {
    pub fn new(flow: PlateCheckFlow, pacing: Duration) -> Self {
        Self { flow, pacing }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            PlateCheckFlow::new(config.site.clone(), &config.timing),
            config.timing.pacing(),
        )
    }

    /// Process every plate, then release the session exactly once
    pub async fn run<S: SessionHandle>(
        &self,
        mut session: S,
        plates: &[String],
        shutdown: impl Future<Output = ()>,
    ) -> BatchOutcome {
        let outcome = self.process_plates(session.page(), plates, shutdown).await;
        session.release().await;
        outcome
    }

    /// The batch loop. Returns early, keeping what was collected, when
    /// `shutdown` completes.
    pub async fn process_plates<P: PageActions>(
        &self,
        page: &P,
        plates: &[String],
        shutdown: impl Future<Output = ()>,
    ) -> BatchOutcome {
        tokio::pin!(shutdown);

        let total = plates.len();
        let mut outcome = BatchOutcome::default();
        let mut browser_used = false;

        for (index, raw) in plates.iter().enumerate() {
            let ctx = CheckCtx::new(index + 1, total);
            logging::log_plate_start(&ctx, raw);

            let query = match validate(raw) {
                Ok(query) => query,
                Err(e) => {
                    warn!("{} ❌ Invalid plate number '{}': {}", ctx, raw, e);
                    outcome.results.push(SearchResult::invalid(raw.as_str(), e.to_string()));
                    continue;
                }
            };

            if browser_used && !self.pacing.is_zero() {
                info!(
                    "{} Waiting {}s before next search...",
                    ctx,
                    self.pacing.as_secs_f32()
                );
                tokio::select! {
                    biased;
                    _ = &mut shutdown => {
                        logging::log_interrupted(&ctx);
                        outcome.interrupted = true;
                        return outcome;
                    }
                    _ = sleep(self.pacing) => {}
                }
            }

            let result = tokio::select! {
                biased;
                _ = &mut shutdown => {
                    logging::log_interrupted(&ctx);
                    outcome.interrupted = true;
                    return outcome;
                }
                result = self.flow.run(page, &query, &ctx) => result,
            };
            browser_used = true;
            outcome.results.push(result);
        }

        outcome
    }

    pub fn flow(&self) -> &PlateCheckFlow {
        &self.flow
    }
}

/// Drive `fut` unless `shutdown` completes first, in which case `fut` is
/// dropped and `None` returned
async fn until_shutdown<T>(
    fut: impl Future<Output = T>,
    shutdown: impl Future<Output = ()> + Unpin,
) -> Option<T> {
    tokio::select! {
        biased;
        _ = shutdown => None,
        value = fut => Some(value),
    }
}

/// Application entry points
pub struct App {
    config: Config,
    processor: BatchProcessor,
}

impl App {
    pub fn new(config: Config) -> Self {
        let processor = BatchProcessor::from_config(&config);
        Self { config, processor }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Check many plates over one browser session
    ///
    /// Only a setup failure is an error; every per-plate problem is recorded
    /// in the result set.
    pub async fn run_batch(
        &self,
        plates: &[String],
        shutdown: impl Future<Output = ()>,
    ) -> Result<BatchOutcome, SetupError> {
        logging::log_startup(plates.len(), &self.config);
        tokio::pin!(shutdown);

        let acquired =
            until_shutdown(BrowserSession::acquire(&self.config.browser), &mut shutdown).await;
        let Some(session) = acquired else {
            warn!("⚠️ Interrupted while starting the browser");
            return Ok(BatchOutcome {
                results: ResultSet::new(),
                interrupted: true,
            });
        };
        let outcome = self.processor.run(session?, plates, shutdown).await;

        logging::print_final_stats(&outcome.results, outcome.interrupted);
        Ok(outcome)
    }

    /// Check one plate. Invalid input is rejected before a browser starts.
    ///
    /// Returns `None` when interrupted.
    pub async fn check_single(
        &self,
        raw: &str,
        shutdown: impl Future<Output = ()>,
    ) -> AppResult<Option<SearchResult>> {
        let query = validate(raw)?;
        tokio::pin!(shutdown);

        let acquired =
            until_shutdown(BrowserSession::acquire(&self.config.browser), &mut shutdown).await;
        let Some(session) = acquired else {
            warn!("⚠️ Interrupted while starting the browser");
            return Ok(None);
        };
        let outcome = self
            .processor
            .run(session?, &[query.to_string()], shutdown)
            .await;
        Ok(outcome.results.get(0).cloned())
    }
}
