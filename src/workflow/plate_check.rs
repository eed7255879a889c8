//! Single plate check - workflow layer
//!
//! Steps, each bounded by the step timeout:
//! 1. load the page and wait for it to be ready
//! 2. clear the plate input and type the plate
//! 3. click submit once it is interactable
//! 4. wait for the result panel and read its text until it settles
//! 5. classify the text

use crate::config::Timing;
use crate::error::InteractionError;
use crate::infrastructure::wait::{read_until_stable, wait_until};
use crate::infrastructure::PageActions;
use crate::models::{PlateQuery, SearchResult, Status};
use crate::services::classify;
use crate::workflow::{CheckCtx, PageContract};
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// The check flow
///
/// Holds no browser resources; the page is passed in for every run.
#[derive(Debug, Clone)]
pub struct PlateCheckFlow {
    contract: PageContract,
    step_timeout: Duration,
    page_settle: Duration,
    poll_interval: Duration,
}

impl PlateCheckFlow {
    pub fn new(contract: PageContract, timing: &Timing) -> Self {
        Self {
            contract,
            step_timeout: timing.step_timeout(),
            page_settle: timing.page_settle(),
            poll_interval: timing.poll_interval(),
        }
    }

    pub fn contract(&self) -> &PageContract {
        &self.contract
    }

    /// Check one plate. Every failure becomes a `status=error` result.
    pub async fn run<P: PageActions>(
        &self,
        page: &P,
        query: &PlateQuery,
        ctx: &CheckCtx,
    ) -> SearchResult {
        match self.interact(page, query, ctx).await {
            Ok(text) => {
                let status = Status::from(classify(&text));
                info!("{} {} → {}", ctx, query, status.as_str().to_uppercase());
                SearchResult::new(query.as_str(), status, text)
            }
            Err(e) => {
                warn!("{} ❌ {}: {}", ctx, query, e);
                SearchResult::error(query.as_str(), e.to_string())
            }
        }
    }

    /// Drive the form and return the raw result text
    async fn interact<P: PageActions>(
        &self,
        page: &P,
        query: &PlateQuery,
        ctx: &CheckCtx,
    ) -> Result<String, InteractionError> {
        let c = &self.contract;

        debug!("{} Navigating to {}", ctx, c.url);
        self.bounded("page load", page.navigate(&c.url)).await?;
        self.wait_for_element(page, &c.page_ready).await?;
        if !self.page_settle.is_zero() {
            sleep(self.page_settle).await;
        }

        info!("{} 🔍 Searching for plate number: {}", ctx, query);
        self.wait_for_element(page, &c.plate_input).await?;
        self.bounded("plate input", page.fill(&c.plate_input, query.as_str()))
            .await?;

        let submit = c.submit_button.as_str();
        wait_until(
            &format!("{} to become clickable", submit),
            self.step_timeout,
            self.poll_interval,
            move || page.is_interactable(submit),
        )
        .await?;
        self.bounded("submit", page.click(&c.submit_button)).await?;

        debug!("{} Waiting for results...", ctx);
        self.wait_for_element(page, &c.result_display).await?;
        let result = c.result_display.as_str();
        read_until_stable(
            &format!("{} text", result),
            self.step_timeout,
            self.poll_interval,
            move || page.text_of(result),
        )
        .await
    }

    async fn wait_for_element<P: PageActions>(
        &self,
        page: &P,
        selector: &str,
    ) -> Result<(), InteractionError> {
        wait_until(selector, self.step_timeout, self.poll_interval, move || {
            page.is_present(selector)
        })
        .await
    }

    /// Run a single page call under the step timeout
    async fn bounded<T>(
        &self,
        step: &str,
        fut: impl Future<Output = Result<T, InteractionError>>,
    ) -> Result<T, InteractionError> {
        tokio::time::timeout(self.step_timeout, fut)
            .await
            .map_err(|_| InteractionError::timeout(step, self.step_timeout))?
    }
}
