//! Browser session lifecycle
//!
//! A session is acquired once per run and released exactly once, after the
//! last query. `release` is idempotent and `Drop` covers paths that never
//! reach it.

use crate::browser::{connection, headless};
use crate::config::BrowserOptions;
use crate::error::SetupError;
use crate::infrastructure::{ChromePage, PageActions};
use chromiumoxide::cdp::browser_protocol::page::AddScriptToEvaluateOnNewDocumentParams;
use chromiumoxide::Browser;
use futures::StreamExt;
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Hides `navigator.webdriver` on every document the tab loads
const HIDE_WEBDRIVER_JS: &str =
    "Object.defineProperty(navigator, 'webdriver', { get: () => undefined })";

/// An exclusively owned browser plus the page it exposes
#[allow(async_fn_in_trait)]
pub trait SessionHandle {
    type Page: PageActions;

    fn page(&self) -> &Self::Page;

    /// Shut the session down. Calling it again does nothing.
    async fn release(&mut self);
}

/// How the session got its browser, which decides what release tears down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ownership {
    /// We started the process and must stop it
    Launched,
    /// Someone else's browser, only our tab is closed
    Attached,
}

/// A running Chrome with one tab for plate checks
pub struct BrowserSession {
    browser: Option<Browser>,
    page: ChromePage,
    handler_task: Option<JoinHandle<()>>,
    ownership: Ownership,
}

impl BrowserSession {
    /// Launch (or attach to) a browser and open a blank tab
    pub async fn acquire(options: &BrowserOptions) -> Result<Self, SetupError> {
        let (mut browser, mut handler, ownership) = match options.debug_port {
            Some(port) => {
                let (browser, handler) = connection::connect_to_browser(port).await?;
                (browser, handler, Ownership::Attached)
            }
            None => {
                let (browser, handler) = headless::launch_browser(options).await?;
                (browser, handler, Ownership::Launched)
            }
        };

        // Browser events are only processed while the handler is polled
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        // Let the browser state settle before opening a tab
        sleep(Duration::from_millis(300)).await;

        let page = match Self::open_page(&browser, options).await {
            Ok(page) => page,
            Err(e) => {
                if ownership == Ownership::Launched {
                    let _ = browser.close().await;
                    let _ = browser.wait().await;
                }
                handler_task.abort();
                return Err(e);
            }
        };

        info!("✓ Browser session ready");
        Ok(Self {
            browser: Some(browser),
            page,
            handler_task: Some(handler_task),
            ownership,
        })
    }

    async fn open_page(browser: &Browser, options: &BrowserOptions) -> Result<ChromePage, SetupError> {
        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|source| SetupError::PageCreation { source })?;

        if options.disable_automation_markers {
            let injected = page
                .execute(AddScriptToEvaluateOnNewDocumentParams::new(HIDE_WEBDRIVER_JS))
                .await
                .map(|_| ())
                .map_err(|source| SetupError::PageCreation { source });
            // The tab exists now; an attached browser would otherwise keep it open
            let tab = page.clone();
            close_on_err(injected, move || async move {
                if let Err(e) = tab.close().await {
                    warn!("Failed to close tab after setup error: {}", e);
                }
            })
            .await?;
            debug!("Automation markers hidden");
        }

        Ok(ChromePage::new(page))
    }

    pub fn is_released(&self) -> bool {
        self.browser.is_none()
    }
}

/// Run `cleanup` before handing back a failed `result`
async fn close_on_err<T, E, F, Fut>(result: Result<T, E>, cleanup: F) -> Result<T, E>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = ()>,
{
    if result.is_err() {
        cleanup().await;
    }
    result
}

impl SessionHandle for BrowserSession {
    type Page = ChromePage;

    fn page(&self) -> &ChromePage {
        &self.page
    }

    async fn release(&mut self) {
        let Some(mut browser) = self.browser.take() else {
            return;
        };

        match self.ownership {
            Ownership::Launched => {
                if let Err(e) = browser.close().await {
                    warn!("Browser did not close cleanly: {}", e);
                }
                if let Err(e) = browser.wait().await {
                    warn!("Failed waiting for browser exit: {}", e);
                }
            }
            Ownership::Attached => {
                if let Err(e) = self.page.page().clone().close().await {
                    warn!("Failed to close tab: {}", e);
                }
            }
        }

        if let Some(task) = self.handler_task.take() {
            task.abort();
        }
        info!("Browser session released");
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        if self.browser.is_some() {
            // chromiumoxide kills a launched child process when Browser drops
            warn!("Browser session dropped without release");
        }
        if let Some(task) = self.handler_task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[tokio::test]
    async fn failed_setup_step_runs_cleanup() {
        let closed = Cell::new(false);
        let flag = &closed;
        let result: Result<(), &str> =
            close_on_err(Err("script injection failed"), move || async move {
                flag.set(true);
            })
            .await;

        assert_eq!(result, Err("script injection failed"));
        assert!(closed.get());
    }

    #[tokio::test]
    async fn successful_setup_step_keeps_the_tab() {
        let closed = Cell::new(false);
        let flag = &closed;
        let result: Result<u8, &str> = close_on_err(Ok(1), move || async move {
            flag.set(true);
        })
        .await;

        assert_eq!(result, Ok(1));
        assert!(!closed.get());
    }
}
