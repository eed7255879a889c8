//! Chrome tab - infrastructure layer
//!
//! Holds the only Page of a session and exposes it as [`PageActions`].

use crate::error::InteractionError;
use crate::infrastructure::PageActions;
use chromiumoxide::element::Element;
use chromiumoxide::Page;
use tracing::debug;

/// Empties an input and lets the page's listeners know
const CLEAR_INPUT_JS: &str = r#"function() {
    this.value = '';
    this.dispatchEvent(new Event('input', { bubbles: true }));
    this.dispatchEvent(new Event('change', { bubbles: true }));
}"#;

/// Same test Selenium's element_to_be_clickable applies: visible and enabled
const IS_INTERACTABLE_JS: &str = r#"function() {
    const style = window.getComputedStyle(this);
    const visible = style.visibility !== 'hidden'
        && style.display !== 'none'
        && this.getClientRects().length > 0;
    return visible && !this.disabled;
}"#;

/// A Chrome tab driven over the DevTools protocol
#[derive(Debug, Clone)]
pub struct ChromePage {
    page: Page,
}

impl ChromePage {
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// The underlying page, for session-level operations
    pub fn page(&self) -> &Page {
        &self.page
    }

    async fn element(&self, selector: &str) -> Result<Element, InteractionError> {
        self.page
            .find_element(selector)
            .await
            .map_err(|_| InteractionError::element_not_found(selector))
    }
}

/// Decode a boolean returned by page-side JS; no value counts as false
fn decode_bool(value: Option<serde_json::Value>) -> Result<bool, InteractionError> {
    match value {
        Some(value) => serde_json::from_value(value).map_err(|e| {
            InteractionError::Unexpected(format!("page script returned a non-boolean: {}", e))
        }),
        None => Ok(false),
    }
}

impl PageActions for ChromePage {
    async fn navigate(&self, url: &str) -> Result<(), InteractionError> {
        debug!("Navigating to {}", url);
        self.page.goto(url).await?;
        Ok(())
    }

    async fn is_present(&self, selector: &str) -> Result<bool, InteractionError> {
        Ok(self.page.find_element(selector).await.is_ok())
    }

    async fn is_interactable(&self, selector: &str) -> Result<bool, InteractionError> {
        let element = match self.page.find_element(selector).await {
            Ok(element) => element,
            Err(_) => return Ok(false),
        };
        let returns = element.call_js_fn(IS_INTERACTABLE_JS, false).await?;
        decode_bool(returns.result.value)
    }

    async fn fill(&self, selector: &str, value: &str) -> Result<(), InteractionError> {
        let element = self.element(selector).await?;
        element.call_js_fn(CLEAR_INPUT_JS, false).await?;
        element.click().await?;
        element.type_str(value).await?;
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<(), InteractionError> {
        self.element(selector).await?.click().await?;
        Ok(())
    }

    async fn text_of(&self, selector: &str) -> Result<String, InteractionError> {
        let text = self.element(selector).await?.inner_text().await?;
        Ok(text.unwrap_or_default().trim().to_string())
    }
}
