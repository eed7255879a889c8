//! Page capabilities the check flow depends on
//!
//! The flow only needs a handful of primitives from a browser tab. Keeping
//! them behind a trait lets the flow and the batch loop run against a
//! scripted page in tests.

use crate::error::InteractionError;

/// Browser tab primitives, addressed by CSS selector
#[allow(async_fn_in_trait)]
pub trait PageActions {
    /// Load `url` and wait for the navigation to finish
    async fn navigate(&self, url: &str) -> Result<(), InteractionError>;

    /// Whether an element matching `selector` currently exists
    async fn is_present(&self, selector: &str) -> Result<bool, InteractionError>;

    /// Whether the element is enabled and visible, i.e. can be clicked
    async fn is_interactable(&self, selector: &str) -> Result<bool, InteractionError>;

    /// Clear the input's current value and type `value` into it
    async fn fill(&self, selector: &str, value: &str) -> Result<(), InteractionError>;

    async fn click(&self, selector: &str) -> Result<(), InteractionError>;

    /// Rendered text of the element, trimmed
    async fn text_of(&self, selector: &str) -> Result<String, InteractionError>;
}
