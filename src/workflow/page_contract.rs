use serde::{Deserialize, Serialize};

pub const EZYPLATES_URL: &str = "https://ezyplates.sa.gov.au/";

/// Identifiers the check relies on, owned by the external site
///
/// When the portal changes its markup this is the one place to update
/// (along with the phrases in [`crate::services::classifier`]).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageContract {
    pub url: String,
    /// Marks the document as loaded
    pub page_ready: String,
    /// Single-line plate text input
    pub plate_input: String,
    pub submit_button: String,
    /// Populated asynchronously after submission
    pub result_display: String,
}

impl Default for PageContract {
    fn default() -> Self {
        Self {
            url: EZYPLATES_URL.to_string(),
            page_ready: "body".to_string(),
            plate_input: "#plate-number-line-1".to_string(),
            submit_button: "#check-availability".to_string(),
            result_display: "#plate-availability-result".to_string(),
        }
    }
}
