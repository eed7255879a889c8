use std::time::Duration;

use thiserror::Error;

use crate::models::plate::MAX_PLATE_LEN;

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed plate input, never reaches the browser
    #[error("invalid plate number: {0}")]
    Validation(#[from] ValidationError),
    /// The browser could not be started or attached
    #[error("browser setup failed: {0}")]
    Setup(#[from] SetupError),
    /// A page interaction failed
    #[error("page interaction failed: {0}")]
    Interaction(#[from] InteractionError),
    /// Plate list or report file problems
    #[error("file error: {0}")]
    File(#[from] FileError),
    /// Configuration problems
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Plate format violations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Plate number cannot be empty")]
    Empty,
    #[error("Plate number cannot be longer than {} characters", MAX_PLATE_LEN)]
    TooLong { len: usize },
    #[error("Plate number should only contain letters and numbers")]
    NotAlphanumeric { found: char },
}

/// Browser session setup errors
#[derive(Debug, Error)]
pub enum SetupError {
    /// Invalid launch options
    #[error("invalid browser configuration: {0}")]
    Configuration(String),
    /// Browser binary missing or failed to start
    #[error("could not launch browser (is Chrome/Chromium installed?): {source}")]
    Launch {
        #[source]
        source: chromiumoxide::error::CdpError,
    },
    /// Could not attach to an already running browser
    #[error("could not connect to browser on port {port}: {source}")]
    Connect {
        port: u16,
        #[source]
        source: chromiumoxide::error::CdpError,
    },
    /// Browser started but no usable tab could be opened
    #[error("could not open a browser tab: {source}")]
    PageCreation {
        #[source]
        source: chromiumoxide::error::CdpError,
    },
}

/// Failures while driving the target page
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InteractionError {
    #[error("Timeout waiting for {step} ({}s)", .after.as_secs())]
    Timeout { step: String, after: Duration },
    #[error("Element not found: {element}. The website structure might have changed.")]
    ElementNotFound { element: String },
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// File errors
#[derive(Debug, Error)]
pub enum FileError {
    #[error("file not found: {path}")]
    NotFound { path: String },
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: csv::Error,
    },
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("environment variable {var_name}: value '{value}' is not a valid {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

impl From<chromiumoxide::error::CdpError> for InteractionError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        InteractionError::Unexpected(err.to_string())
    }
}

// ========== Convenience constructors ==========

impl InteractionError {
    pub fn timeout(step: impl Into<String>, after: Duration) -> Self {
        InteractionError::Timeout {
            step: step.into(),
            after,
        }
    }

    pub fn element_not_found(element: impl Into<String>) -> Self {
        InteractionError::ElementNotFound {
            element: element.into(),
        }
    }
}

impl FileError {
    pub fn read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            FileError::NotFound { path }
        } else {
            FileError::Read { path, source }
        }
    }
}

/// Application result type
pub type AppResult<T> = Result<T, AppError>;
