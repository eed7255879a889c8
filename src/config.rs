use crate::error::ConfigError;
use crate::workflow::PageContract;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Program configuration
///
/// Built from defaults, an optional TOML file and environment overrides, in
/// that order.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub browser: BrowserOptions,
    /// Where the form lives and how to find its elements
    pub site: PageContract,
    pub timing: Timing,
    pub verbose_logging: bool,
}

/// Browser launch options
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserOptions {
    pub headless: bool,
    pub disable_sandbox: bool,
    pub window_width: u32,
    pub window_height: u32,
    /// Hide the usual "controlled by automation" markers
    pub disable_automation_markers: bool,
    /// Chrome/Chromium binary, auto-detected when unset
    pub chrome_executable: Option<PathBuf>,
    /// Attach to a browser already listening on this DevTools port instead of launching one
    pub debug_port: Option<u16>,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            headless: true,
            disable_sandbox: true,
            window_width: 1920,
            window_height: 1080,
            disable_automation_markers: true,
            chrome_executable: None,
            debug_port: None,
        }
    }
}

/// Timeouts and delays
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    /// Upper bound for every wait step of a check
    pub step_timeout_secs: u64,
    /// Pause after the page body appears, for client-side rendering
    pub page_settle_ms: u64,
    /// How often element and result polling re-reads the page
    pub poll_interval_ms: u64,
    /// Politeness delay between two browser-backed checks
    pub pacing_secs: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            step_timeout_secs: 15,
            page_settle_ms: 2000,
            poll_interval_ms: 250,
            pacing_secs: 2,
        }
    }
}

impl Timing {
    pub fn step_timeout(&self) -> Duration {
        Duration::from_secs(self.step_timeout_secs)
    }

    pub fn page_settle(&self) -> Duration {
        Duration::from_millis(self.page_settle_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn pacing(&self) -> Duration {
        Duration::from_secs(self.pacing_secs)
    }
}

impl Config {
    /// Defaults plus environment overrides
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Load a TOML file; missing sections and keys fall back to defaults
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Override fields from `PLATE_*`, `CHROME_EXECUTABLE` and `BROWSER_DEBUG_PORT`
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(url) = std::env::var("PLATE_TARGET_URL") {
            self.site.url = url;
        }
        if let Some(headless) = env_parse("PLATE_HEADLESS", "bool")? {
            self.browser.headless = headless;
        }
        if let Some(secs) = env_parse("PLATE_STEP_TIMEOUT_SECS", "u64")? {
            self.timing.step_timeout_secs = secs;
        }
        if let Some(secs) = env_parse("PLATE_PACING_SECS", "u64")? {
            self.timing.pacing_secs = secs;
        }
        if let Ok(path) = std::env::var("CHROME_EXECUTABLE") {
            self.browser.chrome_executable = Some(PathBuf::from(path));
        }
        if let Some(port) = env_parse("BROWSER_DEBUG_PORT", "u16")? {
            self.browser.debug_port = Some(port);
        }
        Ok(())
    }
}

fn env_parse<T: FromStr>(var_name: &str, expected_type: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(var_name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }),
        Err(_) => Ok(None),
    }
}
