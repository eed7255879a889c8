use crate::config::BrowserOptions;
use crate::error::SetupError;
use chromiumoxide::handler::Handler;
use chromiumoxide::{Browser, BrowserConfig};
use tracing::{debug, error, info};

/// Command-line flags derived from the options
///
/// Window size, sandbox and headless mode go through the builder; this is
/// everything else.
pub fn launch_args(options: &BrowserOptions) -> Vec<&'static str> {
    let mut args = vec![
        "--disable-gpu",
        "--disable-dev-shm-usage",
        "--disable-extensions",
        "--disable-notifications",
        "--no-first-run",
        "--mute-audio",
    ];
    if options.disable_automation_markers {
        args.push("--disable-blink-features=AutomationControlled");
    }
    args
}

/// Build the chromiumoxide launch configuration
pub fn browser_config(options: &BrowserOptions) -> Result<BrowserConfig, SetupError> {
    let mut builder = BrowserConfig::builder()
        .window_size(options.window_width, options.window_height)
        .args(launch_args(options));

    builder = if options.headless {
        builder.new_headless_mode()
    } else {
        builder.with_head()
    };
    if options.disable_sandbox {
        builder = builder.no_sandbox();
    }
    if let Some(executable) = &options.chrome_executable {
        builder = builder.chrome_executable(executable);
    }

    builder.build().map_err(|e| {
        error!("Invalid browser configuration: {}", e);
        SetupError::Configuration(e)
    })
}

/// Launch a fresh browser process
pub async fn launch_browser(options: &BrowserOptions) -> Result<(Browser, Handler), SetupError> {
    info!(
        "🚀 Launching {} browser...",
        if options.headless { "headless" } else { "headed" }
    );
    let config = browser_config(options)?;

    let (browser, handler) = Browser::launch(config).await.map_err(|source| {
        error!("Failed to launch browser: {}", source);
        SetupError::Launch { source }
    })?;
    debug!("Browser process started");

    Ok((browser, handler))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn automation_flag_follows_option() {
        let mut options = BrowserOptions::default();
        assert!(launch_args(&options).contains(&"--disable-blink-features=AutomationControlled"));

        options.disable_automation_markers = false;
        assert!(!launch_args(&options)
            .iter()
            .any(|a| a.contains("AutomationControlled")));
    }
}
