use chromiumoxide::handler::Handler;
use chromiumoxide::Browser;
use tracing::{error, info};

use crate::error::SetupError;

/// Attach to a browser already running with `--remote-debugging-port`
pub async fn connect_to_browser(port: u16) -> Result<(Browser, Handler), SetupError> {
    let browser_url = format!("http://localhost:{}", port);
    info!("Connecting to browser at {}", browser_url);

    Browser::connect(&browser_url).await.map_err(|source| {
        error!("Failed to connect to browser: {}", source);
        SetupError::Connect { port, source }
    })
}
