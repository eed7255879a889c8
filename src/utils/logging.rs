//! Logging setup and the banner lines printed around a run

use crate::config::Config;
use crate::models::{ResultSet, Status};
use crate::workflow::CheckCtx;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber
///
/// `RUST_LOG` wins over `verbose`. Calling it twice is harmless.
///
/// # Arguments
/// - `verbose`: debug level for this crate instead of info
pub fn init(verbose: bool) {
    let default_filter = if verbose {
        "plate_search=debug,info"
    } else {
        "plate_search=info,warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .compact(),
        )
        .try_init();
}

/// Log the batch start banner
///
/// # Arguments
/// - `total`: number of plates in the batch
/// - `config`: run configuration, for the target URL and timings
pub fn log_startup(total: usize, config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 Starting batch search for {} plate numbers", total);
    info!("🌐 Target: {}", config.site.url);
    info!(
        "⏱️ Step timeout {}s, pause between searches {}s",
        config.timing.step_timeout_secs, config.timing.pacing_secs
    );
    info!("{}", "=".repeat(60));
}

/// Log the separator and heading for one plate
///
/// # Arguments
/// - `ctx`: position of the plate in the batch
/// - `raw`: the plate as given, before validation
pub fn log_plate_start(ctx: &CheckCtx, raw: &str) {
    info!("\n{}", "─".repeat(60));
    info!("{} Searching plate: {}", ctx, truncate_text(raw, 20));
}

/// Log that the batch stopped at `ctx`
///
/// # Arguments
/// - `ctx`: position the batch was at when interrupted
pub fn log_interrupted(ctx: &CheckCtx) {
    warn!("{} ⚠️ Batch search interrupted by user", ctx);
}

/// Log the batch finish banner with per-status counts
///
/// # Arguments
/// - `results`: everything collected, possibly partial
/// - `interrupted`: whether the batch ended early
pub fn print_final_stats(results: &ResultSet, interrupted: bool) {
    info!("\n{}", "=".repeat(60));
    info!("📊 Batch finished{}", if interrupted { " (interrupted)" } else { "" });
    info!(
        "Finished at: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!(
        "✅ Available: {} | ❌ Unavailable: {} | ❓ Other: {}",
        results.count(Status::Available),
        results.count(Status::Unavailable),
        results.len() - results.count(Status::Available) - results.count(Status::Unavailable)
    );
    info!("{}", "=".repeat(60));
}

/// Shorten long input for log lines
///
/// # Arguments
/// - `text`: text to shorten
/// - `max_len`: maximum number of characters kept
///
/// # Returns
/// `text` unchanged, or its first `max_len` characters followed by `...`
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
