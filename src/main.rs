use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use plate_search::error::AppError;
use plate_search::models::load_plates_from_file;
use plate_search::services::{summarize, ReportWriter};
use plate_search::utils::logging;
use plate_search::{App, BatchOutcome, Config, SearchResult, Status};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::sync::watch;
use tracing::{error, info, warn};

const EXIT_AVAILABLE: u8 = 0;
const EXIT_UNAVAILABLE: u8 = 1;
const EXIT_INDETERMINATE: u8 = 2;
const EXIT_SETUP_FAILED: u8 = 3;
const EXIT_INTERRUPTED: u8 = 130;

#[derive(Parser, Debug)]
#[command(name = "plate-search")]
#[command(about = "Check personalised plate availability on EzyPlates")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Show the browser window
    #[arg(long, global = true)]
    headed: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a single plate; the exit code tells the outcome
    Check {
        /// Plate number, e.g. EZYPLTE
        plate: String,
    },
    /// Check many plates and optionally write a CSV report
    Batch(BatchArgs),
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// Plate numbers to check
    plates: Vec<String>,

    /// Newline-delimited plate file (`#` comments allowed)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// CSV report destination
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::from(EXIT_INDETERMINATE);
        }
    };
    logging::init(config.verbose_logging);

    let app = App::new(config);
    let code = match cli.command {
        Command::Check { plate } => run_check(&app, &plate).await,
        Command::Batch(args) => run_batch(&app, args).await,
    };

    match code {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::from(EXIT_INDETERMINATE)
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_toml_file(path)?,
        None => Config::default(),
    };
    config.apply_env()?;

    if cli.verbose {
        config.verbose_logging = true;
    }
    if cli.headed {
        config.browser.headless = false;
    }
    Ok(config)
}

async fn run_check(app: &App, plate: &str) -> Result<u8> {
    let result = match app.check_single(plate, interrupt_signal()).await {
        Ok(Some(result)) => result,
        Ok(None) => {
            println!("\nSearch interrupted by user");
            return Ok(EXIT_INTERRUPTED);
        }
        Err(e @ (AppError::Validation(_) | AppError::Setup(_))) => {
            eprintln!("Error: {}", e);
            if matches!(e, AppError::Setup(_)) {
                eprintln!("Please make sure Chrome or Chromium is installed.");
            }
            return Ok(error_exit_code(&e));
        }
        Err(e) => return Err(e.into()),
    };

    print_result(&result);
    Ok(status_exit_code(result.status()))
}

/// Exit code of a completed single check
fn status_exit_code(status: Status) -> u8 {
    match status {
        Status::Available => EXIT_AVAILABLE,
        Status::Unavailable => EXIT_UNAVAILABLE,
        Status::Unknown | Status::Error | Status::Invalid => EXIT_INDETERMINATE,
    }
}

/// Exit code when no result could be produced
fn error_exit_code(err: &AppError) -> u8 {
    match err {
        AppError::Setup(_) => EXIT_SETUP_FAILED,
        _ => EXIT_INDETERMINATE,
    }
}

/// Exit code of a finished batch
fn batch_exit_code(outcome: &BatchOutcome) -> u8 {
    if outcome.interrupted {
        EXIT_INTERRUPTED
    } else {
        EXIT_AVAILABLE
    }
}

/// Plates from the command line followed by those in `--file`
async fn gather_plates(args: &BatchArgs) -> Result<Vec<String>> {
    let mut plates = args.plates.clone();
    if let Some(file) = &args.file {
        let from_file = load_plates_from_file(file)
            .await
            .with_context(|| format!("reading plate list {}", file.display()))?;
        plates.extend(from_file);
    }
    Ok(plates)
}

async fn run_batch(app: &App, args: BatchArgs) -> Result<u8> {
    let plates = gather_plates(&args).await?;
    if plates.is_empty() {
        eprintln!("Error: No plate numbers provided");
        return Ok(EXIT_INDETERMINATE);
    }

    let outcome = match app.run_batch(&plates, interrupt_signal()).await {
        Ok(outcome) => outcome,
        Err(e) => {
            let e = AppError::from(e);
            eprintln!("Error: {}", e);
            eprintln!("Please make sure Chrome or Chromium is installed.");
            return Ok(error_exit_code(&e));
        }
    };

    if let Some(output) = &args.output {
        ReportWriter::write(&outcome.results, output)?;
        info!("📁 Results saved to: {}", output.display());
        println!("\nResults saved to: {}", output.display());
    }

    println!("\n{}", summarize(&outcome.results));

    if outcome.interrupted {
        warn!("Batch search interrupted by user");
    }
    Ok(batch_exit_code(&outcome))
}

fn print_result(result: &SearchResult) {
    let rule = "=".repeat(60);
    println!("\n{rule}");
    println!("SEARCH RESULTS");
    println!("{rule}");
    println!("Plate Number: {}", result.plate_number());
    println!("Status: {}", result.status().as_str().to_uppercase());
    println!("Message: {}", result.message());
    println!("{rule}");
    match result.status() {
        Status::Available => println!("🎉 Plate number is AVAILABLE!"),
        Status::Unavailable => println!("❌ Plate number is UNAVAILABLE"),
        _ => println!("❓ Status unknown or error occurred"),
    }
}

/// Completes on the first Ctrl-C; a second one exits at once
///
/// The listener is installed immediately so an interrupt during browser
/// startup is still seen.
fn interrupt_signal() -> impl std::future::Future<Output = ()> {
    let (tx, mut rx) = watch::channel(false);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                let _ = tx.send(true);
                // cleanup may hang on an unresponsive browser
                if tokio::signal::ctrl_c().await.is_ok() {
                    eprintln!("\nInterrupted again, exiting without cleanup");
                    std::process::exit(i32::from(EXIT_INTERRUPTED));
                }
            }
            Err(e) => {
                warn!("Could not listen for Ctrl-C: {}", e);
                // keep the sender alive so the receiver never fires
                std::future::pending::<()>().await;
            }
        }
    });
    async move {
        let _ = rx.wait_for(|interrupted| *interrupted).await;
    }
}
