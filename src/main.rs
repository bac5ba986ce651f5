use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use threatsleuth::backend::PredictClient;
use threatsleuth::config::Config;
use threatsleuth::intake::{AnalysisState, FileCandidate, IntakeController};
use threatsleuth::output::terminal;

/// ThreatSleuth: AI-powered malware detection.
///
/// Uploads a file to the ThreatSleuth classification API and shows whether
/// it looks malicious or benign, with the features behind the verdict.
#[derive(Parser)]
#[command(name = "threatsleuth", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a file (.exe, .dll, .zip, .txt or .bin, max 50 MB)
    Analyze {
        /// Path to the file to analyze
        file: PathBuf,

        /// Print the result and derived display values as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that the backend is up and show its upload limits
    Status,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("threatsleuth=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { file, json } => {
            let config = Config::load()?;
            let client = PredictClient::from_config(&config)?;
            info!(api_url = %config.api_url, "Using classification backend");

            let controller = IntakeController::new(Arc::new(client))
                .with_timeout(config.request_timeout);

            let candidate = FileCandidate::from_path(&file).await?;

            if let Some(submission) = controller.select_file(candidate).await {
                let spinner = if json { None } else { Some(analyzing_spinner()) };
                submission.settled().await;
                if let Some(spinner) = spinner {
                    spinner.finish_and_clear();
                }
            }

            let state = controller.state().await;
            if json {
                print_json(&state)?;
            } else {
                terminal::display_state(&state);
            }

            if matches!(state, AnalysisState::Failed(_)) {
                std::process::exit(1);
            }
        }

        Commands::Status => {
            let config = Config::load()?;
            let client = PredictClient::from_config(&config)?;

            let health = client.health().await.with_context(|| {
                format!(
                    "Backend at {} is not responding. Is it running?",
                    config.api_url
                )
            })?;

            let stats = match client.stats().await {
                Ok(s) => Some(s),
                Err(e) => {
                    warn!(error = %e, "Could not fetch backend stats");
                    None
                }
            };

            terminal::display_status(client.base_url(), &health, stats.as_ref());
        }
    }

    Ok(())
}

fn analyzing_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Analyzing file... this may take a few moments");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn print_json(state: &AnalysisState) -> Result<()> {
    let value = serde_json::json!({
        "state": state.as_str(),
        "result": state.result(),
        "display": state.display(),
        "error": state.error_message(),
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
