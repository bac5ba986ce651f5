// Colored terminal output for analysis results and backend status.
//
// This is the presentation layer: it only reads `AnalysisState` and the
// derived display values, never the transport.

use colored::{ColoredString, Colorize};

use super::{text_bar, truncate_chars};
use crate::backend::{AnalysisResult, ApiStats, HealthStatus};
use crate::config::{ALLOWED_EXTENSIONS, MAX_FILE_SIZE};
use crate::error::IntakeError;
use crate::intake::AnalysisState;
use crate::interpret::{format_file_size, ConfidenceTier, DerivedDisplay, RiskLevel};

const BAR_WIDTH: usize = 32;

/// How the backend reaches its verdict, shown under every result.
pub const TECHNICAL_DETAILS: [(&str, &str); 3] = [
    ("Analysis Method", "Static Feature Analysis + ML"),
    ("Model", "Random Forest Classifier"),
    ("Features Used", "File Size, Entropy, Import Count"),
];

/// Render whatever the current state calls for.
pub fn display_state(state: &AnalysisState) {
    match state {
        AnalysisState::Idle => display_idle(),
        AnalysisState::Analyzing => {
            println!("{}", "Analyzing file...".bold());
            println!("{}", "This may take a few moments".dimmed());
        }
        AnalysisState::Succeeded { result, display } => display_result(result, display),
        AnalysisState::Failed(e) => display_failure(e),
    }
}

/// Upload prompt with the accepted formats.
pub fn display_idle() {
    let formats: Vec<String> = ALLOWED_EXTENSIONS.iter().map(|e| format!(".{e}")).collect();
    println!("{}", "Upload a file for analysis".bold());
    println!(
        "{}",
        format!(
            "Supported formats: {} (Max: {})",
            formats.join(", "),
            format_file_size(MAX_FILE_SIZE)
        )
        .dimmed()
    );
}

/// Full result card for a classified file.
pub fn display_result(result: &AnalysisResult, display: &DerivedDisplay) {
    let verdict = match display.risk_level {
        RiskLevel::High => format!("!! {}", display.verdict_label).red().bold(),
        RiskLevel::Low => format!("OK {}", display.verdict_label).green().bold(),
    };

    println!();
    println!("  {}  {}", verdict, truncate_chars(&result.filename, 60).dimmed());
    println!(
        "  Confidence: {} ({} confidence)",
        colorize_tier(display.confidence_tier, &format!("{}%", display.confidence_percent)),
        display.confidence_tier
    );

    println!("\n{}", "Analysis Explanation".bold());
    println!("  {}", result.explanation);

    println!("\n{}", "File Characteristics".bold());
    println!("  {:<14} {}", "File Size".dimmed(), display.formatted_file_size);
    println!(
        "  {:<14} {}  {}",
        "Entropy".dimmed(),
        display.entropy_display,
        text_bar(display.entropy_fill_percent, BAR_WIDTH).cyan()
    );
    println!("  {:<14} {}", "Import Count".dimmed(), display.imports_count);

    println!("\n{}", "Risk Assessment".bold());
    let risk = match display.risk_level {
        RiskLevel::High => display.risk_level.label().red().bold(),
        RiskLevel::Low => display.risk_level.label().green().bold(),
    };
    println!("  {risk}");
    println!("  {}", display.risk_level.description());

    println!("\n{}", "Technical Details".bold());
    for (label, value) in TECHNICAL_DETAILS {
        println!("  {:<17} {}", format!("{label}:").dimmed(), value);
    }

    println!(
        "\n{}",
        "Disclaimer: this analysis is for educational purposes only. Results should not be \
         considered definitive for production security decisions."
            .dimmed()
    );
}

/// The single failure message, with a retry hint where retrying can help.
pub fn display_failure(error: &IntakeError) {
    println!("{} {}", "Analysis Failed:".red().bold(), error);
    if error.is_retryable() {
        println!("{}", "Try another file, or run the analysis again.".dimmed());
    }
}

/// Backend health and upload limits, for the `status` command.
pub fn display_status(api_url: &str, health: &HealthStatus, stats: Option<&ApiStats>) {
    println!("Backend: {api_url}");
    let status = if health.status == "healthy" {
        health.status.green()
    } else {
        health.status.yellow()
    };
    println!("Service: {} v{} ({})", health.service, health.version, status);

    let model = if health.model_loaded {
        "loaded".green()
    } else {
        "not loaded (heuristic fallback)".yellow()
    };
    println!("Model: {model}");

    if let Some(stats) = stats {
        println!("Accepted extensions: {}", stats.allowed_extensions.join(", "));
        println!("Max upload size: {} MB", stats.max_file_size_mb);
    }
}

fn colorize_tier(tier: ConfidenceTier, text: &str) -> ColoredString {
    match tier {
        ConfidenceTier::High => text.green().bold(),
        ConfidenceTier::Medium => text.yellow().bold(),
        ConfidenceTier::Low => text.red().bold(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_technical_details_name_model_and_features() {
        let labels: Vec<&str> = TECHNICAL_DETAILS.iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, ["Analysis Method", "Model", "Features Used"]);
        assert_eq!(TECHNICAL_DETAILS[1].1, "Random Forest Classifier");
        assert_eq!(TECHNICAL_DETAILS[2].1, "File Size, Entropy, Import Count");
    }
}
