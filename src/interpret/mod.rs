// Result interpretation: turns a classification into display-ready values.
//
// Everything here is pure: no I/O, no state, and the same result always
// yields the same `DerivedDisplay`. The intake controller calls `interpret`
// once when a result arrives; renderers only read the output.

pub mod format;
pub mod levels;

use serde::Serialize;

use crate::backend::AnalysisResult;

pub use format::{
    confidence_arc_degrees, confidence_percent, entropy_fill_percent, format_entropy,
    format_file_size, MAX_ENTROPY,
};
pub use levels::{ConfidenceTier, RiskLevel};

/// Display values derived from one `AnalysisResult`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedDisplay {
    pub risk_level: RiskLevel,
    /// "MALICIOUS" or "BENIGN"
    pub verdict_label: &'static str,
    pub confidence_tier: ConfidenceTier,
    /// Whole-number confidence, 0 to 100
    pub confidence_percent: u8,
    /// Sweep of the confidence ring, 0 to 360
    pub confidence_arc_degrees: f64,
    pub formatted_file_size: String,
    /// Entropy with two decimals
    pub entropy_display: String,
    /// Width of the entropy bar, 0 to 100
    pub entropy_fill_percent: f64,
    pub imports_count: u64,
}

/// Derive every display value for a result.
pub fn interpret(result: &AnalysisResult) -> DerivedDisplay {
    let risk_level = RiskLevel::from_prediction(result.prediction);
    let verdict_label = if result.is_malicious() {
        "MALICIOUS"
    } else {
        "BENIGN"
    };

    DerivedDisplay {
        risk_level,
        verdict_label,
        confidence_tier: ConfidenceTier::from_confidence(result.confidence),
        confidence_percent: confidence_percent(result.confidence),
        confidence_arc_degrees: confidence_arc_degrees(result.confidence),
        formatted_file_size: format_file_size(result.features.file_size),
        entropy_display: format_entropy(result.features.entropy),
        entropy_fill_percent: entropy_fill_percent(result.features.entropy),
        imports_count: result.features.imports_count,
    }
}
