// Wire models for the classification backend.
//
// These mirror the JSON the backend returns. `AnalysisResult` is the only
// one the intake state machine depends on; the health and stats types back
// the `status` command.

use serde::{Deserialize, Serialize};

/// The backend's verdict for a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Prediction {
    Malicious,
    Benign,
}

impl Prediction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Prediction::Malicious => "malicious",
            Prediction::Benign => "benign",
        }
    }
}

impl std::fmt::Display for Prediction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Static features the backend extracted from the upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileFeatures {
    /// Size in bytes as measured by the backend
    pub file_size: u64,
    /// Shannon entropy of the byte distribution, nominally 0.0 to 8.0
    pub entropy: f64,
    /// PE imports (or archive members for zips)
    pub imports_count: u64,
}

/// Successful response body of `POST /api/predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub filename: String,
    pub prediction: Prediction,
    /// Probability-like certainty of the verdict, 0.0 to 1.0
    pub confidence: f64,
    pub explanation: String,
    pub features: FileFeatures,
}

impl AnalysisResult {
    /// Decode and check a 2xx body against the response contract.
    ///
    /// Every field must be present and well-typed, and `confidence` must be
    /// a finite value in [0, 1]. Entropy is deliberately not range-checked
    /// here; display code clamps it.
    pub fn from_body(body: &str) -> Result<Self, String> {
        let result: AnalysisResult =
            serde_json::from_str(body).map_err(|e| format!("invalid JSON body: {e}"))?;

        if !result.confidence.is_finite() || !(0.0..=1.0).contains(&result.confidence) {
            return Err(format!(
                "confidence {} is outside [0, 1]",
                result.confidence
            ));
        }
        if !result.features.entropy.is_finite() {
            return Err("entropy is not a finite number".to_string());
        }

        Ok(result)
    }

    pub fn is_malicious(&self) -> bool {
        self.prediction == Prediction::Malicious
    }
}

/// Error body the backend sends with non-2xx responses. The field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    pub error: Option<String>,
}

impl ErrorBody {
    /// Pull the `error` message out of a response body, if there is one.
    ///
    /// Bodies that are not JSON objects, or whose `error` is not a string,
    /// yield `None`.
    pub fn message_from(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorBody>(body).ok()?.error
    }
}

/// Response from the backend's health check at `GET /`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
    pub version: String,
    pub model_loaded: bool,
}

/// Response from `GET /api/stats`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiStats {
    pub allowed_extensions: Vec<String>,
    pub max_file_size_mb: u64,
    /// "loaded" or "fallback_mode"
    pub model_status: String,
}
