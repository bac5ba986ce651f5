// Analysis state: the single value the rendering layer reads.
//
// Exactly one variant holds at a time, and every transition replaces the
// whole value, so a result and an error can never be visible together.

use crate::backend::AnalysisResult;
use crate::error::IntakeError;
use crate::interpret::{interpret, DerivedDisplay};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum AnalysisState {
    /// Waiting for the user to pick a file.
    #[default]
    Idle,
    /// One submission is in flight.
    Analyzing,
    /// The backend classified the file. `display` is derived once, when the
    /// result arrives.
    Succeeded {
        result: AnalysisResult,
        display: DerivedDisplay,
    },
    /// The attempt failed; the error's Display is the message to show.
    Failed(IntakeError),
}

impl AnalysisState {
    /// Success state for a result, with its display values derived.
    pub fn succeeded(result: AnalysisResult) -> Self {
        let display = interpret(&result);
        AnalysisState::Succeeded { result, display }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, AnalysisState::Idle)
    }

    pub fn is_analyzing(&self) -> bool {
        matches!(self, AnalysisState::Analyzing)
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            AnalysisState::Succeeded { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn display(&self) -> Option<&DerivedDisplay> {
        match self {
            AnalysisState::Succeeded { display, .. } => Some(display),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&IntakeError> {
        match self {
            AnalysisState::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// User-facing failure message, if the state is `Failed`.
    pub fn error_message(&self) -> Option<String> {
        self.error().map(|e| e.message())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisState::Idle => "idle",
            AnalysisState::Analyzing => "analyzing",
            AnalysisState::Succeeded { .. } => "succeeded",
            AnalysisState::Failed(_) => "failed",
        }
    }
}

impl std::fmt::Display for AnalysisState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
