// Intake: file selection, validation and the request lifecycle.
//
// `IntakeController` is the only writer of `AnalysisState`. The rendering
// layer reads snapshots of that state and calls back into `select_file`
// and `reset`.

pub mod controller;
pub mod file;
pub mod state;

pub use controller::{state_for_outcome, IntakeController, Submission};
pub use file::{extension_of, validate, FileCandidate, SelectedFile};
pub use state::AnalysisState;
