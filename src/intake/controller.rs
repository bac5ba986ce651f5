// Intake controller: validates a picked file, runs its one submission in a
// background tokio task, and folds the outcome into the analysis state.
//
// Every `select_file` and `reset` bumps a generation counter. A submission
// task carries the generation it was started under, and its completion is
// only applied if that generation is still current.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::file::{validate, FileCandidate};
use super::state::AnalysisState;
use crate::backend::{AnalysisResult, ErrorBody, SubmissionOutcome, Submitter};
use crate::config::REQUEST_TIMEOUT;
use crate::error::IntakeError;

struct Inner {
    state: AnalysisState,
    generation: u64,
}

/// Owner of the analysis state. Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct IntakeController {
    submitter: Arc<dyn Submitter>,
    inner: Arc<RwLock<Inner>>,
    timeout: Duration,
}

/// Handle to a submission started by [`IntakeController::select_file`].
pub struct Submission {
    pub generation: u64,
    handle: JoinHandle<()>,
}

impl Submission {
    /// Wait for the submission task to finish and its outcome to be applied
    /// (or discarded, if it was superseded in the meantime).
    pub async fn settled(self) {
        if let Err(e) = self.handle.await {
            warn!(generation = self.generation, error = %e, "Submission task did not complete");
        }
    }
}

impl IntakeController {
    pub fn new(submitter: Arc<dyn Submitter>) -> Self {
        Self {
            submitter,
            inner: Arc::new(RwLock::new(Inner {
                state: AnalysisState::Idle,
                generation: 0,
            })),
            timeout: REQUEST_TIMEOUT,
        }
    }

    /// Override how long a submission may take before it is abandoned.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Snapshot of the current state.
    pub async fn state(&self) -> AnalysisState {
        self.inner.read().await.state.clone()
    }

    /// Generation of the most recent `select_file` or `reset`.
    pub async fn generation(&self) -> u64 {
        self.inner.read().await.generation
    }

    /// Pick a file for analysis.
    ///
    /// Always allowed, and always abandons whatever came before (a displayed
    /// result, an error, or an in-flight submission). A file that fails
    /// validation moves straight to `Failed` and nothing is sent; a valid
    /// file moves to `Analyzing` and exactly one submission is spawned.
    pub async fn select_file(&self, candidate: FileCandidate) -> Option<Submission> {
        let name = candidate.name.clone();
        let size_bytes = candidate.size_bytes;

        let mut inner = self.inner.write().await;
        inner.generation += 1;
        let generation = inner.generation;

        let file = match validate(candidate) {
            Ok(f) => f,
            Err(e) => {
                warn!(filename = %name, size_bytes, error = %e, "File rejected before upload");
                inner.state = AnalysisState::Failed(e);
                return None;
            }
        };

        inner.state = AnalysisState::Analyzing;
        drop(inner);

        info!(generation, filename = %name, size_bytes, "Submitting file for analysis");

        let controller = self.clone();
        let handle = tokio::spawn(async move {
            let submitter = controller.submitter.clone();
            let timeout = controller.timeout;

            // The upload runs in its own task so a panicking submitter still
            // settles this generation.
            let attempt = tokio::spawn(async move {
                tokio::time::timeout(timeout, submitter.submit(file)).await
            });

            let outcome = match attempt.await {
                Ok(Ok(outcome)) => outcome,
                Ok(Err(_)) => SubmissionOutcome::OtherFailure(format!(
                    "no response within {}s",
                    timeout.as_secs()
                )),
                Err(e) => SubmissionOutcome::OtherFailure(format!("submission task failed: {e}")),
            };
            controller.on_submission_complete(generation, outcome).await;
        });

        Some(Submission { generation, handle })
    }

    /// Apply the outcome of the submission started under `generation`.
    ///
    /// Returns `false` (and leaves the state alone) if that submission has
    /// since been superseded by another `select_file` or a `reset`.
    pub async fn on_submission_complete(&self, generation: u64, outcome: SubmissionOutcome) -> bool {
        let mut inner = self.inner.write().await;
        if generation != inner.generation {
            debug!(
                generation,
                current = inner.generation,
                "Discarding stale submission outcome"
            );
            return false;
        }

        let next = state_for_outcome(outcome);
        match &next {
            AnalysisState::Succeeded { result, .. } => {
                info!(
                    generation,
                    filename = %result.filename,
                    prediction = %result.prediction,
                    confidence = result.confidence,
                    "Analysis complete"
                );
            }
            AnalysisState::Failed(e) => {
                warn!(generation, category = %e.category(), error = ?e, "Analysis failed");
            }
            _ => {}
        }
        inner.state = next;
        true
    }

    /// Return to `Idle`, dropping any result or error. Any in-flight
    /// submission is abandoned; its outcome will be discarded.
    pub async fn reset(&self) {
        let mut inner = self.inner.write().await;
        inner.generation += 1;
        inner.state = AnalysisState::Idle;
    }
}

/// The state a settled submission leads to. Total over all outcomes.
pub fn state_for_outcome(outcome: SubmissionOutcome) -> AnalysisState {
    match outcome {
        SubmissionOutcome::HttpSuccess(body) => match AnalysisResult::from_body(&body) {
            Ok(result) => AnalysisState::succeeded(result),
            Err(reason) => AnalysisState::Failed(IntakeError::malformed(reason)),
        },
        SubmissionOutcome::HttpErrorResponse(status, body) => AnalysisState::Failed(
            IntakeError::server_rejected(status, ErrorBody::message_from(&body)),
        ),
        SubmissionOutcome::NetworkUnreachable => AnalysisState::Failed(IntakeError::Unreachable),
        SubmissionOutcome::OtherFailure(detail) => {
            AnalysisState::Failed(IntakeError::unexpected(detail))
        }
    }
}
