// Submitter trait: the transport seam between intake and the backend.
//
// The intake controller only ever sees a `SubmissionOutcome`. The real
// implementation is `PredictClient`; tests plug in fakes that count calls
// or hold a request open.

use async_trait::async_trait;

use crate::intake::SelectedFile;

/// How a single submission settled, as seen by the transport layer.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// 2xx response; the body is not yet decoded.
    HttpSuccess(String),
    /// Non-2xx response with its status code and raw body.
    HttpErrorResponse(u16, String),
    /// Connection refused, DNS failure or similar; no response at all.
    NetworkUnreachable,
    /// Timeout or anything else that went wrong.
    OtherFailure(String),
}

/// Uploads a validated file for classification.
#[async_trait]
pub trait Submitter: Send + Sync {
    /// Submit one file. Never fails: every result is folded into an outcome.
    async fn submit(&self, file: SelectedFile) -> SubmissionOutcome;
}
