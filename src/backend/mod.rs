// Backend collaborator: the classification API this client talks to.
//
// Feature extraction and inference happen server-side. This module covers
// only the boundary: the JSON models, the transport trait the intake
// controller submits through, and the reqwest implementation of it.

pub mod client;
pub mod models;
pub mod traits;

pub use client::PredictClient;
pub use models::{AnalysisResult, ApiStats, ErrorBody, FileFeatures, HealthStatus, Prediction};
pub use traits::{SubmissionOutcome, Submitter};
