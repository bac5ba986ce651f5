// HTTP client for the ThreatSleuth classification API.
//
// Uploads go to `POST /api/predict` as a multipart form with a single `file`
// part. The client never interprets a prediction body itself; it only sorts
// what happened on the wire into a `SubmissionOutcome`.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::models::{ApiStats, HealthStatus};
use super::traits::{SubmissionOutcome, Submitter};
use crate::config::{Config, REQUEST_TIMEOUT};
use crate::intake::SelectedFile;

/// Client for the classification backend.
pub struct PredictClient {
    client: reqwest::Client,
    base_url: String,
}

impl PredictClient {
    /// Create a new client pointing at the given base URL.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("threatsleuth/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.api_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the prediction endpoint.
    pub fn predict_url(&self) -> String {
        format!("{}/api/predict", self.base_url)
    }

    /// Query the backend's health check at `GET /`.
    pub async fn health(&self) -> Result<HealthStatus> {
        self.get_json("/").await
    }

    /// Query upload limits and model status at `GET /api/stats`.
    pub async fn stats(&self) -> Result<ApiStats> {
        self.get_json("/api/stats").await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);

        debug!(url = %url, "Backend GET request");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Request to {url} failed"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Backend returned {status} for {path}: {body}");
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to parse response from {path}"))
    }
}

#[async_trait]
impl Submitter for PredictClient {
    async fn submit(&self, file: SelectedFile) -> SubmissionOutcome {
        let url = self.predict_url();
        let (name, size_bytes, bytes) = file.into_parts();

        debug!(url = %url, filename = %name, size_bytes, "Uploading file for classification");

        let part = Part::bytes(bytes).file_name(name);
        let form = Form::new().part("file", part);

        let response = match self.client.post(&url).multipart(form).send().await {
            Ok(r) => r,
            Err(e) => return classify_send_error(&e),
        };

        let status = response.status();

        // A non-2xx status is a server rejection even if its body is cut short.
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), body_len = body.len(), "Prediction rejected");
            return SubmissionOutcome::HttpErrorResponse(status.as_u16(), body);
        }

        match response.text().await {
            Ok(body) => {
                debug!(status = status.as_u16(), body_len = body.len(), "Prediction response");
                SubmissionOutcome::HttpSuccess(body)
            }
            Err(e) => SubmissionOutcome::OtherFailure(format!("reading body: {e}")),
        }
    }
}

/// Sort a reqwest send error into an outcome.
///
/// Connect errors cover refused connections and DNS resolution failures.
/// Timeouts count as `OtherFailure`, not as unreachable.
fn classify_send_error(e: &reqwest::Error) -> SubmissionOutcome {
    if e.is_timeout() {
        SubmissionOutcome::OtherFailure(format!("request timed out: {e}"))
    } else if e.is_connect() {
        SubmissionOutcome::NetworkUnreachable
    } else {
        SubmissionOutcome::OtherFailure(e.to_string())
    }
}
