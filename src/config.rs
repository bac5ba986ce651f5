use std::env;
use std::time::Duration;

use anyhow::Result;

/// Backend used when `THREATSLEUTH_API_URL` is not set (local Flask dev server).
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Environment variable that overrides the backend base URL.
pub const API_URL_ENV: &str = "THREATSLEUTH_API_URL";

/// A submission with no response after this long is abandoned.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Largest file the client will upload (50 MiB).
pub const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// File extensions the backend knows how to extract features from.
pub const ALLOWED_EXTENSIONS: [&str; 5] = ["exe", "dll", "zip", "txt", "bin"];

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded by the binary at startup via dotenvy, so values
/// from it show up here like any other environment variable.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the classification backend, without a trailing slash.
    pub api_url: String,
    pub request_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Self::from_api_url(env::var(API_URL_ENV).ok())
    }

    /// Build a config from an optional base-URL override.
    ///
    /// An unset or blank override falls back to [`DEFAULT_API_URL`].
    pub fn from_api_url(api_url: Option<String>) -> Result<Self> {
        let api_url = api_url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            anyhow::bail!(
                "{API_URL_ENV} must be an http:// or https:// URL, got {api_url:?}.\n\
                 Fix it in your .env file or unset it to use {DEFAULT_API_URL}."
            );
        }

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            request_timeout: REQUEST_TIMEOUT,
        })
    }
}
