use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced by a search run. Every variant is fatal: nothing is
/// retried or recovered, the first failure aborts the whole run.
#[derive(Debug, Error)]
pub enum SearchError {
    /// 401, or a 403 that is not a rate-limit trip. An empty token is sent
    /// as an anonymous request, so a bad credential only shows up here.
    #[error("GitHub rejected the request ({status}): check the token passed via --token or AUTH_TOKEN")]
    Auth { status: StatusCode },

    /// The search rate limit is exhausted. No backoff is performed; the
    /// reset time is reported so the caller can rerun later.
    #[error("rate limit exhausted{}", fmt_reset(.reset))]
    RateLimited { reset: Option<DateTime<Utc>> },

    /// Any other non-success status from the API.
    #[error("GitHub API error: {status} on {url}")]
    Api { status: StatusCode, url: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Fetched file content that is not valid base64/UTF-8.
    #[error("could not decode content of {path}: {reason}")]
    ContentDecode { path: String, reason: String },

    /// A matched file that is not valid JSON.
    #[error("{path} is not valid JSON: {source}")]
    ManifestParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A matched file with no `dependencies.angular` string.
    #[error("{path} has no dependencies.angular entry")]
    MissingDependency { path: String },
}

fn fmt_reset(reset: &Option<DateTime<Utc>>) -> String {
    match reset {
        Some(t) => format!(", resets at {}", t.format("%Y-%m-%d %H:%M:%S UTC")),
        None => String::new(),
    }
}
