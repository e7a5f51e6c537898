use std::fmt;

use serde_json::Value;
use tracing::debug;

use crate::error::SearchError;
use crate::model::CodeMatch;

/// The dependency whose version is reported.
pub const DEPENDENCY_KEY: &str = "angular";

/// Four-line report for one match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchReport {
    pub repository: String,
    pub path: String,
    pub url: String,
    pub version: String,
}

impl fmt::Display for MatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Repository: {}", self.repository)?;
        writeln!(f, "File path: {}", self.path)?;
        writeln!(f, "URL: {}", self.url)?;
        write!(f, "Angular JS: {}", self.version)
    }
}

/// Project one match and its decoded file content into a report.
///
/// The content must be UTF-8 JSON with a string at
/// `dependencies.angular`; anything else is an error that aborts the run.
pub fn project(hit: &CodeMatch, content: &[u8]) -> Result<MatchReport, SearchError> {
    let text = std::str::from_utf8(content).map_err(|e| SearchError::ContentDecode {
        path: hit.path.clone(),
        reason: e.to_string(),
    })?;

    let manifest: Value =
        serde_json::from_str(text).map_err(|source| SearchError::ManifestParse {
            path: hit.path.clone(),
            source,
        })?;

    let version = manifest
        .get("dependencies")
        .and_then(|deps| deps.get(DEPENDENCY_KEY))
        .and_then(Value::as_str)
        .ok_or_else(|| SearchError::MissingDependency {
            path: hit.path.clone(),
        })?;

    debug!(path = %hit.path, version, "extracted dependency version");

    Ok(MatchReport {
        repository: hit.repository.full_name.clone(),
        path: hit.path.clone(),
        url: hit.html_url.clone(),
        version: version.to_string(),
    })
}
