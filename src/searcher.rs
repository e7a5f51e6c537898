use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Utc};
use futures::stream::{self, Stream, TryStreamExt};
use reqwest::header::HeaderMap;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use std::env;
use tracing::{debug, info, warn};

use crate::error::SearchError;
use crate::model::{CodeMatch, ContentsResponse, SearchResponse};
use crate::query::SearchQuery;
use crate::Args;

const GITHUB_API_URL: &str = "https://api.github.com";
const PER_PAGE: u32 = 100;

/// Authenticated handle to the GitHub code-search API.
///
/// The token is never validated up front: an empty or missing token means
/// anonymous requests, and a bad credential surfaces as [`SearchError::Auth`]
/// on the first call.
pub struct GitHubSearcher {
    client: Client,
    token: Option<String>,
    base_url: String,
    max_page_limit: Option<u32>,
}

impl GitHubSearcher {
    /// Create a new GitHubSearcher instance. The token comes from `--token`,
    /// falling back to the `AUTH_TOKEN` environment variable.
    pub fn new(args: &Args) -> Result<Self, SearchError> {
        let token = match &args.token {
            Some(t) if !t.trim().is_empty() => Some(t.clone()),
            _ => match env::var("AUTH_TOKEN") {
                Ok(token) if !token.trim().is_empty() => Some(token),
                _ => {
                    warn!("no token provided or found in environment, searching anonymously");
                    None
                }
            },
        };

        let client = Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64)")
            .build()?;

        Ok(GitHubSearcher {
            client,
            token,
            base_url: GITHUB_API_URL.to_string(),
            max_page_limit: args.max_pages,
        })
    }

    /// Point the searcher at a different API endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn request(&self, url: &str) -> RequestBuilder {
        let mut builder = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github.text-match+json")
            .header("X-GitHub-Api-Version", "2022-11-28");
        if let Some(token) = &self.token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        builder
    }

    /// Issue one search and return a lazy stream of matches. Pages of up to
    /// 100 results are fetched as the stream is consumed; the stream ends on
    /// an empty page, GitHub's 422 search-window limit, or the page cap.
    pub fn search(&self, query: &SearchQuery) -> impl Stream<Item = Result<CodeMatch, SearchError>> + '_ {
        let q = query.to_query_string();
        debug!(%q, "starting code search");

        stream::try_unfold((q, 1u32), move |(q, page)| async move {
            if let Some(max_page) = self.max_page_limit {
                if page > max_page {
                    info!("max page limit reached (limit: {})", max_page);
                    return Ok::<_, SearchError>(None);
                }
            }
            match self.fetch_page(&q, page).await? {
                Some(items) => {
                    let batch = stream::iter(items.into_iter().map(Ok::<CodeMatch, SearchError>));
                    Ok(Some((batch, (q, page + 1))))
                }
                None => Ok(None),
            }
        })
        .try_flatten()
    }

    /// Fetch one page of results. `None` means pagination is exhausted.
    async fn fetch_page(&self, q: &str, page: u32) -> Result<Option<Vec<CodeMatch>>, SearchError> {
        let url = format!("{}/search/code", self.base_url);
        debug!(%url, page, "requesting search page");

        let per_page = PER_PAGE.to_string();
        let page_param = page.to_string();
        let response = self
            .request(&url)
            .query(&[
                ("q", q),
                ("sort", "indexed"),
                ("order", "asc"),
                ("per_page", per_page.as_str()),
                ("page", page_param.as_str()),
            ])
            .send()
            .await?;

        // GitHub caps code search at 1000 results and answers 422 past that.
        if response.status() == StatusCode::UNPROCESSABLE_ENTITY {
            warn!("reached search window limit at page {}", page);
            return Ok(None);
        }

        let response = check_status(response)?;
        let body: SearchResponse = response.json().await?;

        if body.items.is_empty() {
            debug!(total = body.total_count, "no more results");
            return Ok(None);
        }

        info!(
            "page {} returned {} of {} matches",
            page,
            body.items.len(),
            body.total_count
        );
        Ok(Some(body.items))
    }

    /// Fetch and base64-decode the content of one match.
    pub async fn fetch_content(&self, hit: &CodeMatch) -> Result<Vec<u8>, SearchError> {
        debug!(path = %hit.path, url = %hit.url, "fetching file content");
        let response = check_status(self.request(&hit.url).send().await?)?;
        let body: ContentsResponse = response.json().await?;
        decode_content(&hit.path, &body)
    }
}

/// Map a non-success response to the error taxonomy.
fn check_status(response: Response) -> Result<Response, SearchError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let rate_limited = status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS;
    if rate_limited && remaining_quota(response.headers()) == Some(0) {
        return Err(SearchError::RateLimited {
            reset: rate_limit_reset(response.headers()),
        });
    }

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(SearchError::Auth { status });
    }

    Err(SearchError::Api {
        status,
        url: response.url().to_string(),
    })
}

fn remaining_quota(headers: &HeaderMap) -> Option<u32> {
    headers
        .get("x-ratelimit-remaining")?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

fn rate_limit_reset(headers: &HeaderMap) -> Option<DateTime<Utc>> {
    let timestamp: i64 = headers.get("x-ratelimit-reset")?.to_str().ok()?.parse().ok()?;
    DateTime::from_timestamp(timestamp, 0)
}

/// Decode a contents-API payload into raw file bytes. GitHub wraps the
/// base64 body at 60 columns, so whitespace is stripped first.
fn decode_content(path: &str, body: &ContentsResponse) -> Result<Vec<u8>, SearchError> {
    if body.encoding != "base64" {
        return Err(SearchError::ContentDecode {
            path: path.to_string(),
            reason: format!("unexpected content encoding '{}'", body.encoding),
        });
    }

    let compact: String = body.content.split_whitespace().collect();
    BASE64
        .decode(compact.as_bytes())
        .map_err(|e| SearchError::ContentDecode {
            path: path.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn decodes_wrapped_base64_content() {
        let body = ContentsResponse {
            content: "eyJkZXBlbmRlbmNpZXMiOn\nsiYW5ndWxhciI6ICIxLjIuMyJ9fQ==\n".to_string(),
            encoding: "base64".to_string(),
        };
        let bytes = decode_content("package.json", &body).unwrap();
        assert_eq!(bytes, br#"{"dependencies":{"angular": "1.2.3"}}"#);
    }

    #[test]
    fn rejects_unknown_content_encoding() {
        let body = ContentsResponse {
            content: String::new(),
            encoding: "none".to_string(),
        };
        let err = decode_content("package.json", &body).unwrap_err();
        assert!(matches!(err, SearchError::ContentDecode { .. }));
    }

    #[test]
    fn rejects_invalid_base64() {
        let body = ContentsResponse {
            content: "!!!not base64!!!".to_string(),
            encoding: "base64".to_string(),
        };
        assert!(decode_content("package.json", &body).is_err());
    }

    #[test]
    fn reads_rate_limit_reset_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-remaining", HeaderValue::from_static("0"));
        headers.insert("x-ratelimit-reset", HeaderValue::from_static("1700000000"));
        assert_eq!(remaining_quota(&headers), Some(0));
        let reset = rate_limit_reset(&headers).unwrap();
        assert_eq!(reset.timestamp(), 1_700_000_000);
    }

    #[test]
    fn missing_rate_limit_headers_yield_none() {
        let headers = HeaderMap::new();
        assert_eq!(remaining_quota(&headers), None);
        assert!(rate_limit_reset(&headers).is_none());
    }
}
