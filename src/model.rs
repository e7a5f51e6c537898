use serde::Deserialize;

/// One page of `/search/code` results, reduced to the fields we consume.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub total_count: u64,
    pub items: Vec<CodeMatch>,
}

/// A single search hit: a file that satisfied the query and qualifiers.
#[derive(Debug, Clone, Deserialize)]
pub struct CodeMatch {
    /// Path of the file within its repository.
    pub path: String,
    /// Browser URL of the file.
    pub html_url: String,
    /// Contents-API URL, pinned to the indexed ref. Fetched per match to
    /// obtain the file body.
    pub url: String,
    pub repository: RepoRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepoRef {
    pub full_name: String,
}

/// Contents-API payload. `content` is base64 with embedded newlines.
#[derive(Debug, Deserialize)]
pub struct ContentsResponse {
    pub content: String,
    pub encoding: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_response_keeps_only_consumed_fields() {
        let body = r#"{
            "total_count": 1,
            "incomplete_results": false,
            "items": [{
                "name": "package.json",
                "path": "package.json",
                "sha": "abc123",
                "url": "https://api.github.com/repositories/1/contents/package.json?ref=deadbeef",
                "html_url": "https://github.com/gothinkster/angularjs-realworld-example-app/blob/deadbeef/package.json",
                "repository": {
                    "id": 1,
                    "full_name": "gothinkster/angularjs-realworld-example-app",
                    "private": false
                }
            }]
        }"#;

        let parsed: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.total_count, 1);
        assert_eq!(parsed.items.len(), 1);
        let hit = &parsed.items[0];
        assert_eq!(hit.path, "package.json");
        assert_eq!(
            hit.repository.full_name,
            "gothinkster/angularjs-realworld-example-app"
        );
        assert!(hit.url.contains("/contents/"));
    }

    #[test]
    fn empty_page_deserializes() {
        let parsed: SearchResponse =
            serde_json::from_str(r#"{"total_count": 0, "items": []}"#).unwrap();
        assert_eq!(parsed.total_count, 0);
        assert!(parsed.items.is_empty());
    }

    #[test]
    fn contents_response_deserializes_with_newlines() {
        let body = r#"{"content": "eyJkZXBlbmRlbmNpZXMi\nOnt9fQ==\n", "encoding": "base64"}"#;
        let parsed: ContentsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.encoding, "base64");
        assert!(parsed.content.contains('\n'));
    }
}
