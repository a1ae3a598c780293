//! Wire types for the Twitter/X v2 recent-search response.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One tweet as returned by the search endpoint, before joining
/// against the author side table.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPost {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub author_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// One page of search results plus the author-id -> username side table
/// delivered through the `author_id` expansion.
#[derive(Debug, Clone, Default)]
pub struct SearchPage {
    pub posts: Vec<RawPost>,
    pub users: HashMap<String, String>,
}

impl SearchPage {
    /// Look up a username by author id.
    pub fn username_for(&self, author_id: Option<&str>) -> Option<String> {
        author_id.and_then(|id| self.users.get(id).cloned())
    }
}

/// Top-level recent-search response envelope.
///
/// `data` is absent entirely when the query matched nothing.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Vec<RawPost>,
    #[serde(default)]
    pub includes: Option<Includes>,
}

#[derive(Debug, Deserialize)]
pub struct Includes {
    #[serde(default)]
    pub users: Vec<ApiUser>,
}

#[derive(Debug, Deserialize)]
pub struct ApiUser {
    pub id: String,
    pub username: String,
}

impl From<SearchResponse> for SearchPage {
    fn from(response: SearchResponse) -> Self {
        let users = response
            .includes
            .map(|inc| {
                inc.users
                    .into_iter()
                    .map(|u| (u.id, u.username))
                    .collect()
            })
            .unwrap_or_default();

        SearchPage {
            posts: response.data,
            users,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_search_response_with_expansion() {
        let body = r#"{
            "data": [
                {"id": "101", "text": "hello", "author_id": "7", "created_at": "2026-01-05T12:00:00Z"}
            ],
            "includes": {"users": [{"id": "7", "username": "alice"}]},
            "meta": {"result_count": 1}
        }"#;

        let response: SearchResponse = serde_json::from_str(body).unwrap();
        let page = SearchPage::from(response);

        assert_eq!(page.posts.len(), 1);
        assert_eq!(page.posts[0].id, "101");
        assert_eq!(page.username_for(Some("7")), Some("alice".to_string()));
        assert_eq!(page.username_for(Some("8")), None);
    }

    #[test]
    fn parses_empty_response() {
        let body = r#"{"meta": {"result_count": 0}}"#;
        let response: SearchResponse = serde_json::from_str(body).unwrap();
        let page = SearchPage::from(response);
        assert!(page.posts.is_empty());
        assert!(page.users.is_empty());
    }
}
