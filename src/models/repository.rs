//! GitHub repository payloads
//!
//! The subset of GitHub REST fields the browser displays. Unknown fields in
//! upstream responses are ignored.

use serde::{Deserialize, Serialize};

/// Cache identifier for the trending repository list.
pub const TRENDING: &str = "trending";

/// Cache identifier for one page of a repository search.
pub fn search_identifier(query: &str, page: u32) -> String {
    format!("search:{}:page={}", query, page)
}

/// Repository owner (user or organization).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub login: String,
    pub avatar_url: String,
}

/// A repository as listed in search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub language: Option<String>,
    pub owner: Owner,
}

/// Response body of `GET /search/repositories`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    pub total_count: u64,
    #[serde(default)]
    pub incomplete_results: bool,
    pub items: Vec<Repository>,
}
