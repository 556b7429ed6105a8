use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One chunk of an emulated page sequence. Its index is its position in the sequence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    pub nodes: Vec<T>,
}

/// `total_count` is the size of this page only, never the grand total.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationEnvelope<T> {
    pub nodes: Vec<T>,
    pub total_count: usize,
    pub has_next_page: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total_count: usize,
    pub has_next_page: bool,
}

/// GraphQL-shaped envelope around one REST page:
/// `{ "user": { "<resourceKey>": {...} }, "pageInfo": {...}, "login": "..." }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedResponse<T> {
    pub user: BTreeMap<String, PaginationEnvelope<T>>,
    pub page_info: PageInfo,
    pub login: String,
}

impl<T> NormalizedResponse<T> {
    pub fn envelope(&self, key: &str) -> Option<&PaginationEnvelope<T>> {
        self.user.get(key)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContributionSummary {
    pub commit: u64,
    pub issue: u64,
    pub pr: u64,
    pub pr_review: u64,
    pub repository: u64,
    pub res_con: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileStats {
    pub commit_comments: u64,
    pub company: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub followers: i64,
    pub following: i64,
    pub gist_comments: i64,
    pub gists: u64,
    pub github: String,
    pub issue_comments: i64,
    pub issues: u64,
    pub projects: u64,
    pub pull_requests: u64,
    pub repositories: i64,
    pub starred_repositories: u64,
    pub watching: u64,
}
