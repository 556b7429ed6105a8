use common::Result;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::client::RestClient;
use crate::metrics;

/// Raw, single-page REST listings. A 404 upstream is served as an empty list.
pub struct Listings {
    client: RestClient,
    per_page: u32,
}

impl Listings {
    pub fn new(client: RestClient, per_page: u32) -> Self {
        Self { client, per_page }
    }

    /// `/issues` always lists the authenticated caller's issues.
    #[instrument(skip(self))]
    pub async fn user_issues(&self) -> Result<Vec<Value>> {
        let endpoint = format!("/issues?per_page={}", self.per_page);
        self.list_or_empty("issues", &endpoint).await
    }

    #[instrument(skip(self))]
    pub async fn user_gists(&self, username: &str) -> Result<Vec<Value>> {
        let endpoint = format!("/users/{username}/gists?per_page={}", self.per_page);
        self.list_or_empty("gists", &endpoint).await
    }

    #[instrument(skip(self))]
    pub async fn user_pull_requests(&self, username: &str, repo: &str) -> Result<Vec<Value>> {
        let endpoint = format!("/repos/{username}/{repo}/pulls?per_page={}", self.per_page);
        self.list_or_empty("pull_requests", &endpoint).await
    }

    #[instrument(skip(self))]
    pub async fn user_repositories(&self, username: &str) -> Result<Vec<Value>> {
        let endpoint = format!("/users/{username}/repos?per_page={}", self.per_page);
        self.list_or_empty("repositories", &endpoint).await
    }

    #[instrument(skip(self))]
    pub async fn repository_discussions(&self, username: &str, repo: &str) -> Result<Vec<Value>> {
        let endpoint = format!(
            "/repos/{username}/{repo}/discussions?per_page={}",
            self.per_page
        );
        self.list_or_empty("discussions", &endpoint).await
    }

    async fn list_or_empty(&self, listing: &'static str, endpoint: &str) -> Result<Vec<Value>> {
        empty_on_not_found(listing, self.client.get_json_array(endpoint).await)
    }
}

/// Serves an upstream 404 on a simple listing as an empty batch and counts
/// the skip under `listing`. Every other outcome passes through.
pub(crate) fn empty_on_not_found(
    listing: &'static str,
    result: Result<Vec<Value>>,
) -> Result<Vec<Value>> {
    match result {
        Err(err) if err.is_not_found() => {
            metrics::NOT_FOUND_SKIPS_TOTAL
                .with_label_values(&[listing])
                .inc();
            debug!(listing, error = %err, "listing not found upstream, serving empty");
            Ok(Vec::new())
        }
        other => other,
    }
}
