use std::sync::Arc;

use anyhow::anyhow;
use common::{AppError, Result};
use gh_transport::Transport;
use normalizer::payloads::{
    CommentCountPayload, GistPayload, PullRequestPayload, RepoPayload, UserPayload, UserRef,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullState {
    Open,
    Closed,
}

impl PullState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PullState::Open => "open",
            PullState::Closed => "closed",
        }
    }
}

/// REST endpoints used by the adapter, on top of a credential-bound transport.
#[derive(Clone)]
pub struct RestClient {
    transport: Arc<dyn Transport>,
}

impl RestClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn get_json(&self, endpoint: &str) -> Result<Value> {
        Ok(self.transport.fetch(endpoint).await?)
    }

    pub async fn get_json_array(&self, endpoint: &str) -> Result<Vec<Value>> {
        match self.get_json(endpoint).await? {
            Value::Array(items) => Ok(items),
            Value::Null => Ok(Vec::new()),
            _ => Err(anyhow!("expected array response from {endpoint}").into()),
        }
    }

    async fn get_typed<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let value = self.get_json(endpoint).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn get_typed_array<T: DeserializeOwned>(&self, endpoint: &str) -> Result<Vec<T>> {
        self.get_json_array(endpoint)
            .await?
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(AppError::from))
            .collect()
    }

    pub async fn authenticated_user(&self) -> Result<UserRef> {
        self.get_typed("/user").await
    }

    pub async fn user(&self, username: &str) -> Result<UserPayload> {
        self.get_typed(&format!("/users/{username}")).await
    }

    /// Follows an absolute repository listing link such as a user's `repos_url`.
    pub async fn repos_at(&self, url: &str) -> Result<Vec<RepoPayload>> {
        self.get_typed_array(url).await
    }

    pub async fn own_repos(&self) -> Result<Vec<RepoPayload>> {
        self.get_typed_array("/user/repos").await
    }

    pub async fn all_repos(&self, username: &str) -> Result<Vec<RepoPayload>> {
        self.get_typed_array(&format!("/users/{username}/repos?type=all"))
            .await
    }

    pub async fn own_gists(&self) -> Result<Vec<GistPayload>> {
        self.get_typed_array("/gists").await
    }

    pub async fn user_gists(&self, username: &str) -> Result<Vec<CommentCountPayload>> {
        self.get_typed_array(&format!("/users/{username}/gists"))
            .await
    }

    pub async fn gist_comments(&self, gist_id: &str) -> Result<Vec<Value>> {
        self.get_json_array(&format!("/gists/{gist_id}/comments"))
            .await
    }

    pub async fn repo_issue_comments(&self, full_name: &str) -> Result<Vec<Value>> {
        self.get_json_array(&format!("/repos/{full_name}/issues/comments"))
            .await
    }

    pub async fn repo_commit_comments(&self, full_name: &str) -> Result<Vec<Value>> {
        self.get_json_array(&format!("/repos/{full_name}/comments"))
            .await
    }

    /// Issues across the caller's repositories (`/issues`).
    pub async fn caller_issues(&self) -> Result<Vec<CommentCountPayload>> {
        self.get_typed_array("/issues").await
    }

    pub async fn commits(
        &self,
        owner: &str,
        repo: &str,
        author: &str,
        since: &str,
        until: &str,
    ) -> Result<Vec<Value>> {
        self.get_json_array(&format!(
            "/repos/{owner}/{repo}/commits?author={author}&since={since}&until={until}"
        ))
        .await
    }

    pub async fn open_issues(
        &self,
        owner: &str,
        repo: &str,
        creator: &str,
        since: &str,
    ) -> Result<Vec<Value>> {
        self.get_json_array(&format!(
            "/repos/{owner}/{repo}/issues?state=open&creator={creator}&since={since}"
        ))
        .await
    }

    pub async fn pulls(
        &self,
        owner: &str,
        repo: &str,
        state: PullState,
    ) -> Result<Vec<PullRequestPayload>> {
        self.get_typed_array(&format!(
            "/repos/{owner}/{repo}/pulls?state={}",
            state.as_str()
        ))
        .await
    }

    /// Default-state pull request listing, kept untyped for counting.
    pub async fn repo_pulls(&self, owner: &str, repo: &str) -> Result<Vec<Value>> {
        self.get_json_array(&format!("/repos/{owner}/{repo}/pulls"))
            .await
    }

    pub async fn user_projects(&self, username: &str) -> Result<Vec<Value>> {
        self.get_json_array(&format!("/users/{username}/projects"))
            .await
    }

    pub async fn starred(&self, username: &str) -> Result<Vec<Value>> {
        self.get_json_array(&format!("/users/{username}/starred"))
            .await
    }

    pub async fn subscriptions(&self, username: &str) -> Result<Vec<Value>> {
        self.get_json_array(&format!("/users/{username}/subscriptions"))
            .await
    }
}
