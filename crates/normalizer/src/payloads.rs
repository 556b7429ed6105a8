use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct UserRef {
    #[serde(default)]
    pub id: Option<i64>,
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserPayload {
    pub login: String,
    pub repos_url: String,
    pub company: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub followers: i64,
    #[serde(default)]
    pub following: i64,
    #[serde(default)]
    pub public_repos: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepoPayload {
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub private: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GistPayload {
    pub id: String,
    #[serde(default)]
    pub comments: i64,
}

/// Anything carrying a `comments` counter (issues, gists).
#[derive(Debug, Clone, Deserialize)]
pub struct CommentCountPayload {
    #[serde(default)]
    pub comments: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestHead {
    pub user: Option<UserRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestPayload {
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub head: PullRequestHead,
}

impl PullRequestPayload {
    pub fn author_login(&self) -> Option<&str> {
        self.head.user.as_ref().map(|user| user.login.as_str())
    }

    /// Case-insensitive match on the head branch owner.
    pub fn authored_by(&self, login: &str) -> bool {
        self.author_login()
            .map(|author| author.eq_ignore_ascii_case(login))
            .unwrap_or(false)
    }
}
