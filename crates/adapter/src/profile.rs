use std::time::Instant;

use common::{AppError, Result};
use futures::{stream, StreamExt, TryStreamExt};
use normalizer::ProfileStats;
use tracing::instrument;

use crate::client::RestClient;
use crate::metrics;

/// Aggregates headline profile numbers for one user. Any failed call fails
/// the whole summary.
pub struct ProfileStatsCollector {
    client: RestClient,
    fanout: usize,
}

impl ProfileStatsCollector {
    pub fn new(client: RestClient) -> Self {
        Self { client, fanout: 4 }
    }

    pub fn with_fanout(mut self, fanout: usize) -> Self {
        self.fanout = fanout.max(1);
        self
    }

    #[instrument(skip(self))]
    pub async fn collect(&self, username: &str) -> Result<ProfileStats> {
        let started = Instant::now();
        let result = self.collect_inner(username).await;
        metrics::observe("profile_stats", started, &result);
        result
    }

    async fn collect_inner(&self, username: &str) -> Result<ProfileStats> {
        let user = self.client.user(username).await?;
        let gists = self.client.user_gists(username).await?;
        let issues = self.client.caller_issues().await?;
        let projects = self.client.user_projects(username).await?;
        let repos = self.client.repos_at(&user.repos_url).await?;

        let per_repo: Vec<(usize, usize)> = stream::iter(repos)
            .map(|repo| {
                let client = self.client.clone();
                let owner = username.to_string();
                async move {
                    let full_name = format!("{owner}/{}", repo.name);
                    let pulls = client.repo_pulls(&owner, &repo.name).await?;
                    let comments = client.repo_commit_comments(&full_name).await?;
                    Ok::<_, AppError>((pulls.len(), comments.len()))
                }
            })
            .buffered(self.fanout)
            .try_collect()
            .await?;

        let starred = self.client.starred(username).await?;
        let watching = self.client.subscriptions(username).await?;

        Ok(ProfileStats {
            commit_comments: per_repo.iter().map(|(_, comments)| *comments as u64).sum(),
            company: user.company,
            created_at: user.created_at,
            followers: user.followers,
            following: user.following,
            gist_comments: gists.iter().map(|gist| gist.comments).sum(),
            gists: gists.len() as u64,
            github: user.login,
            issue_comments: issues.iter().map(|issue| issue.comments).sum(),
            issues: issues.len() as u64,
            projects: projects.len() as u64,
            pull_requests: per_repo.iter().map(|(pulls, _)| *pulls as u64).sum(),
            repositories: user.public_repos,
            starred_repositories: starred.len() as u64,
            watching: watching.len() as u64,
        })
    }
}
