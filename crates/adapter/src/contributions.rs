use std::time::Instant;

use chrono::{DateTime, NaiveDateTime, Utc};
use common::{AppError, Result};
use futures::{stream, StreamExt, TryStreamExt};
use normalizer::payloads::{PullRequestPayload, RepoPayload};
use normalizer::ContributionSummary;
use tracing::{debug, instrument};

use crate::client::{PullState, RestClient};
use crate::metrics;

const MINUTE_PRECISION_LEN: usize = "YYYY-MM-DDTHH:MM".len();

/// Renders a bound in the quote-wrapped form the counters expect,
/// e.g. `"2024-01-31T09:30:00"` including the quotes.
pub fn format_window_bound(at: NaiveDateTime) -> String {
    format!("\"{}\"", at.format("%Y-%m-%dT%H:%M:%S"))
}

/// Parses a quote-wrapped bound: drop anything after `+`, strip the quotes,
/// append `Z` and read the result as a UTC RFC 3339 timestamp.
pub fn parse_window_bound(raw: &str) -> Result<DateTime<Utc>> {
    let head = raw.split_once('+').map_or(raw, |(head, _)| head);
    let head = head.strip_prefix('"').unwrap_or(head);
    let head = head.strip_suffix('"').unwrap_or(head);
    let candidate = if head.len() == MINUTE_PRECISION_LEN {
        format!("{head}:00Z")
    } else {
        format!("{head}Z")
    };
    DateTime::parse_from_rfc3339(&candidate)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|err| AppError::invalid(format!("invalid window bound {raw}: {err}")))
}

/// Time window for contribution counting. The raw bounds go to upstream
/// `since`/`until` filters untouched; local filtering is exclusive at both ends.
#[derive(Debug, Clone)]
pub struct ContributionWindow {
    raw_start: String,
    raw_end: String,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl ContributionWindow {
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Ok(Self {
            start: parse_window_bound(start)?,
            end: parse_window_bound(end)?,
            raw_start: start.to_string(),
            raw_end: end.to_string(),
        })
    }

    pub fn raw_start(&self) -> &str {
        &self.raw_start
    }

    pub fn raw_end(&self) -> &str {
        &self.raw_end
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at > self.start && at < self.end
    }
}

/// Counts a user's contributions inside a window out of per-repository REST calls.
pub struct ContributionCounter {
    client: RestClient,
    fanout: usize,
}

impl ContributionCounter {
    pub fn new(client: RestClient) -> Self {
        Self { client, fanout: 4 }
    }

    /// Caps concurrent per-repository requests in the pull request counters.
    pub fn with_fanout(mut self, fanout: usize) -> Self {
        self.fanout = fanout.max(1);
        self
    }

    #[instrument(skip(self))]
    pub async fn count(
        &self,
        username: &str,
        window_start: &str,
        window_end: &str,
    ) -> Result<ContributionSummary> {
        let started = Instant::now();
        let result = match ContributionWindow::parse(window_start, window_end) {
            Ok(window) => self.count_within(username, &window).await,
            Err(err) => Err(err),
        };
        metrics::observe("contributions", started, &result);
        result
    }

    pub async fn count_within(
        &self,
        username: &str,
        window: &ContributionWindow,
    ) -> Result<ContributionSummary> {
        let user = self.client.user(username).await?;
        let repos = self.client.repos_at(&user.repos_url).await?;
        debug!(repos = repos.len(), "counting contributions");

        let commit = self
            .count_commits(username, &user.login, &repos, window)
            .await?;
        let issue = self.count_open_issues(username, &repos, window).await?;
        let pr = self
            .count_pull_requests(username, &repos, PullState::Open, window)
            .await?;
        let pr_review = self
            .count_pull_requests(username, &repos, PullState::Closed, window)
            .await?;
        let repository = self.client.all_repos(username).await?.len() as u64;
        let res_con = self
            .client
            .all_repos(username)
            .await?
            .iter()
            .filter(|repo| repo.private)
            .count() as u64;

        Ok(ContributionSummary {
            commit,
            issue,
            pr,
            pr_review,
            repository,
            res_con,
        })
    }

    // Only the first repository is consulted. Later repositories are never
    // queried; see DESIGN.md before changing this.
    async fn count_commits(
        &self,
        username: &str,
        author: &str,
        repos: &[RepoPayload],
        window: &ContributionWindow,
    ) -> Result<u64> {
        let Some(first) = repos.first() else {
            return Ok(0);
        };
        let commits = self
            .client
            .commits(
                username,
                &first.name,
                author,
                window.raw_start(),
                window.raw_end(),
            )
            .await?;
        Ok(commits.len() as u64)
    }

    // Same first-repository-only behaviour as `count_commits`.
    async fn count_open_issues(
        &self,
        username: &str,
        repos: &[RepoPayload],
        window: &ContributionWindow,
    ) -> Result<u64> {
        let Some(first) = repos.first() else {
            return Ok(0);
        };
        let issues = self
            .client
            .open_issues(username, &first.name, username, window.raw_start())
            .await?;
        Ok(issues.len() as u64)
    }

    /// Open pull requests are matched on `created_at`, closed ones on `closed_at`.
    async fn count_pull_requests(
        &self,
        username: &str,
        repos: &[RepoPayload],
        state: PullState,
        window: &ContributionWindow,
    ) -> Result<u64> {
        let per_repo: Vec<Vec<PullRequestPayload>> = stream::iter(repos.iter().cloned())
            .map(|repo| {
                let client = self.client.clone();
                let owner = username.to_string();
                async move { client.pulls(&owner, &repo.name, state).await }
            })
            .buffered(self.fanout)
            .try_collect()
            .await?;

        let count = per_repo
            .iter()
            .flatten()
            .filter(|pr| pr.authored_by(username))
            .filter_map(|pr| match state {
                PullState::Open => Some(pr.created_at),
                PullState::Closed => pr.closed_at,
            })
            .filter(|at| window.contains(*at))
            .count();
        Ok(count as u64)
    }
}
