use std::future::Future;
use std::str::FromStr;
use std::time::Instant;

use common::{AppError, Result};
use normalizer::{paginate, project_created_at, NormalizedResponse};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::client::RestClient;
use crate::identity::resolve_shaper;
use crate::listings::empty_on_not_found;
use crate::metrics;

const RESOURCE: &str = "comments";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    Gist,
    Issue,
    Commit,
}

impl CommentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommentKind::Gist => "gist",
            CommentKind::Issue => "issue",
            CommentKind::Commit => "commit",
        }
    }
}

impl FromStr for CommentKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "gist" => Ok(CommentKind::Gist),
            "issue" => Ok(CommentKind::Issue),
            "commit" => Ok(CommentKind::Commit),
            _ => Err(AppError::invalid("invalid/unsupported comment type")),
        }
    }
}

/// Builds a paginated, GraphQL-shaped comment feed out of flat REST listings.
pub struct CommentAggregator {
    client: RestClient,
}

impl CommentAggregator {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    /// Parses `kind` first, so unsupported kinds fail without touching upstream.
    pub async fn aggregate_named(
        &self,
        kind: &str,
        page_size: i64,
    ) -> Result<Vec<NormalizedResponse<Value>>> {
        let kind = kind.parse::<CommentKind>()?;
        self.aggregate(kind, page_size).await
    }

    #[instrument(skip(self))]
    pub async fn aggregate(
        &self,
        kind: CommentKind,
        page_size: i64,
    ) -> Result<Vec<NormalizedResponse<Value>>> {
        let started = Instant::now();
        let result = self.aggregate_inner(kind, page_size).await;
        metrics::observe("comments", started, &result);
        result
    }

    async fn aggregate_inner(
        &self,
        kind: CommentKind,
        page_size: i64,
    ) -> Result<Vec<NormalizedResponse<Value>>> {
        let page_size = usize::try_from(page_size)
            .ok()
            .filter(|size| *size > 0)
            .ok_or_else(|| AppError::invalid("page size must be greater than zero"))?;

        let comments = match kind {
            CommentKind::Gist => self.collect_gist_comments(page_size).await?,
            CommentKind::Issue => self.collect_issue_comments(page_size).await?,
            CommentKind::Commit => self.collect_commit_comments(page_size).await?,
        };
        debug!(collected = comments.len(), "collected comments");

        let pages = paginate(comments, page_size, project_created_at)?;
        let shaper = resolve_shaper(&self.client).await?;
        Ok(shaper.shape_all(pages, RESOURCE, kind.as_str()))
    }

    // A comment listing that is gone upstream contributes nothing. The source
    // lists themselves (`/gists`, `/user/repos`) still fail hard.
    async fn collect_gist_comments(&self, limit: usize) -> Result<Vec<Value>> {
        let client = &self.client;
        let gists = client.own_gists().await?;
        accumulate(gists, limit, |gist| async move {
            empty_on_not_found("gist_comments", client.gist_comments(&gist.id).await)
        })
        .await
    }

    async fn collect_issue_comments(&self, limit: usize) -> Result<Vec<Value>> {
        let client = &self.client;
        let repos = client.own_repos().await?;
        accumulate(repos, limit, |repo| async move {
            empty_on_not_found(
                "issue_comments",
                client.repo_issue_comments(&repo.full_name).await,
            )
        })
        .await
    }

    async fn collect_commit_comments(&self, limit: usize) -> Result<Vec<Value>> {
        let client = &self.client;
        let repos = client.own_repos().await?;
        accumulate(repos, limit, |repo| async move {
            empty_on_not_found(
                "commit_comments",
                client.repo_commit_comments(&repo.full_name).await,
            )
        })
        .await
    }
}

/// Appends whole batches from `sources` in order until at least `limit` items
/// are held. The check runs before each fetch, so the last batch may overshoot.
async fn accumulate<S, F, Fut>(sources: Vec<S>, limit: usize, mut fetch: F) -> Result<Vec<Value>>
where
    F: FnMut(S) -> Fut,
    Fut: Future<Output = Result<Vec<Value>>>,
{
    let mut collected = Vec::new();
    for source in sources {
        if collected.len() >= limit {
            break;
        }
        collected.extend(fetch(source).await?);
    }
    Ok(collected)
}
