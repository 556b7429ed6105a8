use std::sync::Arc;

use adapter::{format_window_bound, ActivityService};
use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDateTime;
use common::config::AdapterConfig;
use gh_transport::TransportFactory;
use normalizer::{ContributionSummary, NormalizedResponse, ProfileStats};
use prometheus::Encoder;
use serde_json::{json, Value};
use tracing::instrument;

use crate::dto::{CommentsQuery, ViewerDto};
use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiPath, ApiQuery};

const WINDOW_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Clone)]
pub struct ApiState {
    pub factory: Arc<dyn TransportFactory>,
    pub config: AdapterConfig,
    pub metrics_path: String,
}

impl ApiState {
    /// Binds the caller's credential for the duration of one request.
    fn service(&self, headers: &HeaderMap) -> ActivityService {
        let transport = self.factory.bind(bearer_token(headers));
        ActivityService::new(transport, self.config.clone())
    }
}

pub fn build_router(state: Arc<ApiState>) -> Router {
    let metrics_path = state.metrics_path.clone();
    Router::new()
        .route("/healthz", get(healthz))
        .route("/rest/current-user-login", get(current_user_login))
        .route("/rest/user-comments/:kind", get(user_comments))
        .route("/rest/user-stats/:username", get(user_stats))
        .route(
            "/rest/user-contributions/:username/:start/:end",
            get(user_contributions),
        )
        .route("/rest/user-gists/:username", get(user_gists))
        .route("/rest/user-issues/:username", get(user_issues))
        .route("/rest/user-repositories/:username", get(user_repositories))
        .route(
            "/rest/user-pull-requests/:username/:repo",
            get(user_pull_requests),
        )
        .route(
            "/rest/repository-discussions/:username/:repo",
            get(repository_discussions),
        )
        .route(&metrics_path, get(metrics))
        .with_state(state)
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

fn parse_window_param(value: &str) -> ApiResult<String> {
    NaiveDateTime::parse_from_str(value, WINDOW_FORMAT)
        .map(format_window_bound)
        .map_err(|_| {
            ApiError::bad_request(format!(
                "invalid datetime {value}, expected YYYY-MM-DDTHH:MM"
            ))
        })
}

async fn healthz() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

#[instrument(skip_all)]
async fn current_user_login(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
) -> ApiResult<Json<ViewerDto>> {
    let login = state.service(&headers).current_login().await?;
    Ok(Json(ViewerDto::new(login)))
}

#[instrument(skip(state, headers))]
async fn user_comments(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    ApiPath(kind): ApiPath<String>,
    ApiQuery(query): ApiQuery<CommentsQuery>,
) -> ApiResult<Json<Vec<NormalizedResponse<Value>>>> {
    let pages = state
        .service(&headers)
        .comments(&kind, query.pg_size)
        .await?;
    Ok(Json(pages))
}

#[instrument(skip(state, headers))]
async fn user_stats(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    ApiPath(username): ApiPath<String>,
) -> ApiResult<Json<ProfileStats>> {
    let stats = state.service(&headers).profile_stats(&username).await?;
    Ok(Json(stats))
}

#[instrument(skip(state, headers))]
async fn user_contributions(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    ApiPath((username, start, end)): ApiPath<(String, String, String)>,
) -> ApiResult<Json<ContributionSummary>> {
    let start = parse_window_param(&start)?;
    let end = parse_window_param(&end)?;
    let summary = state
        .service(&headers)
        .contributions(&username, &start, &end)
        .await?;
    Ok(Json(summary))
}

#[instrument(skip(state, headers))]
async fn user_gists(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    ApiPath(username): ApiPath<String>,
) -> ApiResult<Json<Vec<Value>>> {
    let gists = state.service(&headers).listings().user_gists(&username).await?;
    Ok(Json(gists))
}

/// `/issues` is scoped to the caller; the username segment is accepted for
/// route compatibility only.
#[instrument(skip(state, headers))]
async fn user_issues(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    ApiPath(_username): ApiPath<String>,
) -> ApiResult<Json<Vec<Value>>> {
    let issues = state.service(&headers).listings().user_issues().await?;
    Ok(Json(issues))
}

#[instrument(skip(state, headers))]
async fn user_repositories(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    ApiPath(username): ApiPath<String>,
) -> ApiResult<Json<Vec<Value>>> {
    let repos = state
        .service(&headers)
        .listings()
        .user_repositories(&username)
        .await?;
    Ok(Json(repos))
}

#[instrument(skip(state, headers))]
async fn user_pull_requests(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    ApiPath((username, repo)): ApiPath<(String, String)>,
) -> ApiResult<Json<Vec<Value>>> {
    let pulls = state
        .service(&headers)
        .listings()
        .user_pull_requests(&username, &repo)
        .await?;
    Ok(Json(pulls))
}

#[instrument(skip(state, headers))]
async fn repository_discussions(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    ApiPath((username, repo)): ApiPath<(String, String)>,
) -> ApiResult<Json<Vec<Value>>> {
    let discussions = state
        .service(&headers)
        .listings()
        .repository_discussions(&username, &repo)
        .await?;
    Ok(Json(discussions))
}

async fn metrics() -> ApiResult<impl IntoResponse> {
    let encoder = prometheus::TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    let content_type = encoder.format_type().to_string();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|err| ApiError::Internal(err.to_string()))?;
    Ok((
        axum::http::StatusCode::OK,
        [(header::CONTENT_TYPE, content_type)],
        buffer,
    ))
}
