mod support;

use adapter::{ActivityService, Listings, ProfileStatsCollector, RestClient};
use common::config::AdapterConfig;
use common::AppError;
use http::StatusCode;
use serde_json::json;
use support::StubTransport;

const REPOS_URL: &str = "https://api.github.com/users/octocat/repos";

fn profile_stub() -> StubTransport {
    StubTransport::new()
        .respond(
            "/users/octocat",
            json!({
                "login": "octocat",
                "repos_url": REPOS_URL,
                "company": "@github",
                "created_at": "2011-01-25T18:44:36Z",
                "followers": 20,
                "following": 9,
                "public_repos": 8
            }),
        )
        .respond(
            "/users/octocat/gists",
            json!([{"id": "a", "comments": 2}, {"id": "b", "comments": 5}]),
        )
        .respond("/issues", json!([{"comments": 1}, {"comments": 0}, {"comments": 4}]))
        .respond("/users/octocat/projects", json!([{"id": 1}]))
        .respond(
            REPOS_URL,
            json!([
                {"name": "alpha", "full_name": "octocat/alpha"},
                {"name": "beta", "full_name": "octocat/beta"}
            ]),
        )
        .respond("/repos/octocat/alpha/pulls", json!([{"number": 1}, {"number": 2}]))
        .respond("/repos/octocat/alpha/comments", json!([{"id": 10}]))
        .respond("/repos/octocat/beta/pulls", json!([]))
        .respond("/repos/octocat/beta/comments", json!([{"id": 11}, {"id": 12}]))
        .respond("/users/octocat/starred", json!([{"id": 1}, {"id": 2}, {"id": 3}]))
        .respond("/users/octocat/subscriptions", json!([{"id": 1}]))
}

#[tokio::test]
async fn profile_stats_sum_counters_across_sources() {
    let stub = profile_stub().shared();
    let collector = ProfileStatsCollector::new(RestClient::new(stub));

    let stats = collector.collect("octocat").await.unwrap();

    assert_eq!(stats.github, "octocat");
    assert_eq!(stats.company.as_deref(), Some("@github"));
    assert_eq!(stats.gists, 2);
    assert_eq!(stats.gist_comments, 7);
    assert_eq!(stats.issues, 3);
    assert_eq!(stats.issue_comments, 5);
    assert_eq!(stats.projects, 1);
    assert_eq!(stats.pull_requests, 2);
    assert_eq!(stats.commit_comments, 3);
    assert_eq!(stats.repositories, 8);
    assert_eq!(stats.starred_repositories, 3);
    assert_eq!(stats.watching, 1);
}

#[tokio::test]
async fn profile_stats_fail_as_a_whole() {
    let stub = profile_stub()
        .fail("/users/octocat/projects", StatusCode::GONE, "Projects (classic) is deprecated")
        .shared();
    let collector = ProfileStatsCollector::new(RestClient::new(stub));

    let err = collector.collect("octocat").await.unwrap_err();

    assert!(matches!(err, AppError::Upstream { status: 410, .. }));
}

#[tokio::test]
async fn listings_pass_per_page_through() {
    let stub = StubTransport::new()
        .respond("/users/octocat/gists?per_page=10", json!([{"id": "a"}]))
        .respond("/issues?per_page=10", json!([{"id": 1}, {"id": 2}]))
        .shared();
    let listings = Listings::new(RestClient::new(stub), 10);

    assert_eq!(listings.user_gists("octocat").await.unwrap().len(), 1);
    assert_eq!(listings.user_issues().await.unwrap().len(), 2);
}

#[tokio::test]
async fn listing_not_found_is_served_empty() {
    let stub = StubTransport::new()
        .fail(
            "/repos/octocat/alpha/discussions?per_page=10",
            StatusCode::NOT_FOUND,
            "Not Found",
        )
        .shared();
    let listings = Listings::new(RestClient::new(stub), 10);

    let items = listings
        .repository_discussions("octocat", "alpha")
        .await
        .unwrap();

    assert!(items.is_empty());
}

#[tokio::test]
async fn listing_other_errors_propagate() {
    let stub = StubTransport::new()
        .fail(
            "/repos/octocat/alpha/pulls?per_page=10",
            StatusCode::FORBIDDEN,
            "Must have admin rights to Repository.",
        )
        .shared();
    let listings = Listings::new(RestClient::new(stub), 10);

    let err = listings
        .user_pull_requests("octocat", "alpha")
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Upstream { status: 403, .. }));
}

#[tokio::test]
async fn service_uses_configured_defaults() {
    let stub = StubTransport::new()
        .respond("/users/octocat/repos?per_page=25", json!([]))
        .respond("/user", json!({"login": "viewer"}))
        .shared();
    let config = AdapterConfig {
        listing_per_page: 25,
        ..AdapterConfig::default()
    };
    let service = ActivityService::new(stub, config);

    assert!(service
        .listings()
        .user_repositories("octocat")
        .await
        .unwrap()
        .is_empty());
    assert_eq!(service.current_login().await.unwrap(), "viewer");
}
