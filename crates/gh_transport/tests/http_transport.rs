use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use gh_transport::{HttpExec, HttpTransportFactory, TransportError, TransportFactory};
use http::{header, Request, Response, StatusCode};
use serde_json::json;

struct RecordingExec {
    status: StatusCode,
    body: String,
    seen: Mutex<Vec<Request<Vec<u8>>>>,
}

impl RecordingExec {
    fn replying(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl HttpExec for RecordingExec {
    async fn execute(&self, req: Request<Vec<u8>>) -> Result<Response<Vec<u8>>> {
        self.seen.lock().unwrap().push(req);
        let resp = Response::builder()
            .status(self.status)
            .header("x-ratelimit-limit", "5000")
            .header("x-ratelimit-remaining", "4321")
            .header("x-ratelimit-reset", "1700000000")
            .body(self.body.clone().into_bytes())
            .unwrap();
        Ok(resp)
    }
}

fn factory(exec: Arc<RecordingExec>) -> HttpTransportFactory {
    HttpTransportFactory::with_exec(exec, "https://api.github.com/", "adapter-tests").unwrap()
}

#[tokio::test]
async fn missing_token_fails_before_dispatch() {
    let exec = Arc::new(RecordingExec::replying(StatusCode::OK, "{}"));
    let transport = factory(exec.clone()).bind(None);

    let err = transport.fetch("/user").await.unwrap_err();

    assert!(matches!(err, TransportError::Unauthenticated));
    assert!(exec.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn bound_token_is_sent_as_bearer() {
    let exec = Arc::new(RecordingExec::replying(StatusCode::OK, r#"{"login":"octocat"}"#));
    let transport = factory(exec.clone()).bind(Some("secret".into()));

    let value = transport.fetch("/user").await.unwrap();

    assert_eq!(value, json!({"login": "octocat"}));
    let seen = exec.seen.lock().unwrap();
    let request = &seen[0];
    assert_eq!(request.uri().to_string(), "https://api.github.com/user");
    assert_eq!(request.headers()[header::AUTHORIZATION], "Bearer secret");
    assert_eq!(
        request.headers()[header::ACCEPT],
        "application/vnd.github+json"
    );
}

#[tokio::test]
async fn absolute_urls_bypass_the_base() {
    let exec = Arc::new(RecordingExec::replying(StatusCode::OK, "[]"));
    let transport = factory(exec.clone()).bind(Some("secret".into()));

    transport
        .fetch("https://api.github.com/users/octocat/repos")
        .await
        .unwrap();

    let seen = exec.seen.lock().unwrap();
    assert_eq!(
        seen[0].uri().to_string(),
        "https://api.github.com/users/octocat/repos"
    );
}

#[tokio::test]
async fn upstream_errors_carry_the_message() {
    let exec = Arc::new(RecordingExec::replying(
        StatusCode::FORBIDDEN,
        r#"{"message":"API rate limit exceeded"}"#,
    ));
    let transport = factory(exec).bind(Some("secret".into()));

    let err = transport.fetch("/user/repos").await.unwrap_err();

    match err {
        TransportError::Status {
            status, message, ..
        } => {
            assert_eq!(status, StatusCode::FORBIDDEN);
            assert_eq!(message, "API rate limit exceeded");
        }
        other => panic!("expected Status, got {other:?}"),
    }
}
