use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use async_trait::async_trait;
use http::{header, Request, Response};
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::error::TransportError;
use crate::metrics;
use crate::model::{classify_response, parse_rate_limit, resolve_endpoint};

const API_VERSION: &str = "2022-11-28";

/// Authenticated GET against an API path or an absolute URL.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch(&self, endpoint: &str) -> Result<Value, TransportError>;
}

/// Binds a caller's credential to a transport for the lifetime of one request.
pub trait TransportFactory: Send + Sync {
    fn bind(&self, token: Option<String>) -> Arc<dyn Transport>;
}

#[async_trait]
pub trait HttpExec: Send + Sync {
    async fn execute(&self, req: Request<Vec<u8>>) -> Result<Response<Vec<u8>>>;
}

pub struct ReqwestExecutor {
    client: reqwest::Client,
}

impl ReqwestExecutor {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpExec for ReqwestExecutor {
    async fn execute(&self, req: Request<Vec<u8>>) -> Result<Response<Vec<u8>>> {
        let (parts, body) = req.into_parts();
        let mut builder = self.client.request(parts.method, parts.uri.to_string());
        builder = builder.headers(parts.headers);
        let resp = builder.body(body).send().await?;
        let status = resp.status();
        let headers = resp.headers().clone();
        let bytes = resp.bytes().await?;
        let mut response = Response::builder().status(status).body(bytes.to_vec())?;
        *response.headers_mut() = headers;
        Ok(response)
    }
}

pub struct HttpTransport {
    exec: Arc<dyn HttpExec>,
    base: Url,
    user_agent: String,
    token: Option<String>,
}

impl HttpTransport {
    pub fn new(
        exec: Arc<dyn HttpExec>,
        base: Url,
        user_agent: impl Into<String>,
        token: Option<String>,
    ) -> Self {
        Self {
            exec,
            base,
            user_agent: user_agent.into(),
            token,
        }
    }

    fn build_request(&self, url: &Url, token: &str) -> Result<Request<Vec<u8>>, TransportError> {
        Request::builder()
            .method("GET")
            .uri(url.as_str())
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(header::USER_AGENT, self.user_agent.as_str())
            .header(header::ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .body(Vec::new())
            .map_err(|err| TransportError::InvalidEndpoint {
                endpoint: url.to_string(),
                reason: err.to_string(),
            })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self))]
    async fn fetch(&self, endpoint: &str) -> Result<Value, TransportError> {
        let Some(token) = self.token.as_deref() else {
            metrics::record_outcome("unauthenticated");
            return Err(TransportError::Unauthenticated);
        };

        let url = resolve_endpoint(&self.base, endpoint)?;
        let request = self.build_request(&url, token)?;
        debug!(url = %url, "Dispatching GitHub request");

        let start = Instant::now();
        let result = self.exec.execute(request).await;
        metrics::REQUEST_LATENCY_SECONDS.observe(start.elapsed().as_secs_f64());

        let response = match result {
            Ok(response) => response,
            Err(err) => {
                metrics::record_outcome("error");
                warn!(error = %err, "GitHub request failed");
                return Err(TransportError::Request {
                    endpoint: endpoint.to_string(),
                    reason: err.to_string(),
                });
            }
        };

        if let Some(update) = parse_rate_limit(response.headers()) {
            metrics::RATE_REMAINING.set(update.remaining);
            debug!(
                limit = update.limit,
                remaining = update.remaining,
                reset = %update.reset,
                "rate limit"
            );
        }

        match classify_response(endpoint, response) {
            Ok(value) => {
                metrics::record_outcome("success");
                Ok(value)
            }
            Err(err @ TransportError::NotFound { .. }) => {
                metrics::record_outcome("not_found");
                Err(err)
            }
            Err(err) => {
                metrics::record_outcome("error");
                warn!(error = %err, "GitHub request rejected");
                Err(err)
            }
        }
    }
}

#[derive(Clone)]
pub struct HttpTransportFactory {
    exec: Arc<dyn HttpExec>,
    base: Url,
    user_agent: String,
}

impl HttpTransportFactory {
    pub fn new(api_base: &str, user_agent: &str, timeout: Duration) -> Result<Self> {
        let exec = Arc::new(ReqwestExecutor::new(user_agent, timeout)?);
        Self::with_exec(exec, api_base, user_agent)
    }

    pub fn with_exec(exec: Arc<dyn HttpExec>, api_base: &str, user_agent: &str) -> Result<Self> {
        Ok(Self {
            exec,
            base: Url::parse(api_base)?,
            user_agent: user_agent.to_string(),
        })
    }
}

impl TransportFactory for HttpTransportFactory {
    fn bind(&self, token: Option<String>) -> Arc<dyn Transport> {
        Arc::new(HttpTransport::new(
            self.exec.clone(),
            self.base.clone(),
            self.user_agent.clone(),
            token,
        ))
    }
}
