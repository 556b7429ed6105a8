use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use api::{build_router, ApiState};
use axum::Router;
use common::{config::AppConfig, logging};
use gh_transport::HttpTransportFactory;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;
    logging::init_logging("api", &config.observability.log_level);

    let factory = HttpTransportFactory::new(
        &config.github.api_base,
        &config.github.user_agent,
        Duration::from_secs(config.github.timeout_secs),
    )?;
    let state = Arc::new(ApiState {
        factory: Arc::new(factory),
        config: config.adapter.clone(),
        metrics_path: config.observability.metrics_path.clone(),
    });
    let app: Router = build_router(state);

    let addr: std::net::SocketAddr = config.api.bind.parse()?;
    info!(%addr, "api listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
