use common::Result;
use normalizer::ResponseShaper;
use tracing::instrument;

use crate::client::RestClient;

/// Login of whoever owns the credential bound to `client`.
#[instrument(skip(client))]
pub async fn current_login(client: &RestClient) -> Result<String> {
    Ok(client.authenticated_user().await?.login)
}

/// Resolves the caller's identity once and returns a shaper carrying it.
/// A failed lookup fails the whole shaping step.
pub async fn resolve_shaper(client: &RestClient) -> Result<ResponseShaper> {
    current_login(client).await.map(ResponseShaper::new)
}
