use std::sync::Arc;

use common::config::AdapterConfig;
use common::Result;
use gh_transport::Transport;
use normalizer::{ContributionSummary, NormalizedResponse, ProfileStats};
use serde_json::Value;

use crate::client::RestClient;
use crate::comments::CommentAggregator;
use crate::contributions::ContributionCounter;
use crate::identity::current_login;
use crate::listings::Listings;
use crate::profile::ProfileStatsCollector;

/// Entry point for one request: every component shares the same
/// credential-bound transport and nothing outlives the request.
pub struct ActivityService {
    client: RestClient,
    config: AdapterConfig,
}

impl ActivityService {
    pub fn new(transport: Arc<dyn Transport>, config: AdapterConfig) -> Self {
        Self {
            client: RestClient::new(transport),
            config,
        }
    }

    pub fn client(&self) -> &RestClient {
        &self.client
    }

    pub async fn current_login(&self) -> Result<String> {
        current_login(&self.client).await
    }

    /// `page_size` falls back to the configured default when absent.
    pub async fn comments(
        &self,
        kind: &str,
        page_size: Option<i64>,
    ) -> Result<Vec<NormalizedResponse<Value>>> {
        let page_size = page_size.unwrap_or(self.config.default_page_size);
        CommentAggregator::new(self.client.clone())
            .aggregate_named(kind, page_size)
            .await
    }

    pub async fn contributions(
        &self,
        username: &str,
        window_start: &str,
        window_end: &str,
    ) -> Result<ContributionSummary> {
        ContributionCounter::new(self.client.clone())
            .with_fanout(self.config.fanout)
            .count(username, window_start, window_end)
            .await
    }

    pub async fn profile_stats(&self, username: &str) -> Result<ProfileStats> {
        ProfileStatsCollector::new(self.client.clone())
            .with_fanout(self.config.fanout)
            .collect(username)
            .await
    }

    pub fn listings(&self) -> Listings {
        Listings::new(self.client.clone(), self.config.listing_per_page)
    }
}
