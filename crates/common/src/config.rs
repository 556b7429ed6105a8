use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub adapter: AdapterConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path(".")
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Config::builder()
            .add_source(
                File::with_name(
                    path.as_ref()
                        .join("config/default")
                        .to_string_lossy()
                        .as_ref(),
                )
                .required(false),
            )
            .add_source(
                File::with_name(
                    path.as_ref()
                        .join("config/local")
                        .to_string_lossy()
                        .as_ref(),
                )
                .required(false),
            )
            .add_source(Environment::with_prefix("ADAPTER").separator("__"))
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GithubConfig {
    #[serde(default = "GithubConfig::default_api_base")]
    pub api_base: String,
    #[serde(default = "GithubConfig::default_user_agent")]
    pub user_agent: String,
    #[serde(default = "GithubConfig::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl GithubConfig {
    fn default_api_base() -> String {
        "https://api.github.com/".to_string()
    }

    fn default_user_agent() -> String {
        "gh-activity-adapter".to_string()
    }

    const fn default_timeout_secs() -> u64 {
        30
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_base: Self::default_api_base(),
            user_agent: Self::default_user_agent(),
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdapterConfig {
    #[serde(default = "AdapterConfig::default_page_size")]
    pub default_page_size: i64,
    #[serde(default = "AdapterConfig::default_listing_per_page")]
    pub listing_per_page: u32,
    #[serde(default = "AdapterConfig::default_fanout")]
    pub fanout: usize,
}

impl AdapterConfig {
    const fn default_page_size() -> i64 {
        100
    }

    const fn default_listing_per_page() -> u32 {
        10
    }

    const fn default_fanout() -> usize {
        4
    }
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            default_page_size: Self::default_page_size(),
            listing_per_page: Self::default_listing_per_page(),
            fanout: Self::default_fanout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "ApiConfig::default_bind")]
    pub bind: String,
}

impl ApiConfig {
    fn default_bind() -> String {
        "0.0.0.0:8080".to_string()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: Self::default_bind(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "ObservabilityConfig::default_metrics_path")]
    pub metrics_path: String,
    #[serde(default = "ObservabilityConfig::default_log_level")]
    pub log_level: String,
}

impl ObservabilityConfig {
    fn default_metrics_path() -> String {
        "/metrics".to_string()
    }

    fn default_log_level() -> String {
        "info".to_string()
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_path: Self::default_metrics_path(),
            log_level: Self::default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sources_fall_back_to_defaults() {
        let config: AppConfig = Config::builder()
            .build()
            .and_then(Config::try_deserialize)
            .expect("defaults");
        assert_eq!(config.github.api_base, "https://api.github.com/");
        assert_eq!(config.adapter.default_page_size, 100);
        assert_eq!(config.adapter.listing_per_page, 10);
        assert_eq!(config.observability.metrics_path, "/metrics");
    }

    #[test]
    fn overrides_replace_single_fields() {
        let config: AppConfig = Config::builder()
            .set_override("adapter.fanout", 1)
            .and_then(|b| b.set_override("api.bind", "127.0.0.1:9000"))
            .and_then(|b| b.build())
            .and_then(Config::try_deserialize)
            .expect("overrides");
        assert_eq!(config.adapter.fanout, 1);
        assert_eq!(config.api.bind, "127.0.0.1:9000");
        assert_eq!(config.adapter.default_page_size, 100);
    }
}
