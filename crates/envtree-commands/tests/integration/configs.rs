use std::time::Duration;

use envtree::{DescribeConfig, KeyValueMap, PopulateConfig};

/// Test application configuration.
#[derive(Debug, Default, DescribeConfig, PopulateConfig)]
pub(crate) struct TestConfig {
    /// Port to bind to.
    #[config(env = "APP_PORT", required = "true")]
    pub port: u16,
    /// Deployment environment.
    #[config(env = "APP_ENV", allowed = "dev,staging,prod")]
    pub env: String,
    /// Timeout for outgoing requests.
    ///
    /// Specified in the `1m30s` format.
    #[config(env = "APP_TIMEOUT")]
    pub timeout: Duration,
    #[config(env = "APP_SCALING_FACTOR")]
    pub scaling_factor: f32,
    /// Whether to persist data.
    #[config(env = "APP_PERSIST")]
    pub persist: bool,
    #[config(nest)]
    pub funding: FundingConfig,
    #[config(nest, required = "APP_PERSIST=true")]
    pub storage: StorageConfig,
    #[config(skip)]
    pub reload_count: u32,
}

#[derive(Debug, Default, DescribeConfig, PopulateConfig)]
pub(crate) struct FundingConfig {
    /// Funding account.
    #[config(env = "FUNDING_ACCOUNT", required = "APP_ENV=prod")]
    pub account: String,
    #[config(env = "FUNDING_BALANCE")]
    pub balance: u64,
}

/// Persistent storage settings.
#[derive(Debug, Default, DescribeConfig, PopulateConfig)]
pub(crate) struct StorageConfig {
    #[config(env = "STORAGE_URL")]
    pub url: String,
    #[config(env = "STORAGE_SHARDS")]
    pub shards: u8,
}

pub(crate) fn mock_source(with_errors: bool) -> KeyValueMap {
    let source = KeyValueMap::new([
        ("APP_PORT", "8080"),
        ("APP_ENV", "prod"),
        ("APP_TIMEOUT", "1m30s"),
        ("APP_SCALING_FACTOR", "4.5"),
        ("FUNDING_ACCOUNT", "treasury"),
        ("APP_PERSIST", "true"),
        ("STORAGE_URL", "postgres://localhost/app"),
        ("STORAGE_SHARDS", "16"),
    ]);
    if with_errors {
        source
            .with("APP_ENV", "test")
            .with("STORAGE_SHARDS", "1000")
            .with("FUNDING_BALANCE", "-1")
    } else {
        source
    }
}
