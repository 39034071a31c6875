//! TOML file configuration structures.
//!
//! These structs directly map to the `chanwatch.toml` file format.

use chanwatch_sdk::objects::BalanceMode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    pub node: NodeConfig,
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Connection to the node's REST gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Base URL of the gateway (e.g. "https://127.0.0.1:8080").
    pub url: Url,
    /// Hex-encoded macaroon. Takes precedence over `macaroon_path`.
    #[serde(default)]
    pub macaroon: Option<String>,
    /// File holding the raw macaroon bytes.
    #[serde(default)]
    pub macaroon_path: Option<PathBuf>,
    /// PEM certificate to trust in addition to the system roots; nodes
    /// usually serve a self-signed one.
    #[serde(default)]
    pub tls_cert_path: Option<PathBuf>,
    /// Timeout for unary requests. Streams are not subject to it.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

/// Periodic work section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    #[serde(default = "default_fetch_interval_secs")]
    pub fetch_interval_secs: u64,
    #[serde(default = "default_report_interval_secs")]
    pub report_interval_secs: u64,
}

fn default_fetch_interval_secs() -> u64 {
    60
}

fn default_report_interval_secs() -> u64 {
    300
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            fetch_interval_secs: default_fetch_interval_secs(),
            report_interval_secs: default_report_interval_secs(),
        }
    }
}

/// Presentation settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub balance_mode: BalanceMode,
}
