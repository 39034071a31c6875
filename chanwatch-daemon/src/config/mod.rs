//! Configuration module for chanwatch-daemon.
//!
//! Handles loading configuration from TOML files and CLI overrides, and
//! resolving credential files into the values the node client needs.

pub mod file;

use crate::config::file::FileConfig;
use chanwatch_core::config::SyncConfig;
use chanwatch_sdk::objects::BalanceMode;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to read {path}: {source}")]
    CredentialError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    ValidationError(String),
}

/// Resolved node connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSettings {
    pub url: Url,
    pub macaroon_hex: Option<String>,
    pub tls_cert_pem: Option<Vec<u8>>,
    pub timeout: Duration,
}

/// Loaded configuration result containing all parts.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub node: NodeSettings,
    pub sync: SyncConfig,
    pub balance_mode: BalanceMode,
}

/// Command line values that win over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub node_url: Option<Url>,
    pub balance_mode: Option<BalanceMode>,
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: PathBuf,
    overrides: Overrides,
}

impl ConfigLoader {
    pub fn new(config_path: impl AsRef<Path>, overrides: Overrides) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            overrides,
        }
    }

    /// Load and process the configuration.
    ///
    /// This will:
    /// 1. Read the TOML file
    /// 2. Apply CLI overrides
    /// 3. Validate the configuration
    /// 4. Read the macaroon and certificate files
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let config_content = std::fs::read_to_string(&self.config_path)?;
        let mut file_config: FileConfig = toml::from_str(&config_content)?;

        if let Some(url) = &self.overrides.node_url {
            file_config.node.url = url.clone();
        }
        if let Some(mode) = self.overrides.balance_mode {
            file_config.display.balance_mode = mode;
        }

        validate(&file_config)?;
        self.build_loaded_config(file_config)
    }

    /// Reload the configuration (used during SIGHUP).
    pub fn reload(&self) -> Result<LoadedConfig, ConfigError> {
        self.load()
    }

    fn build_loaded_config(&self, file_config: FileConfig) -> Result<LoadedConfig, ConfigError> {
        let node = file_config.node;
        let macaroon_hex = match (node.macaroon, node.macaroon_path) {
            (Some(macaroon), _) => Some(macaroon),
            (None, Some(path)) => Some(hex::encode(read_credential(&path)?)),
            (None, None) => None,
        };
        let tls_cert_pem = node
            .tls_cert_path
            .as_deref()
            .map(read_credential)
            .transpose()?;

        Ok(LoadedConfig {
            node: NodeSettings {
                url: node.url,
                macaroon_hex,
                tls_cert_pem,
                timeout: Duration::from_secs(node.timeout_secs),
            },
            sync: SyncConfig::new(
                Duration::from_secs(file_config.sync.fetch_interval_secs),
                Duration::from_secs(file_config.sync.report_interval_secs),
            ),
            balance_mode: file_config.display.balance_mode,
        })
    }
}

fn validate(config: &FileConfig) -> Result<(), ConfigError> {
    match config.node.url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ConfigError::ValidationError(format!(
                "node url must be http or https, got {other}"
            )));
        }
    }
    if config.node.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "node.timeout_secs must be greater than zero".to_owned(),
        ));
    }
    if config.sync.fetch_interval_secs == 0 || config.sync.report_interval_secs == 0 {
        return Err(ConfigError::ValidationError(
            "sync intervals must be greater than zero".to_owned(),
        ));
    }
    Ok(())
}

fn read_credential(path: &Path) -> Result<Vec<u8>, ConfigError> {
    std::fs::read(path).map_err(|source| ConfigError::CredentialError {
        path: path.to_path_buf(),
        source,
    })
}
