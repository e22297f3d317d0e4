//! Daemon configuration with TOML file support.

use std::path::{Path, PathBuf};
use std::time::Duration;

use kavach_ledger::AUDIT_CAPACITY;
use kavach_store_lmdb::environment::DEFAULT_MAP_SIZE;
use kavach_utils::LogFormat;
use kavach_verification::{CheckProfile, PortalConfig, WorkflowTimings};
use kavach_wallet_core::WalletConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("invalid config: {0}")]
    Parse(String),

    #[error("cannot serialize config: {0}")]
    Serialize(String),
}

/// Configuration for the `kavach` binary.
///
/// Every field has a default, so an empty file is a valid configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KavachConfig {
    /// Directory holding the LMDB environment.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_api_port")]
    pub api_port: u16,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,

    /// How often the sent list is re-read.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Maximum entries kept in each audit log.
    #[serde(default = "default_audit_capacity")]
    pub audit_capacity: usize,

    #[serde(default = "default_reauth_delay_ms")]
    pub reauth_delay_ms: u64,

    #[serde(default = "default_lmdb_map_size")]
    pub lmdb_map_size: usize,

    /// Simulated latency per workflow step.
    #[serde(default)]
    pub workflow: WorkflowTimings,

    /// Failure probabilities of the simulated checks.
    #[serde(default)]
    pub checks: CheckProfile,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_data_dir() -> PathBuf {
    PathBuf::from("./kavach_data")
}

fn default_api_port() -> u16 {
    7080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_poll_interval_ms() -> u64 {
    2500
}

fn default_audit_capacity() -> usize {
    AUDIT_CAPACITY
}

fn default_reauth_delay_ms() -> u64 {
    1500
}

fn default_lmdb_map_size() -> usize {
    DEFAULT_MAP_SIZE
}

// ── Impl ───────────────────────────────────────────────────────────────

impl KavachConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    pub fn wallet_config(&self) -> WalletConfig {
        WalletConfig {
            reauth_delay: Duration::from_millis(self.reauth_delay_ms),
            audit_capacity: self.audit_capacity,
        }
    }

    pub fn portal_config(&self) -> PortalConfig {
        PortalConfig {
            timings: self.workflow,
            checks: self.checks,
            audit_capacity: self.audit_capacity,
            poll_interval: Duration::from_millis(self.poll_interval_ms),
        }
    }
}

impl Default for KavachConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            api_port: default_api_port(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            poll_interval_ms: default_poll_interval_ms(),
            audit_capacity: default_audit_capacity(),
            reauth_delay_ms: default_reauth_delay_ms(),
            lmdb_map_size: default_lmdb_map_size(),
            workflow: WorkflowTimings::default(),
            checks: CheckProfile::default(),
        }
    }
}
