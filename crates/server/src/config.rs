// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Server configuration.
//!
//! Configuration is read from a TOML file (default `leadbook.toml`) with
//! these sections:
//! - `[server]`: listen address
//! - `[storage]`: lead document path (relative to the config file) and load policy
//! - `[auth]`: token signing secret and validity window
//! - `[analytics]`: average deal value used for revenue estimates
//! - `[[users]]`: the static user directory

use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use lb_core::analytics::DEFAULT_AVERAGE_DEAL_VALUE;
use lb_core::{Error, LoadPolicy, Result, UserRecord, DEFAULT_TOKEN_TTL_SECS};

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "leadbook.toml";

/// Environment variable that overrides `auth.secret`.
pub const SECRET_ENV_VAR: &str = "LEADBOOK_JWT_SECRET";

const DEFAULT_STORAGE_PATH: &str = "data/leads.json";

/// Top-level configuration file contents.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    #[serde(default)]
    pub users: Vec<UserRecord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig { bind: default_bind() }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Lead document path; relative paths resolve against the config file's directory.
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
    /// Fail on an unreadable document instead of treating it as empty.
    #[serde(default)]
    pub strict: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig { path: default_storage_path(), strict: false }
    }
}

impl StorageConfig {
    pub fn policy(&self) -> LoadPolicy {
        if self.strict {
            LoadPolicy::Strict
        } else {
            LoadPolicy::Lenient
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    #[serde(default)]
    pub secret: String,
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        AuthConfig { secret: String::new(), token_ttl_secs: default_token_ttl_secs() }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalyticsConfig {
    #[serde(default = "default_average_deal_value")]
    pub average_deal_value: u64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        AnalyticsConfig { average_deal_value: default_average_deal_value() }
    }
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 5000))
}

fn default_storage_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORAGE_PATH)
}

fn default_token_ttl_secs() -> i64 {
    DEFAULT_TOKEN_TTL_SECS
}

fn default_average_deal_value() -> u64 {
    DEFAULT_AVERAGE_DEAL_VALUE
}

impl Config {
    /// Loads the config file at `path`.
    ///
    /// The storage path is resolved against the file's directory and
    /// [`SECRET_ENV_VAR`] replaces `auth.secret` when set.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read config {}: {}", path.display(), e))
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Self::parse(&content, base, std::env::var(SECRET_ENV_VAR).ok())
    }

    /// Parses config text, resolving relative paths against `base`.
    pub fn parse(content: &str, base: &Path, secret_override: Option<String>) -> Result<Self> {
        let mut config: Config = toml::from_str(content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        if config.storage.path.is_relative() {
            config.storage.path = base.join(&config.storage.path);
        }
        if let Some(secret) = secret_override.filter(|s| !s.is_empty()) {
            config.auth.secret = secret;
        }
        Ok(config)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
