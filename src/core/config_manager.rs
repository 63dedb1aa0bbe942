// src/core/config_manager.rs
//! Client configuration: defaults, then config file, then environment, then CLI flags

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/analyze-resume";
pub const DEFAULT_CONFIG_FILE: &str = "skillsync.yaml";
pub const DEFAULT_LOG_PATH: &str = "/tmp/skillsync-client.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Full URL of the analysis endpoint
    pub endpoint: String,
    /// No timeout when unset: the request waits for the server
    pub timeout_seconds: Option<u64>,
    pub log_path: PathBuf,
}

/// On-disk shape; every key is optional
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    endpoint: Option<String>,
    timeout_seconds: Option<u64>,
    log_path: Option<PathBuf>,
}

/// Values taken from command-line flags
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_seconds: None,
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
        }
    }
}

impl ClientConfig {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }

    /// Load all layers. An explicit config path must exist; the default one is optional.
    pub fn load(overrides: &ConfigOverrides) -> Result<Self> {
        let mut config = Self::default();

        match &overrides.config_path {
            Some(path) => config.apply_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    config.apply_file(default_path)?;
                }
            }
        }

        config.apply_env(|key| std::env::var(key).ok())?;

        if let Some(endpoint) = &overrides.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(timeout) = overrides.timeout_seconds {
            config.timeout_seconds = Some(timeout);
        }

        config.validate()?;
        info!(
            "Client configured for {} (timeout: {:?})",
            config.endpoint, config.timeout_seconds
        );
        Ok(config)
    }

    fn apply_file(&mut self, path: &Path) -> Result<()> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        self.apply_yaml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        debug!("Loaded config file {}", path.display());
        Ok(())
    }

    fn apply_yaml(&mut self, content: &str) -> Result<()> {
        // an empty document deserializes to unit, not a map
        if content.trim().is_empty() {
            return Ok(());
        }

        let file: ConfigFile = serde_yaml::from_str(content)?;
        if let Some(endpoint) = file.endpoint {
            self.endpoint = endpoint;
        }
        if let Some(timeout) = file.timeout_seconds {
            self.timeout_seconds = Some(timeout);
        }
        if let Some(log_path) = file.log_path {
            self.log_path = log_path;
        }
        Ok(())
    }

    fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup("SKILLSYNC_API_URL") {
            self.endpoint = endpoint;
        }
        if let Some(timeout) = lookup("SKILLSYNC_TIMEOUT_SECS") {
            let seconds = timeout
                .trim()
                .parse::<u64>()
                .map_err(|_| anyhow::anyhow!("SKILLSYNC_TIMEOUT_SECS must be a number of seconds"))?;
            self.timeout_seconds = Some(seconds);
        }
        if let Some(log_path) = lookup("SKILLSYNC_LOG_PATH") {
            self.log_path = PathBuf::from(log_path);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let endpoint = self.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            anyhow::bail!("Endpoint must be an http(s) URL, got: {}", self.endpoint);
        }
        if self.timeout_seconds == Some(0) {
            anyhow::bail!("Timeout must be at least one second");
        }
        Ok(())
    }
}
