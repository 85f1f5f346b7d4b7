use crate::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    // Outbound call timeout. The upstream API itself imposes none, so the
    // gateway sets its own.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_port() -> u16 {
    8787
}

fn default_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            upstream: UpstreamConfig::default(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GatewayConfig {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            GatewayError::config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Search standard locations for a config file, falling back to defaults
    /// when none exists. The gateway holds no secrets of its own (callers
    /// supply credentials per request), so running unconfigured is fine.
    /// Priority: CLI arg > CWD > XDG config > home dir.
    pub fn find_and_load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::load(path);
        }

        for candidate in config_search_paths() {
            if candidate.exists() {
                tracing::info!(path = %candidate.display(), "Loading config");
                return Self::load(&candidate);
            }
        }

        Ok(Self::default())
    }

    /// URL of the upstream Messages endpoint.
    #[must_use]
    pub fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.upstream.base_url.trim_end_matches('/'))
    }
}

fn config_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // CWD
    paths.push(PathBuf::from("anthropic-gateway.toml"));

    // XDG / platform config dir
    if cfg!(target_os = "macos") {
        if let Some(home) = dirs_path() {
            paths.push(
                home.join("Library")
                    .join("Application Support")
                    .join("anthropic-gateway")
                    .join("config.toml"),
            );
        }
    } else {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            paths.push(
                PathBuf::from(xdg)
                    .join("anthropic-gateway")
                    .join("config.toml"),
            );
        }
        if let Some(home) = dirs_path() {
            paths.push(
                home.join(".config")
                    .join("anthropic-gateway")
                    .join("config.toml"),
            );
        }
    }

    // Home directory fallback
    if let Some(home) = dirs_path() {
        paths.push(home.join(".anthropic-gateway.toml"));
    }

    paths
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}
