//! Configuration file parser for reqkit
//!
//! Supports reqkit.yml with REST client and server settings.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReqkitConfig {
    /// Shared REST client settings
    #[serde(default)]
    pub rest_client: RestClientConfig,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// REST client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestClientConfig {
    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for RestClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind, loopback unless set
    #[serde(default = "default_host")]
    pub host: IpAddr,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    concat!("reqkit/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

fn default_port() -> u16 {
    8080
}

impl ReqkitConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: ReqkitConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.rest_client.timeout_secs == 0 {
            anyhow::bail!("rest_client.timeout_secs must be greater than 0");
        }
        if self.rest_client.connect_timeout_secs == 0 {
            anyhow::bail!("rest_client.connect_timeout_secs must be greater than 0");
        }
        if self.server.port == 0 {
            anyhow::bail!("Invalid server port 0");
        }
        Ok(())
    }

    /// Search for config file in standard locations
    pub fn find_config() -> Option<PathBuf> {
        let candidates = ["reqkit.yml", "reqkit.yaml", ".reqkit.yml", ".reqkit.yaml"];

        for name in &candidates {
            let path = PathBuf::from(name);
            if path.exists() {
                return Some(path);
            }
        }

        let home = dirs::home_dir()?;
        candidates.iter().map(|name| home.join(name)).find(|path| path.exists())
    }
}
