use anyhow::{bail, Context, Result};
use deskgate_client::{ClientConfig, RetryConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,

    #[serde(default)]
    pub api: ApiConfig,
}

/// Tenant-neutral gateway settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Header carrying the tenant's Desk API key.
    #[serde(default = "default_credential_header")]
    pub credential_header: String,

    /// Paths that speak the tool protocol.
    #[serde(default = "default_mcp_paths")]
    pub mcp_paths: Vec<String>,

    #[serde(default = "default_health_path")]
    pub health_path: String,

    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Optional text returned to clients in the `initialize` result.
    #[serde(default)]
    pub instructions: Option<String>,
}

fn default_credential_header() -> String {
    "x-desk-api-key".to_string()
}

fn default_mcp_paths() -> Vec<String> {
    vec!["/mcp".to_string()]
}

fn default_health_path() -> String {
    "/health".to_string()
}

fn default_service_name() -> String {
    "deskgate".to_string()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            credential_header: default_credential_header(),
            mcp_paths: default_mcp_paths(),
            health_path: default_health_path(),
            service_name: default_service_name(),
            instructions: None,
        }
    }
}

impl GatewayConfig {
    /// The credential header name as stored in a request context.
    pub fn credential_header_lower(&self) -> String {
        self.credential_header.to_ascii_lowercase()
    }

    pub fn is_protocol_path(&self, path: &str) -> bool {
        self.mcp_paths.iter().any(|p| p == path)
    }
}

/// Downstream Desk API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    2
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            user_agent: None,
        }
    }
}

impl ServerConfig {
    pub fn load(config_path: &Path) -> Result<Self> {
        // Load config file if it exists, otherwise use defaults
        let config: Self = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .context("Failed to read configuration file")?;
            toml::from_str(&content).context("Failed to parse configuration file")?
        } else {
            tracing::info!("Configuration file not found, using defaults");
            Self::default()
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let gateway = &self.gateway;
        if gateway.credential_header.trim().is_empty() {
            bail!("gateway.credential_header must not be empty");
        }
        if gateway.mcp_paths.is_empty() {
            bail!("gateway.mcp_paths must name at least one path");
        }
        for path in gateway.mcp_paths.iter().chain(std::iter::once(&gateway.health_path)) {
            if !path.starts_with('/') {
                bail!("gateway path {path:?} must start with '/'");
            }
        }
        if gateway.mcp_paths.contains(&gateway.health_path) {
            bail!("gateway.health_path must differ from the tool-protocol paths");
        }
        Ok(())
    }

    /// Settings for the per-request Desk clients.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let base_url = self
            .api
            .base_url
            .as_deref()
            .context("api.base_url must be set (or pass --api-base-url)")?;
        let base_url = Url::parse(base_url).context("api.base_url is not a valid URL")?;

        let mut config = ClientConfig::new(base_url);
        config.timeout = Duration::from_secs(self.api.timeout_secs);
        config.retry_config = RetryConfig {
            max_retries: self.api.max_retries,
            ..RetryConfig::default()
        };
        if let Some(user_agent) = &self.api.user_agent {
            config.user_agent = user_agent.clone();
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig::load(&dir.path().join("absent.toml")).unwrap();

        assert_eq!(config.gateway.credential_header, "x-desk-api-key");
        assert_eq!(config.gateway.mcp_paths, vec!["/mcp".to_string()]);
        assert_eq!(config.gateway.health_path, "/health");
        assert!(config.api.base_url.is_none());
    }

    #[test]
    fn test_load_from_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[gateway]
credential_header = "X-Acme-Api-Key"
mcp_paths = ["/mcp", "/v1/mcp"]

[api]
base_url = "https://desk.example.com/api/v1"
timeout_secs = 10
"#
        )
        .unwrap();

        let config = ServerConfig::load(file.path()).unwrap();
        assert_eq!(config.gateway.credential_header_lower(), "x-acme-api-key");
        assert!(config.gateway.is_protocol_path("/v1/mcp"));
        assert_eq!(config.gateway.health_path, "/health");

        let client = config.client_config().unwrap();
        assert_eq!(client.base_url.as_str(), "https://desk.example.com/api/v1/");
        assert_eq!(client.timeout, Duration::from_secs(10));
        assert_eq!(client.retry_config.max_retries, 2);
    }

    #[test]
    fn test_client_config_requires_base_url() {
        assert!(ServerConfig::default().client_config().is_err());
    }

    #[test]
    fn test_validation_rejects_overlapping_paths() {
        let mut config = ServerConfig::default();
        config.gateway.health_path = "/mcp".to_string();
        assert!(config.validate().is_err());

        let mut config = ServerConfig::default();
        config.gateway.mcp_paths = vec!["mcp".to_string()];
        assert!(config.validate().is_err());
    }
}
