//! Main client for the Desk API.

use crate::api::*;
use crate::config::{ClientConfig, RetryConfig};
use crate::credential::Credential;
use crate::error::{DeskError, DeskResult};
use crate::transport::HttpTransport;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Client for one tenant of the Desk API.
///
/// Cloning is cheap and shares the underlying connection pool, so every
/// handler built for a request can hold its own clone. A client is bound to
/// exactly one credential for its whole life.
#[derive(Debug, Clone)]
pub struct DeskClient {
    pub(crate) http: HttpTransport,
}

impl DeskClient {
    /// Create a new client builder.
    pub fn builder() -> DeskClientBuilder {
        DeskClientBuilder::new()
    }

    /// Create a client from shared settings and a tenant credential.
    pub fn new(config: Arc<ClientConfig>, credential: &Credential) -> DeskResult<Self> {
        let http = HttpTransport::new(config, credential)?;
        Ok(Self { http })
    }

    /// Get the tickets API.
    pub fn tickets(&self) -> TicketsApi<'_> {
        TicketsApi::new(self)
    }

    /// Get the clients (customer accounts) API.
    pub fn clients(&self) -> ClientsApi<'_> {
        ClientsApi::new(self)
    }

    /// Get the users API.
    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(self)
    }

    /// Get the stages API.
    pub fn stages(&self) -> StagesApi<'_> {
        StagesApi::new(self)
    }

    /// Get the catalog items API.
    pub fn catalog(&self) -> CatalogApi<'_> {
        CatalogApi::new(self)
    }

    /// Get the ticket communications API.
    pub fn communications(&self) -> CommunicationsApi<'_> {
        CommunicationsApi::new(self)
    }
}

/// Builder for creating a DeskClient.
pub struct DeskClientBuilder {
    base_url: Option<String>,
    credential: Option<Credential>,
    timeout: Duration,
    retry_config: RetryConfig,
}

impl DeskClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            base_url: None,
            credential: None,
            timeout: Duration::from_secs(30),
            retry_config: RetryConfig::default(),
        }
    }

    /// Set the base URL of the Desk API.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the tenant credential.
    pub fn credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the retry configuration.
    pub fn retry_config(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    /// Build the client.
    pub fn build(self) -> DeskResult<DeskClient> {
        let base_url_str = self
            .base_url
            .ok_or_else(|| DeskError::Config("base_url is required".to_string()))?;
        let credential = self
            .credential
            .ok_or_else(|| DeskError::Config("credential is required".to_string()))?;

        let mut config = ClientConfig::new(Url::parse(&base_url_str)?);
        config.timeout = self.timeout;
        config.retry_config = self.retry_config;

        DeskClient::new(Arc::new(config), &credential)
    }
}

impl Default for DeskClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
