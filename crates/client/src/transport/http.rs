//! HTTP transport layer for the Desk client.

use crate::config::ClientConfig;
use crate::credential::Credential;
use crate::error::{DeskError, DeskResult};
use reqwest::{header, Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// HTTP transport bound to a single tenant credential.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: Arc<ClientConfig>,
}

impl HttpTransport {
    /// Create a transport that authenticates every request with `credential`.
    pub fn new(config: Arc<ClientConfig>, credential: &Credential) -> DeskResult<Self> {
        if credential.is_empty() {
            return Err(DeskError::Config("credential is required".to_string()));
        }

        let mut headers = header::HeaderMap::new();

        let mut auth = header::HeaderValue::from_str(&format!("Bearer {}", credential.expose()))
            .map_err(|_| DeskError::Config("Invalid API key format".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()?;

        Ok(Self { client, config })
    }

    /// Build a URL for the given path, relative to the configured base.
    fn build_url(&self, path: &str) -> DeskResult<url::Url> {
        self.config
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(DeskError::InvalidUrl)
    }

    /// Execute a request with retries.
    async fn execute_with_retry(&self, request_builder: RequestBuilder) -> DeskResult<Response> {
        let retry_config = &self.config.retry_config;
        let mut attempts = 0;

        loop {
            let request = request_builder
                .try_clone()
                .ok_or_else(|| DeskError::Config("Request cannot be cloned".to_string()))?;

            match request.send().await {
                Ok(response) => {
                    let status = response.status().as_u16();

                    if response.status().is_success() {
                        return Ok(response);
                    }

                    if attempts < retry_config.max_retries
                        && retry_config.should_retry_status(status)
                    {
                        let backoff = retry_config.backoff_for_attempt(attempts);
                        warn!(
                            status = status,
                            attempt = attempts + 1,
                            backoff_ms = backoff.as_millis(),
                            "Desk request failed, retrying"
                        );
                        tokio::time::sleep(backoff).await;
                        attempts += 1;
                        continue;
                    }

                    let retry_after = response
                        .headers()
                        .get(header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|v| v.parse::<u64>().ok());
                    let body = response.text().await.unwrap_or_default();
                    return Err(DeskError::from_response(status, &body, retry_after));
                }
                Err(e) => {
                    if e.is_timeout() {
                        if attempts < retry_config.max_retries {
                            let backoff = retry_config.backoff_for_attempt(attempts);
                            warn!(
                                attempt = attempts + 1,
                                backoff_ms = backoff.as_millis(),
                                "Desk request timed out, retrying"
                            );
                            tokio::time::sleep(backoff).await;
                            attempts += 1;
                            continue;
                        }
                        return Err(DeskError::Timeout);
                    }
                    return Err(e.into());
                }
            }
        }
    }

    /// Execute a GET request.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> DeskResult<T> {
        let url = self.build_url(path)?;
        debug!(url = %url, "GET request");

        let response = self.execute_with_retry(self.client.get(url)).await?;
        let body = response.json().await?;
        Ok(body)
    }

    /// Execute a GET request with query parameters.
    pub async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> DeskResult<T> {
        let url = self.build_url(path)?;
        debug!(url = %url, "GET request with query");

        let response = self
            .execute_with_retry(self.client.get(url).query(query))
            .await?;
        let body = response.json().await?;
        Ok(body)
    }

    /// Execute a POST request.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> DeskResult<T> {
        let url = self.build_url(path)?;
        debug!(url = %url, "POST request");

        let response = self
            .execute_with_retry(self.client.post(url).json(body))
            .await?;
        let body = response.json().await?;
        Ok(body)
    }

    /// Execute a PUT request.
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> DeskResult<T> {
        let url = self.build_url(path)?;
        debug!(url = %url, "PUT request");

        let response = self
            .execute_with_retry(self.client.put(url).json(body))
            .await?;
        let body = response.json().await?;
        Ok(body)
    }
}
