//! Clients (customer accounts) API endpoints.

use crate::client::DeskClient;
use crate::error::DeskResult;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{ListQuery, Page};

/// Clients API.
pub struct ClientsApi<'a> {
    client: &'a DeskClient,
}

impl<'a> ClientsApi<'a> {
    pub(crate) fn new(client: &'a DeskClient) -> Self {
        Self { client }
    }

    /// List client accounts.
    pub async fn list(&self, query: &ListQuery) -> DeskResult<Page<Client>> {
        self.client.http.get_with_query("clients", query).await
    }

    /// Get a specific client account.
    pub async fn get(&self, client_id: u64) -> DeskResult<Client> {
        self.client.http.get(&format!("clients/{client_id}")).await
    }

    /// Create a client account.
    pub async fn create(&self, request: &CreateClientRequest) -> DeskResult<Client> {
        self.client.http.post("clients", request).await
    }
}

/// A customer account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: u64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Request to create a client account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClientRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}
