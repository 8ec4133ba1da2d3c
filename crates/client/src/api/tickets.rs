//! Tickets API endpoints.

use crate::client::DeskClient;
use crate::error::DeskResult;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Page;

/// Tickets API.
pub struct TicketsApi<'a> {
    client: &'a DeskClient,
}

impl<'a> TicketsApi<'a> {
    pub(crate) fn new(client: &'a DeskClient) -> Self {
        Self { client }
    }

    /// List tickets matching the filter.
    pub async fn list(&self, filter: &TicketFilter) -> DeskResult<Page<Ticket>> {
        self.client.http.get_with_query("tickets", filter).await
    }

    /// Get a specific ticket.
    pub async fn get(&self, ticket_id: u64) -> DeskResult<Ticket> {
        self.client.http.get(&format!("tickets/{ticket_id}")).await
    }

    /// Create a ticket.
    pub async fn create(&self, request: &CreateTicketRequest) -> DeskResult<Ticket> {
        self.client.http.post("tickets", request).await
    }

    /// Update a ticket. Only the fields that are set are sent.
    pub async fn update(&self, ticket_id: u64, request: &UpdateTicketRequest) -> DeskResult<Ticket> {
        self.client
            .http
            .put(&format!("tickets/{ticket_id}"), request)
            .await
    }
}

/// A ticket as returned by the API. Fields the gateway does not model are
/// kept in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: u64,
    pub subject: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub client_id: Option<u64>,
    pub assignee_id: Option<u64>,
    pub stage_id: Option<u64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Query parameters for listing tickets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TicketFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

/// Request to create a ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTicketRequest {
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub client_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_item_id: Option<u64>,
}

/// Request to update a ticket.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTicketRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage_id: Option<u64>,
}

impl UpdateTicketRequest {
    pub fn is_empty(&self) -> bool {
        self.subject.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.assignee_id.is_none()
            && self.stage_id.is_none()
    }
}
