//! Ticket communications API endpoints.

use crate::client::DeskClient;
use crate::error::DeskResult;
use serde::{Deserialize, Serialize};

use super::Page;

/// Communications API: replies and internal notes on a ticket.
pub struct CommunicationsApi<'a> {
    client: &'a DeskClient,
}

impl<'a> CommunicationsApi<'a> {
    pub(crate) fn new(client: &'a DeskClient) -> Self {
        Self { client }
    }

    /// List communications on a ticket.
    pub async fn list(&self, ticket_id: u64) -> DeskResult<Page<Communication>> {
        self.client
            .http
            .get(&format!("tickets/{ticket_id}/communications"))
            .await
    }

    /// Add a reply or internal note to a ticket.
    pub async fn create(
        &self,
        ticket_id: u64,
        request: &CreateCommunicationRequest,
    ) -> DeskResult<Communication> {
        self.client
            .http
            .post(&format!("tickets/{ticket_id}/communications"), request)
            .await
    }
}

/// A message attached to a ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Communication {
    pub id: u64,
    pub ticket_id: Option<u64>,
    pub body: String,
    #[serde(default)]
    pub internal: bool,
    pub author_id: Option<u64>,
    pub created_at: Option<String>,
}

/// Request to add a communication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommunicationRequest {
    pub body: String,
    #[serde(default)]
    pub internal: bool,
}
