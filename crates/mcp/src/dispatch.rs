// Request-scoped dispatch tables

use crate::protocol::CallToolResult;
use crate::tools::{
    CatalogTools, ClientTools, CommunicationTools, StageTools, TicketTools, ToolDomain, ToolError,
    ToolHandler, ToolName, UserTools,
};
use deskgate_client::{ClientConfig, Credential, DeskClient, DeskError};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("a tenant credential is required")]
    CredentialRequired,

    #[error("failed to build Desk client: {0}")]
    Client(#[from] DeskError),
}

/// Builds a fresh [`DispatchTable`] for every request.
///
/// Holds only tenant-neutral settings; nothing built from a credential is
/// retained here, so one builder can serve every tenant.
#[derive(Debug, Clone)]
pub struct DispatchBuilder {
    config: Arc<ClientConfig>,
}

impl DispatchBuilder {
    pub fn new(config: Arc<ClientConfig>) -> Self {
        Self { config }
    }

    /// Wire one authenticated client into one handler per domain.
    pub fn build(&self, credential: &Credential) -> Result<DispatchTable, DispatchError> {
        if credential.is_empty() {
            return Err(DispatchError::CredentialRequired);
        }

        let client = DeskClient::new(self.config.clone(), credential)?;
        debug!(credential = %credential.redacted(), "Built request-scoped dispatch table");

        Ok(DispatchTable {
            tickets: TicketTools::new(client.clone()),
            clients: ClientTools::new(client.clone()),
            users: UserTools::new(client.clone()),
            stages: StageTools::new(client.clone()),
            catalog: CatalogTools::new(client.clone()),
            communications: CommunicationTools::new(client),
        })
    }
}

/// Tool name to handler mapping for a single request and tenant.
///
/// Not `Clone` and never cached: built, used once, dropped with the request.
pub struct DispatchTable {
    tickets: TicketTools,
    clients: ClientTools,
    users: UserTools,
    stages: StageTools,
    catalog: CatalogTools,
    communications: CommunicationTools,
}

impl DispatchTable {
    /// Look up a tool by its wire name.
    pub fn resolve(&self, name: &str) -> Option<BoundTool<'_>> {
        let tool: ToolName = name.parse().ok()?;
        Some(BoundTool {
            tool,
            handler: self.handler(tool.domain()),
        })
    }

    fn handler(&self, domain: ToolDomain) -> &dyn ToolHandler {
        match domain {
            ToolDomain::Tickets => &self.tickets,
            ToolDomain::Clients => &self.clients,
            ToolDomain::Users => &self.users,
            ToolDomain::Stages => &self.stages,
            ToolDomain::Catalog => &self.catalog,
            ToolDomain::Communications => &self.communications,
        }
    }
}

/// A tool resolved against a request's handlers.
pub struct BoundTool<'a> {
    pub tool: ToolName,
    handler: &'a dyn ToolHandler,
}

impl BoundTool<'_> {
    pub async fn call(self, arguments: Value) -> Result<CallToolResult, ToolError> {
        self.handler.handle(self.tool, arguments).await
    }
}
