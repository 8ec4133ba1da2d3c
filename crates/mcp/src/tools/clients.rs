// Client account tools

use super::registry::{parse_args, render, ToolError, ToolHandler};
use super::{ToolDomain, ToolName};
use crate::protocol::CallToolResult;
use deskgate_client::api::clients::CreateClientRequest;
use deskgate_client::api::ListQuery;
use deskgate_client::{DeskClient, DeskError};
use serde::Deserialize;
use serde_json::Value;

pub struct ClientTools {
    client: DeskClient,
}

impl ClientTools {
    pub fn new(client: DeskClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct ClientIdArgs {
    client_id: u64,
}

#[async_trait::async_trait]
impl ToolHandler for ClientTools {
    fn domain(&self) -> ToolDomain {
        ToolDomain::Clients
    }

    async fn handle(&self, tool: ToolName, arguments: Value) -> Result<CallToolResult, ToolError> {
        match tool {
            ToolName::ListClients => {
                let query: ListQuery = parse_args(tool, arguments)?;
                let page = self.client.clients().list(&query).await?;
                render(format!("Found {} client(s):", page.data.len()), &page.data)
            }
            ToolName::GetClient => {
                let args: ClientIdArgs = parse_args(tool, arguments)?;
                match self.client.clients().get(args.client_id).await {
                    Ok(client) => render(format!("Client #{}:", client.id), &client),
                    Err(DeskError::NotFound(_)) => Ok(CallToolResult::error(format!(
                        "Client {} not found",
                        args.client_id
                    ))),
                    Err(e) => Err(e.into()),
                }
            }
            ToolName::CreateClient => {
                let request: CreateClientRequest = parse_args(tool, arguments)?;
                if request.name.trim().is_empty() {
                    return Err(ToolError::invalid(tool, "name must not be empty"));
                }
                let client = self.client.clients().create(&request).await?;
                render(format!("Created client #{}:", client.id), &client)
            }
            other => Err(ToolError::WrongDomain {
                tool: other,
                domain: self.domain(),
            }),
        }
    }
}
