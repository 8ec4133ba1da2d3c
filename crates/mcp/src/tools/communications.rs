// Ticket communication tools

use super::registry::{parse_args, render, ToolError, ToolHandler};
use super::{ToolDomain, ToolName};
use crate::protocol::CallToolResult;
use deskgate_client::api::communications::CreateCommunicationRequest;
use deskgate_client::{DeskClient, DeskError};
use serde::Deserialize;
use serde_json::Value;

pub struct CommunicationTools {
    client: DeskClient,
}

impl CommunicationTools {
    pub fn new(client: DeskClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct TicketIdArgs {
    ticket_id: u64,
}

#[derive(Debug, Deserialize)]
struct AddCommunicationArgs {
    ticket_id: u64,
    #[serde(flatten)]
    message: CreateCommunicationRequest,
}

#[async_trait::async_trait]
impl ToolHandler for CommunicationTools {
    fn domain(&self) -> ToolDomain {
        ToolDomain::Communications
    }

    async fn handle(&self, tool: ToolName, arguments: Value) -> Result<CallToolResult, ToolError> {
        match tool {
            ToolName::ListTicketCommunications => {
                let args: TicketIdArgs = parse_args(tool, arguments)?;
                match self.client.communications().list(args.ticket_id).await {
                    Ok(page) => render(
                        format!(
                            "Ticket #{} has {} communication(s):",
                            args.ticket_id,
                            page.data.len()
                        ),
                        &page.data,
                    ),
                    Err(DeskError::NotFound(_)) => Ok(CallToolResult::error(format!(
                        "Ticket {} not found",
                        args.ticket_id
                    ))),
                    Err(e) => Err(e.into()),
                }
            }
            ToolName::AddTicketCommunication => {
                let args: AddCommunicationArgs = parse_args(tool, arguments)?;
                if args.message.body.trim().is_empty() {
                    return Err(ToolError::invalid(tool, "body must not be empty"));
                }
                let kind = if args.message.internal { "internal note" } else { "reply" };
                let posted = self
                    .client
                    .communications()
                    .create(args.ticket_id, &args.message)
                    .await?;
                render(
                    format!("Added {} #{} to ticket #{}:", kind, posted.id, args.ticket_id),
                    &posted,
                )
            }
            other => Err(ToolError::WrongDomain {
                tool: other,
                domain: self.domain(),
            }),
        }
    }
}
