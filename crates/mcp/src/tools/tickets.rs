// Ticket tools

use super::registry::{parse_args, render, ToolError, ToolHandler};
use super::{ToolDomain, ToolName};
use crate::protocol::CallToolResult;
use deskgate_client::api::tickets::{CreateTicketRequest, TicketFilter, UpdateTicketRequest};
use deskgate_client::{DeskClient, DeskError};
use serde::Deserialize;
use serde_json::Value;

pub struct TicketTools {
    client: DeskClient,
}

impl TicketTools {
    pub fn new(client: DeskClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct TicketIdArgs {
    ticket_id: u64,
}

#[derive(Debug, Deserialize)]
struct UpdateTicketArgs {
    ticket_id: u64,
    #[serde(flatten)]
    changes: UpdateTicketRequest,
}

#[async_trait::async_trait]
impl ToolHandler for TicketTools {
    fn domain(&self) -> ToolDomain {
        ToolDomain::Tickets
    }

    async fn handle(&self, tool: ToolName, arguments: Value) -> Result<CallToolResult, ToolError> {
        match tool {
            ToolName::ListTickets => {
                let filter: TicketFilter = parse_args(tool, arguments)?;
                let page = self.client.tickets().list(&filter).await?;
                render(format!("Found {} ticket(s):", page.data.len()), &page.data)
            }
            ToolName::GetTicket => {
                let args: TicketIdArgs = parse_args(tool, arguments)?;
                match self.client.tickets().get(args.ticket_id).await {
                    Ok(ticket) => render(format!("Ticket #{}:", ticket.id), &ticket),
                    Err(DeskError::NotFound(_)) => Ok(CallToolResult::error(format!(
                        "Ticket {} not found",
                        args.ticket_id
                    ))),
                    Err(e) => Err(e.into()),
                }
            }
            ToolName::CreateTicket => {
                let request: CreateTicketRequest = parse_args(tool, arguments)?;
                if request.subject.trim().is_empty() {
                    return Err(ToolError::invalid(tool, "subject must not be empty"));
                }
                let ticket = self.client.tickets().create(&request).await?;
                render(format!("Created ticket #{}:", ticket.id), &ticket)
            }
            ToolName::UpdateTicket => {
                let args: UpdateTicketArgs = parse_args(tool, arguments)?;
                if args.changes.is_empty() {
                    return Err(ToolError::invalid(tool, "at least one field to change is required"));
                }
                match self.client.tickets().update(args.ticket_id, &args.changes).await {
                    Ok(ticket) => render(format!("Updated ticket #{}:", ticket.id), &ticket),
                    Err(DeskError::NotFound(_)) => Ok(CallToolResult::error(format!(
                        "Ticket {} not found",
                        args.ticket_id
                    ))),
                    Err(e) => Err(e.into()),
                }
            }
            other => Err(ToolError::WrongDomain {
                tool: other,
                domain: self.domain(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deskgate_client::{Credential, RetryConfig};
    use crate::protocol::ToolContent;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn tools(server: &MockServer) -> TicketTools {
        let client = DeskClient::builder()
            .base_url(server.uri())
            .credential(Credential::new("tenant-key"))
            .retry_config(RetryConfig::no_retry())
            .build()
            .unwrap();
        TicketTools::new(client)
    }

    fn text(result: &CallToolResult) -> &str {
        match &result.content[0] {
            ToolContent::Text { text } => text,
        }
    }

    #[tokio::test]
    async fn test_get_ticket_not_found_is_tool_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tickets/9"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let result = tools(&server)
            .handle(ToolName::GetTicket, json!({"ticket_id": 9}))
            .await
            .unwrap();

        assert_eq!(result.is_error, Some(true));
        assert_eq!(text(&result), "Error: Ticket 9 not found");
    }

    #[tokio::test]
    async fn test_list_tickets_summarises() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tickets"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"id": 1, "subject": "A"}, {"id": 2, "subject": "B"}]
            })))
            .mount(&server)
            .await;

        let result = tools(&server)
            .handle(ToolName::ListTickets, Value::Null)
            .await
            .unwrap();

        assert!(result.is_error.is_none());
        assert!(text(&result).starts_with("Found 2 ticket(s):"));
    }

    #[tokio::test]
    async fn test_create_ticket_requires_subject() {
        let server = MockServer::start().await;

        let err = tools(&server)
            .handle(ToolName::CreateTicket, json!({"subject": "  ", "client_id": 4}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments { .. }));

        let err = tools(&server)
            .handle(ToolName::CreateTicket, json!({"client_id": 4}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments { .. }));
    }

    #[tokio::test]
    async fn test_update_ticket_needs_changes() {
        let server = MockServer::start().await;

        let err = tools(&server)
            .handle(ToolName::UpdateTicket, json!({"ticket_id": 4}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments { .. }));
    }

    #[tokio::test]
    async fn test_rejects_other_domains() {
        let server = MockServer::start().await;

        let err = tools(&server)
            .handle(ToolName::ListUsers, Value::Null)
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::WrongDomain { domain: ToolDomain::Tickets, .. }));
    }
}
