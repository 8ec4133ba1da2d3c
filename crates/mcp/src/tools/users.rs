// User tools

use super::registry::{parse_args, render, ToolError, ToolHandler};
use super::{ToolDomain, ToolName};
use crate::protocol::CallToolResult;
use deskgate_client::api::ListQuery;
use deskgate_client::{DeskClient, DeskError};
use serde::Deserialize;
use serde_json::Value;

pub struct UserTools {
    client: DeskClient,
}

impl UserTools {
    pub fn new(client: DeskClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct UserIdArgs {
    user_id: u64,
}

#[async_trait::async_trait]
impl ToolHandler for UserTools {
    fn domain(&self) -> ToolDomain {
        ToolDomain::Users
    }

    async fn handle(&self, tool: ToolName, arguments: Value) -> Result<CallToolResult, ToolError> {
        match tool {
            ToolName::ListUsers => {
                let query: ListQuery = parse_args(tool, arguments)?;
                let page = self.client.users().list(&query).await?;
                render(format!("Found {} user(s):", page.data.len()), &page.data)
            }
            ToolName::GetUser => {
                let args: UserIdArgs = parse_args(tool, arguments)?;
                match self.client.users().get(args.user_id).await {
                    Ok(user) => render(format!("User #{}:", user.id), &user),
                    Err(DeskError::NotFound(_)) => Ok(CallToolResult::error(format!(
                        "User {} not found",
                        args.user_id
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
