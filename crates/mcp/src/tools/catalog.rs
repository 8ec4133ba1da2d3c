// Service catalog tools

use super::registry::{parse_args, render, ToolError, ToolHandler};
use super::{ToolDomain, ToolName};
use crate::protocol::CallToolResult;
use deskgate_client::api::ListQuery;
use deskgate_client::{DeskClient, DeskError};
use serde::Deserialize;
use serde_json::Value;

pub struct CatalogTools {
    client: DeskClient,
}

impl CatalogTools {
    pub fn new(client: DeskClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct ItemIdArgs {
    item_id: u64,
}

#[async_trait::async_trait]
impl ToolHandler for CatalogTools {
    fn domain(&self) -> ToolDomain {
        ToolDomain::Catalog
    }

    async fn handle(&self, tool: ToolName, arguments: Value) -> Result<CallToolResult, ToolError> {
        match tool {
            ToolName::ListCatalogItems => {
                let query: ListQuery = parse_args(tool, arguments)?;
                let page = self.client.catalog().list(&query).await?;
                render(format!("Found {} catalog item(s):", page.data.len()), &page.data)
            }
            ToolName::GetCatalogItem => {
                let args: ItemIdArgs = parse_args(tool, arguments)?;
                match self.client.catalog().get(args.item_id).await {
                    Ok(item) => render(format!("Catalog item #{}:", item.id), &item),
                    Err(DeskError::NotFound(_)) => Ok(CallToolResult::error(format!(
                        "Catalog item {} not found",
                        args.item_id
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
