// Stage tools

use super::registry::{render, ToolError, ToolHandler};
use super::{ToolDomain, ToolName};
use crate::protocol::CallToolResult;
use deskgate_client::DeskClient;
use serde_json::Value;

pub struct StageTools {
    client: DeskClient,
}

impl StageTools {
    pub fn new(client: DeskClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl ToolHandler for StageTools {
    fn domain(&self) -> ToolDomain {
        ToolDomain::Stages
    }

    async fn handle(&self, tool: ToolName, _arguments: Value) -> Result<CallToolResult, ToolError> {
        match tool {
            ToolName::ListStages => {
                let mut stages = self.client.stages().list().await?.data;
                stages.sort_by_key(|s| s.position.unwrap_or(u32::MAX));
                render(format!("Found {} stage(s):", stages.len()), &stages)
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
    use crate::protocol::ToolContent;
    use deskgate_client::{Credential, RetryConfig};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_stages_are_listed_in_pipeline_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    {"id": 3, "name": "Done", "position": 3, "closed": true},
                    {"id": 9, "name": "Unsorted"},
                    {"id": 1, "name": "New", "position": 1},
                ]
            })))
            .mount(&server)
            .await;

        let client = DeskClient::builder()
            .base_url(server.uri())
            .credential(Credential::new("tenant-key"))
            .retry_config(RetryConfig::no_retry())
            .build()
            .unwrap();

        let result = StageTools::new(client)
            .handle(ToolName::ListStages, json!({}))
            .await
            .unwrap();

        let ToolContent::Text { text } = &result.content[0];
        assert!(text.starts_with("Found 3 stage(s):"));
        let new = text.find("\"New\"").unwrap();
        let done = text.find("\"Done\"").unwrap();
        let unsorted = text.find("\"Unsorted\"").unwrap();
        assert!(new < done && done < unsorted);
    }
}
