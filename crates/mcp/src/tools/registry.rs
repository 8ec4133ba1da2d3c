// Tool descriptors and the handler interface

use super::name::{ToolDomain, ToolName};
use super::schema::input_schema;
use crate::protocol::{CallToolResult, JsonRpcError, ToolDescriptor};
use deskgate_client::DeskError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Executes the tools of one domain.
///
/// Implementations hold request-scoped state (an authenticated client) and
/// must only be reached through a [`crate::DispatchTable`].
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync {
    fn domain(&self) -> ToolDomain;

    /// Execute `tool` with the caller's arguments.
    async fn handle(&self, tool: ToolName, arguments: Value) -> Result<CallToolResult, ToolError>;
}

/// Failure while executing a tool.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: ToolName, reason: String },

    #[error("{tool} is not served by the {domain} handler")]
    WrongDomain { tool: ToolName, domain: ToolDomain },

    #[error("Desk API call failed: {0}")]
    Api(#[from] DeskError),

    #[error("Failed to encode tool output: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ToolError {
    /// The JSON-RPC error the caller sees. Only argument problems carry
    /// detail; everything else is reduced to a generic message.
    pub fn to_rpc_error(&self, tool: ToolName) -> JsonRpcError {
        match self {
            Self::InvalidArguments { .. } => JsonRpcError::invalid_params(self.to_string()),
            _ => JsonRpcError::internal_error(format!("Tool {} failed", tool)),
        }
    }

    pub fn invalid(tool: ToolName, reason: impl Into<String>) -> Self {
        Self::InvalidArguments {
            tool,
            reason: reason.into(),
        }
    }
}

/// Read-only set of tool descriptors, shared by every request.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    descriptors: Vec<ToolDescriptor>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            descriptors: ToolName::ALL.into_iter().map(descriptor).collect(),
        }
    }

    /// List all tool descriptors
    pub fn descriptors(&self) -> &[ToolDescriptor] {
        &self.descriptors
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

pub fn descriptor(tool: ToolName) -> ToolDescriptor {
    ToolDescriptor {
        name: tool.as_str().to_string(),
        description: tool.description().to_string(),
        input_schema: input_schema(tool),
    }
}

/// Decode tool arguments; a missing or `null` argument object counts as `{}`.
pub(crate) fn parse_args<T: DeserializeOwned>(tool: ToolName, arguments: Value) -> Result<T, ToolError> {
    let arguments = match arguments {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };
    serde_json::from_value(arguments).map_err(|e| ToolError::invalid(tool, e.to_string()))
}

/// Text result: a one-line summary followed by the pretty-printed payload.
pub(crate) fn render<T: Serialize>(summary: impl AsRef<str>, payload: &T) -> Result<CallToolResult, ToolError> {
    let json = serde_json::to_string_pretty(payload)?;
    Ok(CallToolResult::text(format!("{}\n\n{}", summary.as_ref(), json)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Args {
        #[serde(default)]
        limit: Option<u32>,
    }

    #[test]
    fn test_registry_is_stable() {
        let first = ToolRegistry::new();
        let second = ToolRegistry::new();

        assert_eq!(first.len(), ToolName::ALL.len());
        assert_eq!(first.descriptors(), second.descriptors());
        assert_eq!(first.descriptors()[0].name, "list_tickets");
    }

    #[test]
    fn test_parse_args_treats_null_as_empty() {
        let args: Args = parse_args(ToolName::ListStages, Value::Null).unwrap();
        assert!(args.limit.is_none());
    }

    #[test]
    fn test_parse_args_reports_invalid() {
        let err = parse_args::<Args>(ToolName::ListStages, serde_json::json!({"limit": "ten"}))
            .unwrap_err();
        let rpc = err.to_rpc_error(ToolName::ListStages);
        assert_eq!(rpc.code, JsonRpcError::INVALID_PARAMS);
        assert!(rpc.message.contains("list_stages"));
    }

    #[test]
    fn test_api_failures_are_generic() {
        let err = ToolError::from(DeskError::Api {
            status: 500,
            message: "stack trace from upstream".to_string(),
        });
        let rpc = err.to_rpc_error(ToolName::GetTicket);
        assert_eq!(rpc.code, JsonRpcError::INTERNAL_ERROR);
        assert_eq!(rpc.message, "Tool get_ticket failed");
    }
}
