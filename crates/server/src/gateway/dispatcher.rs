//! Protocol dispatcher: path, credential, verb, envelope, then method.

use super::error::GatewayError;
use super::outcome::{HealthReport, Outcome};
use super::request::RequestContext;
use crate::config::GatewayConfig;
use deskgate_mcp::protocol::{
    CallToolParams, InitializeParams, InitializeResult, JsonRpcError, JsonRpcRequest,
    ListToolsResult, ServerInfo,
};
use deskgate_mcp::{DispatchBuilder, DispatchError, DispatchTable, ToolError, ToolRegistry};
use futures::FutureExt;
use serde_json::Value;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, error, info, warn, Span};

pub struct ProtocolDispatcher {
    config: Arc<GatewayConfig>,
    registry: Arc<ToolRegistry>,
    builder: DispatchBuilder,
}

impl ProtocolDispatcher {
    pub fn new(
        config: Arc<GatewayConfig>,
        registry: Arc<ToolRegistry>,
        builder: DispatchBuilder,
    ) -> Self {
        Self {
            config,
            registry,
            builder,
        }
    }

    pub async fn dispatch(&self, ctx: &RequestContext) -> Outcome {
        // Routing happens before any credential check so unknown paths and
        // health probes behave the same with or without one.
        if ctx.path() == self.config.health_path {
            return Outcome::Health(HealthReport::healthy(&self.config.service_name));
        }
        if !self.config.is_protocol_path(ctx.path()) {
            debug!("No route");
            return Outcome::transport(GatewayError::NotFound(ctx.path().to_string()));
        }

        // Browsers never attach custom headers to a pre-flight.
        if ctx.method() == "OPTIONS" {
            return Outcome::Preflight;
        }

        let Some(credential) = ctx.credential() else {
            warn!(header = %self.config.credential_header, "Missing tenant credential");
            return Outcome::transport(GatewayError::MissingCredential(
                self.config.credential_header.clone(),
            ));
        };

        if ctx.method() != "POST" {
            return Outcome::transport(GatewayError::MethodNotAllowed(ctx.method().to_string()));
        }

        let request = match ctx
            .json_body()
            .and_then(|body| JsonRpcRequest::from_value(body).map_err(GatewayError::from))
        {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "Rejected request envelope");
                return Outcome::transport(e);
            }
        };
        Span::current().record("rpc_method", request.method.as_str());

        if request.is_notification() {
            debug!("Notification accepted");
            return Outcome::Notification;
        }

        let table = match self.builder.build(credential) {
            Ok(table) => table,
            Err(DispatchError::CredentialRequired) => {
                return Outcome::transport(GatewayError::MissingCredential(
                    self.config.credential_header.clone(),
                ))
            }
            Err(e) => {
                error!(error = %e, credential = %credential.redacted(), "Failed to build dispatch table");
                return Outcome::transport(GatewayError::Internal(e.to_string()));
            }
        };

        let id = request.response_id();
        match request.method.as_str() {
            "initialize" => self.initialize(id, request.params),
            "tools/list" => Outcome::success(
                id,
                &ListToolsResult {
                    tools: self.registry.descriptors().to_vec(),
                },
            ),
            "tools/call" => call_tool(&table, id, request.params).await,
            other => {
                debug!(method = other, "Unknown JSON-RPC method");
                Outcome::protocol(id, JsonRpcError::method_not_found(other))
            }
        }
    }

    fn initialize(&self, id: Value, params: Option<Value>) -> Outcome {
        let params: InitializeParams = match params {
            None | Some(Value::Null) => InitializeParams::default(),
            Some(value) => match serde_json::from_value(value) {
                Ok(params) => params,
                Err(e) => {
                    return Outcome::protocol(
                        id,
                        JsonRpcError::invalid_params(format!("Invalid initialize params: {e}")),
                    )
                }
            },
        };

        if let Some(client) = &params.client_info {
            info!(client = %client.name, client_version = %client.version, "Client initializing");
        }

        let mut result = InitializeResult::new(
            params.protocol_version.as_deref(),
            ServerInfo {
                name: self.config.service_name.clone(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        );
        result.instructions = self.config.instructions.clone();
        Outcome::success(id, &result)
    }
}

async fn call_tool(table: &DispatchTable, id: Value, params: Option<Value>) -> Outcome {
    let params: CallToolParams = match params {
        Some(value @ Value::Object(_)) => match serde_json::from_value(value) {
            Ok(params) => params,
            Err(e) => {
                return Outcome::protocol(
                    id,
                    JsonRpcError::invalid_params(format!("Invalid tools/call params: {e}")),
                )
            }
        },
        _ => {
            return Outcome::protocol(id, JsonRpcError::invalid_params("params must be an object"))
        }
    };

    let Some(name) = params.name.filter(|n| !n.is_empty()) else {
        return Outcome::protocol(id, JsonRpcError::invalid_params("params.name is required"));
    };

    let Some(bound) = table.resolve(&name) else {
        warn!(tool = %name, "Unknown tool");
        return Outcome::protocol(id, JsonRpcError::tool_not_found(&name));
    };

    let tool = bound.tool;
    let arguments = params
        .arguments
        .unwrap_or_else(|| Value::Object(Default::default()));

    debug!(%tool, "Calling tool");
    match AssertUnwindSafe(bound.call(arguments)).catch_unwind().await {
        Ok(Ok(result)) => {
            info!(%tool, is_error = result.is_error.unwrap_or(false), "Tool call completed");
            Outcome::success(id, &result)
        }
        Ok(Err(e)) => {
            match &e {
                ToolError::InvalidArguments { .. } => warn!(%tool, error = %e, "Invalid tool arguments"),
                _ => error!(%tool, error = %e, "Tool execution failed"),
            }
            Outcome::protocol(id, e.to_rpc_error(tool))
        }
        Err(_) => {
            error!(%tool, "Tool handler panicked");
            Outcome::protocol(id, JsonRpcError::internal_error(format!("Tool {} failed", tool)))
        }
    }
}
