//! The request-ingress gateway: normalize, dispatch, serialize.
//!
//! A [`Gateway`] holds only tenant-neutral state (settings, the tool
//! registry, client settings). Everything derived from a credential is built
//! inside [`Gateway::handle`] and dropped before it returns.

mod dispatcher;
pub mod error;
pub mod outcome;
pub mod request;
pub mod response;

pub use dispatcher::ProtocolDispatcher;
pub use error::GatewayError;
pub use outcome::{HealthReport, Outcome};
pub use request::{RequestBody, RequestContext, SESSION_HEADER};
pub use response::{HttpResponse, ResponseSerializer};

use crate::config::ServerConfig;
use anyhow::Result;
use deskgate_mcp::{DispatchBuilder, ToolRegistry};
use serde_json::Value;
use std::sync::Arc;
use tracing::{field, info, info_span, warn, Instrument};

#[derive(Clone)]
pub struct Gateway {
    inner: Arc<Inner>,
}

struct Inner {
    credential_header: String,
    dispatcher: ProtocolDispatcher,
    serializer: ResponseSerializer,
}

impl Gateway {
    pub fn new(config: &ServerConfig) -> Result<Self> {
        config.validate()?;
        let client_config = Arc::new(config.client_config()?);
        let registry = Arc::new(ToolRegistry::new());
        let gateway_config = Arc::new(config.gateway.clone());

        info!(
            tools = registry.len(),
            paths = ?gateway_config.mcp_paths,
            api = %client_config.base_url,
            "Gateway ready"
        );

        Ok(Self {
            inner: Arc::new(Inner {
                credential_header: gateway_config.credential_header_lower(),
                serializer: ResponseSerializer::new(&gateway_config),
                dispatcher: ProtocolDispatcher::new(
                    gateway_config,
                    registry,
                    DispatchBuilder::new(client_config),
                ),
            }),
        })
    }

    /// Process one raw HTTP event end to end. Never fails: every problem is
    /// expressed as an HTTP response.
    pub async fn handle(&self, event: &Value) -> HttpResponse {
        let ctx = match RequestContext::parse(event, &self.inner.credential_header) {
            Ok(ctx) => ctx,
            Err(e) => {
                warn!(error = %e, "Rejected raw event");
                return self.inner.serializer.render(Outcome::transport(e), None);
            }
        };

        let span = info_span!(
            "request",
            session_id = %ctx.session_id(),
            method = %ctx.method(),
            path = %ctx.path(),
            rpc_method = field::Empty,
        );

        async {
            let outcome = self.inner.dispatcher.dispatch(&ctx).await;
            let response = self
                .inner
                .serializer
                .render(outcome, Some(ctx.session_id()));
            info!(status = response.status_code, "Request complete");
            response
        }
        .instrument(span)
        .await
    }
}
