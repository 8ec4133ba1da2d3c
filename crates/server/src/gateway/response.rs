//! Response serializer: [`Outcome`] to [`HttpResponse`].

use super::outcome::Outcome;
use super::request::SESSION_HEADER;
use crate::config::GatewayConfig;
use deskgate_mcp::protocol::{JsonRpcError, JsonRpcResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use tracing::error;

/// The only value that leaves the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl HttpResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }
}

/// Builds responses with the baseline header set every reply carries.
#[derive(Debug, Clone)]
pub struct ResponseSerializer {
    baseline: BTreeMap<String, String>,
}

impl ResponseSerializer {
    pub fn new(config: &GatewayConfig) -> Self {
        let allow_headers = format!(
            "content-type, authorization, {}, {}",
            config.credential_header_lower(),
            SESSION_HEADER
        );

        let baseline = [
            ("content-type", "application/json".to_string()),
            (
                "x-powered-by",
                format!("{}/{}", config.service_name, env!("CARGO_PKG_VERSION")),
            ),
            ("access-control-allow-origin", "*".to_string()),
            ("access-control-allow-methods", "GET, POST, OPTIONS".to_string()),
            ("access-control-allow-headers", allow_headers),
            ("access-control-expose-headers", SESSION_HEADER.to_string()),
            ("access-control-max-age", "86400".to_string()),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        Self { baseline }
    }

    pub fn render(&self, outcome: Outcome, session_id: Option<&str>) -> HttpResponse {
        let (status_code, body) = match outcome {
            Outcome::Health(report) => (200, encode(&report)),
            Outcome::Preflight => (200, String::new()),
            Outcome::Notification => (204, String::new()),
            Outcome::Success { id, result } => (200, encode(&JsonRpcResponse::success(id, result))),
            Outcome::ProtocolError { id, error } => {
                (200, encode(&JsonRpcResponse::error(id, error)))
            }
            Outcome::TransportError(err) => {
                let status = err.status_code();
                if err.is_server_error() {
                    error!(status, code = err.code(), error = %err, "Request failed");
                }
                let body = json!({
                    "error": {
                        "code": err.code(),
                        "message": err.public_message(),
                        "statusCode": status,
                    }
                });
                (status, body.to_string())
            }
        };

        let mut headers = self.baseline.clone();
        if let Some(session_id) = session_id {
            headers.insert(SESSION_HEADER.to_string(), session_id.to_string());
        }

        HttpResponse {
            status_code,
            headers,
            body,
        }
    }
}

fn encode<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        error!(error = %e, "Failed to encode response body");
        json!({
            "jsonrpc": "2.0",
            "id": null,
            "error": {"code": JsonRpcError::INTERNAL_ERROR, "message": "Internal error"},
        })
        .to_string()
    })
}
