use super::error::GatewayError;
use deskgate_mcp::protocol::JsonRpcError;
use serde::Serialize;
use serde_json::Value;

/// Terminal result of dispatching one request.
#[derive(Debug)]
pub enum Outcome {
    Health(HealthReport),
    /// CORS pre-flight answer.
    Preflight,
    /// A JSON-RPC notification was accepted; no body is sent.
    Notification,
    Success { id: Value, result: Value },
    /// The RPC failed; the transport did not.
    ProtocolError { id: Value, error: JsonRpcError },
    /// The request never reached the JSON-RPC layer.
    TransportError(GatewayError),
}

impl Outcome {
    pub fn transport(error: impl Into<GatewayError>) -> Self {
        Self::TransportError(error.into())
    }

    pub fn protocol(id: Value, error: JsonRpcError) -> Self {
        Self::ProtocolError { id, error }
    }

    /// Wrap a serializable result; a serialization failure becomes a 500.
    pub fn success<T: Serialize>(id: Value, result: &T) -> Self {
        match serde_json::to_value(result) {
            Ok(result) => Self::Success { id, result },
            Err(e) => Self::TransportError(GatewayError::Internal(format!(
                "failed to encode result: {e}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub service: String,
    pub version: &'static str,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl HealthReport {
    pub fn healthy(service: &str) -> Self {
        Self {
            status: "healthy",
            service: service.to_string(),
            version: env!("CARGO_PKG_VERSION"),
            timestamp: chrono::Utc::now(),
        }
    }
}
