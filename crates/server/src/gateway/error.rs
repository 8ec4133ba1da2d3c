use deskgate_mcp::protocol::EnvelopeError;

/// Failures detected before a request reaches the JSON-RPC layer.
///
/// Each variant maps to an HTTP status and a machine-readable code. Messages
/// never contain credential values.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Malformed event: {0}")]
    MalformedEvent(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Missing {0} header")]
    MissingCredential(String),

    #[error("Method {0} is not allowed; use POST")]
    MethodNotAllowed(String),

    #[error("Invalid JSON-RPC request: {0}")]
    InvalidEnvelope(#[from] EnvelopeError),

    #[error("No route for {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MalformedEvent(_)
            | Self::InvalidBody(_)
            | Self::MethodNotAllowed(_)
            | Self::InvalidEnvelope(_) => 400,
            Self::MissingCredential(_) => 401,
            Self::NotFound(_) => 404,
            Self::Internal(_) => 500,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedEvent(_) => "MALFORMED_EVENT",
            Self::InvalidBody(_) => "INVALID_BODY",
            Self::MissingCredential(_) => "UNAUTHORIZED",
            Self::MethodNotAllowed(_) => "METHOD_NOT_ALLOWED",
            Self::InvalidEnvelope(_) => "INVALID_REQUEST",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message safe to send to the caller.
    pub fn public_message(&self) -> String {
        match self {
            Self::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }

    pub fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }
}
