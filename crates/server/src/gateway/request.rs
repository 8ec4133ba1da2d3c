//! Request normalizer: raw serverless HTTP event to [`RequestContext`].
//!
//! Accepted event shapes:
//! - API Gateway v1 style: `httpMethod`, `path`, `headers`, `multiValueHeaders`
//! - v2 / function URL style: `requestContext.http.method`, `rawPath`
//! - a plain `{ "method", "path" }` object
//!
//! All shapes may carry `body` (string, or already-decoded JSON) and
//! `isBase64Encoded`.

use super::error::GatewayError;
use base64::Engine;
use deskgate_client::Credential;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::warn;

pub const SESSION_HEADER: &str = "mcp-session-id";

const MAX_SESSION_ID_LEN: usize = 128;

/// Decoded request payload.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Absent,
    Json(Value),
    Text(String),
    /// The body could not be decoded; the reason is reported only if the
    /// request gets far enough to need its body.
    Invalid(String),
}

/// Canonical view of one inbound request. Built once, never mutated.
#[derive(Debug, Clone)]
pub struct RequestContext {
    method: String,
    path: String,
    headers: BTreeMap<String, String>,
    body: RequestBody,
    credential: Option<Credential>,
    session_id: String,
}

impl RequestContext {
    /// Normalize a raw event. `credential_header` is matched case-insensitively.
    ///
    /// The credential is extracted but not required here; routing decides
    /// whether the path needs one.
    pub fn parse(event: &Value, credential_header: &str) -> Result<Self, GatewayError> {
        let event = event
            .as_object()
            .ok_or_else(|| GatewayError::MalformedEvent("event must be a JSON object".into()))?;

        let http = event
            .get("requestContext")
            .and_then(|c| c.get("http"))
            .and_then(Value::as_object);

        let method = str_field(event, "httpMethod")
            .or_else(|| http.and_then(|h| str_field(h, "method")))
            .or_else(|| str_field(event, "method"))
            .filter(|m| !m.trim().is_empty())
            .ok_or_else(|| GatewayError::MalformedEvent("missing HTTP method".into()))?
            .trim()
            .to_ascii_uppercase();

        let raw_path = str_field(event, "rawPath")
            .or_else(|| str_field(event, "path"))
            .or_else(|| http.and_then(|h| str_field(h, "path")))
            .ok_or_else(|| GatewayError::MalformedEvent("missing request path".into()))?;

        let mut headers = collect_headers(event)?;
        let body = decode_body(event, &headers);

        // The raw key lives only inside `Credential`, never in the header map.
        let credential = headers
            .remove(&credential_header.to_ascii_lowercase())
            .map(Credential::new)
            .filter(|c| !c.is_empty());

        let session_id = match headers
            .get(SESSION_HEADER)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
        {
            Some(id) if is_valid_session_id(id) => id.to_string(),
            Some(id) => {
                warn!(len = id.len(), "Replacing unusable session id");
                uuid::Uuid::new_v4().to_string()
            }
            None => uuid::Uuid::new_v4().to_string(),
        };

        Ok(Self {
            method,
            path: normalize_path(raw_path),
            headers,
            body,
            credential,
            session_id,
        })
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    /// The body as JSON, or the reason it cannot be used as such.
    pub fn json_body(&self) -> Result<&Value, GatewayError> {
        match &self.body {
            RequestBody::Json(value) => Ok(value),
            RequestBody::Absent => Err(GatewayError::InvalidBody("request body is required".into())),
            RequestBody::Text(_) => Err(GatewayError::InvalidBody("expected a JSON body".into())),
            RequestBody::Invalid(reason) => Err(GatewayError::InvalidBody(reason.clone())),
        }
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}

/// Session ids must round-trip through an HTTP header: visible ASCII only.
fn is_valid_session_id(id: &str) -> bool {
    id.len() <= MAX_SESSION_ID_LEN
        && id.bytes().all(|b| (0x21..=0x7e).contains(&b))
}

fn str_field<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    object.get(key).and_then(Value::as_str)
}

fn header_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Lower-case header names. Single-value headers win over the first entry of
/// `multiValueHeaders`.
fn collect_headers(event: &Map<String, Value>) -> Result<BTreeMap<String, String>, GatewayError> {
    let mut headers = BTreeMap::new();

    match event.get("headers") {
        None | Some(Value::Null) => {}
        Some(Value::Object(map)) => {
            for (name, value) in map {
                if let Some(value) = header_value(value) {
                    headers.insert(name.to_ascii_lowercase(), value);
                }
            }
        }
        Some(_) => return Err(GatewayError::MalformedEvent("headers must be an object".into())),
    }

    if let Some(Value::Object(map)) = event.get("multiValueHeaders") {
        for (name, values) in map {
            let first = values.as_array().and_then(|v| v.first()).and_then(header_value);
            if let Some(first) = first {
                headers.entry(name.to_ascii_lowercase()).or_insert(first);
            }
        }
    }

    Ok(headers)
}

fn is_json_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || essence.ends_with("+json")
}

fn decode_body(event: &Map<String, Value>, headers: &BTreeMap<String, String>) -> RequestBody {
    let raw = match event.get("body") {
        None | Some(Value::Null) => return RequestBody::Absent,
        Some(Value::String(s)) => s,
        // Some runtimes hand over an already-parsed body.
        Some(other) => return RequestBody::Json(other.clone()),
    };

    let base64_encoded = event
        .get("isBase64Encoded")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let text = if base64_encoded {
        let bytes = match base64::engine::general_purpose::STANDARD.decode(raw.trim()) {
            Ok(bytes) => bytes,
            Err(e) => return RequestBody::Invalid(format!("body is not valid base64: {e}")),
        };
        match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(_) => return RequestBody::Invalid("body is not valid UTF-8".into()),
        }
    } else {
        raw.clone()
    };

    if text.trim().is_empty() {
        return RequestBody::Absent;
    }

    let declared_json = headers
        .get("content-type")
        .is_some_and(|ct| is_json_content_type(ct));

    if declared_json {
        return match serde_json::from_str(&text) {
            Ok(value) => RequestBody::Json(value),
            Err(e) => RequestBody::Invalid(format!("body is not valid JSON: {e}")),
        };
    }

    // MCP clients often omit the content type; accept bodies that parse.
    let trimmed = text.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        if let Ok(value) = serde_json::from_str(&text) {
            return RequestBody::Json(value);
        }
    }
    RequestBody::Text(text)
}

/// Strip the query string and trailing slash; guarantee a leading slash.
fn normalize_path(raw: &str) -> String {
    let path = raw.split(['?', '#']).next().unwrap_or_default().trim();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}
