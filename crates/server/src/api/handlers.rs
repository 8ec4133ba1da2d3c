use crate::gateway::{Gateway, HttpResponse};
use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use base64::Engine;
use serde_json::{json, Map, Value};

/// Catch-all handler: re-express the request as a raw event and hand it to
/// the gateway.
pub async fn ingress(
    State(gateway): State<Gateway>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let event = to_event(&method, &uri, &headers, &body);
    into_response(gateway.handle(&event).await)
}

fn to_event(method: &Method, uri: &Uri, headers: &HeaderMap, body: &Bytes) -> Value {
    let mut header_map = Map::new();
    for (name, value) in headers {
        if let Ok(value) = value.to_str() {
            header_map
                .entry(name.as_str().to_string())
                .or_insert_with(|| Value::String(value.to_string()));
        }
    }

    let (body, is_base64) = if body.is_empty() {
        (Value::Null, false)
    } else {
        match std::str::from_utf8(body) {
            Ok(text) => (Value::String(text.to_string()), false),
            Err(_) => (
                Value::String(base64::engine::general_purpose::STANDARD.encode(body)),
                true,
            ),
        }
    };

    json!({
        "httpMethod": method.as_str(),
        "path": uri.path(),
        "headers": header_map,
        "body": body,
        "isBase64Encoded": is_base64,
    })
}

fn into_response(response: HttpResponse) -> Response {
    let status =
        StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let mut out = (status, Body::from(response.body)).into_response();
    for (name, value) in &response.headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                out.headers_mut().insert(name, value);
            }
            _ => tracing::warn!(header = %name, "Dropping unrepresentable response header"),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_carries_method_path_and_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-desk-api-key", HeaderValue::from_static("k"));
        let event = to_event(
            &Method::POST,
            &"/mcp?x=1".parse().unwrap(),
            &headers,
            &Bytes::from_static(b"{}"),
        );

        assert_eq!(event["httpMethod"], "POST");
        assert_eq!(event["path"], "/mcp");
        assert_eq!(event["headers"]["x-desk-api-key"], "k");
        assert_eq!(event["body"], "{}");
        assert_eq!(event["isBase64Encoded"], false);
    }

    #[test]
    fn test_binary_body_is_base64() {
        let event = to_event(
            &Method::POST,
            &"/mcp".parse().unwrap(),
            &HeaderMap::new(),
            &Bytes::from_static(&[0xff, 0xfe]),
        );

        assert_eq!(event["isBase64Encoded"], true);
        assert_eq!(event["body"], "//4=");
    }

    #[test]
    fn test_empty_body_is_null() {
        let event = to_event(&Method::GET, &"/health".parse().unwrap(), &HeaderMap::new(), &Bytes::new());
        assert!(event["body"].is_null());
    }
}
