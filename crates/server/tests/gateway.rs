use deskgate_server::gateway::{Gateway, HttpResponse};
use deskgate_server::ServerConfig;
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY_A: &str = "tenant-a-secret-0001";
const KEY_B: &str = "tenant-b-secret-0002";

fn gateway(base_url: &str) -> Gateway {
    let mut config = ServerConfig::default();
    config.api.base_url = Some(base_url.to_string());
    config.api.max_retries = 0;
    Gateway::new(&config).unwrap()
}

fn offline_gateway() -> Gateway {
    gateway("https://desk.example.com/api/v1")
}

fn rpc_event(credential: Option<&str>, body: Value) -> Value {
    let mut headers = json!({"Content-Type": "application/json"});
    if let Some(credential) = credential {
        headers["X-Desk-Api-Key"] = json!(credential);
    }
    json!({
        "httpMethod": "POST",
        "path": "/mcp",
        "headers": headers,
        "body": body.to_string(),
    })
}

fn body(response: &HttpResponse) -> Value {
    serde_json::from_str(&response.body).unwrap()
}

fn tool_text(response: &HttpResponse) -> String {
    body(response)["result"]["content"][0]["text"]
        .as_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn test_missing_credential_is_401() {
    let response = offline_gateway()
        .handle(&rpc_event(
            None,
            json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"}),
        ))
        .await;

    assert_eq!(response.status_code, 401);
    let body = body(&response);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    assert_eq!(body["error"]["statusCode"], 401);
}

#[tokio::test]
async fn test_blank_credential_is_401() {
    let response = offline_gateway()
        .handle(&rpc_event(
            Some("   "),
            json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"}),
        ))
        .await;

    assert_eq!(response.status_code, 401);
}

#[tokio::test]
async fn test_health_needs_no_credential() {
    let response = offline_gateway()
        .handle(&json!({"httpMethod": "GET", "path": "/health"}))
        .await;

    assert_eq!(response.status_code, 200);
    assert!(response.body.contains(r#""status":"healthy""#));
}

#[tokio::test]
async fn test_health_and_unknown_paths_never_echo_credential() {
    let gateway = offline_gateway();
    for path in ["/health", "/unknown-path"] {
        let response = gateway
            .handle(&json!({
                "httpMethod": "GET",
                "path": path,
                "headers": {"x-desk-api-key": KEY_A},
            }))
            .await;

        let rendered = serde_json::to_string(&response).unwrap();
        assert!(!rendered.contains(KEY_A), "credential leaked on {path}");
    }
}

#[tokio::test]
async fn test_unknown_tool_is_protocol_error() {
    let response = offline_gateway()
        .handle(&rpc_event(
            Some(KEY_A),
            json!({
                "jsonrpc": "2.0",
                "id": 5,
                "method": "tools/call",
                "params": {"name": "does_not_exist", "arguments": {}},
            }),
        ))
        .await;

    assert_eq!(response.status_code, 200);
    let body = body(&response);
    assert_eq!(body["jsonrpc"], "2.0");
    assert_eq!(body["id"], 5);
    assert_eq!(body["error"]["code"], -32601);
    assert!(body.get("result").is_none());
}

#[tokio::test]
async fn test_unknown_path_is_404() {
    let response = offline_gateway()
        .handle(&json!({"httpMethod": "GET", "path": "/unknown-path"}))
        .await;

    assert_eq!(response.status_code, 404);
    assert_eq!(body(&response)["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_preflight_without_credential() {
    let response = offline_gateway()
        .handle(&json!({"httpMethod": "OPTIONS", "path": "/mcp"}))
        .await;

    assert_eq!(response.status_code, 200);
    assert!(response.body.is_empty());
    assert_eq!(response.header("access-control-allow-origin"), Some("*"));
    assert!(response
        .header("access-control-allow-methods")
        .unwrap()
        .contains("POST"));
}

#[tokio::test]
async fn test_initialize_negotiates_version() {
    let response = offline_gateway()
        .handle(&rpc_event(
            Some(KEY_A),
            json!({
                "jsonrpc": "2.0",
                "id": "init-1",
                "method": "initialize",
                "params": {
                    "protocolVersion": "2024-11-05",
                    "capabilities": {},
                    "clientInfo": {"name": "inspector", "version": "1.0"},
                },
            }),
        ))
        .await;

    assert_eq!(response.status_code, 200);
    let body = body(&response);
    assert_eq!(body["id"], "init-1");
    assert_eq!(body["result"]["protocolVersion"], "2024-11-05");
    assert_eq!(body["result"]["serverInfo"]["name"], "deskgate");
    assert!(body["result"]["capabilities"]["tools"].is_object());
}

#[tokio::test]
async fn test_tools_list_is_idempotent() {
    let gateway = offline_gateway();
    let request = rpc_event(
        Some(KEY_A),
        json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
    );

    let first = gateway.handle(&request).await;
    let second = gateway.handle(&request).await;

    assert_eq!(first.status_code, 200);
    let tools = &body(&first)["result"]["tools"];
    assert_eq!(tools.as_array().unwrap().len(), 14);
    assert_eq!(tools, &body(&second)["result"]["tools"]);
    for tool in tools.as_array().unwrap() {
        assert!(tool["name"].is_string());
        assert_eq!(tool["inputSchema"]["type"], "object");
    }
}

#[tokio::test]
async fn test_unknown_method() {
    let response = offline_gateway()
        .handle(&rpc_event(
            Some(KEY_A),
            json!({"jsonrpc": "2.0", "id": 3, "method": "resources/list"}),
        ))
        .await;

    assert_eq!(response.status_code, 200);
    assert_eq!(body(&response)["error"]["code"], -32601);
}

#[tokio::test]
async fn test_tools_call_without_name_is_invalid_params() {
    let response = offline_gateway()
        .handle(&rpc_event(
            Some(KEY_A),
            json!({"jsonrpc": "2.0", "id": 4, "method": "tools/call", "params": {"arguments": {}}}),
        ))
        .await;

    assert_eq!(response.status_code, 200);
    assert_eq!(body(&response)["error"]["code"], -32602);
}

#[tokio::test]
async fn test_notification_is_204() {
    let response = offline_gateway()
        .handle(&rpc_event(
            Some(KEY_A),
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
        ))
        .await;

    assert_eq!(response.status_code, 204);
    assert!(response.body.is_empty());
}

#[tokio::test]
async fn test_wrong_verb_is_400() {
    let response = offline_gateway()
        .handle(&json!({
            "httpMethod": "GET",
            "path": "/mcp",
            "headers": {"x-desk-api-key": KEY_A},
        }))
        .await;

    assert_eq!(response.status_code, 400);
    assert_eq!(body(&response)["error"]["code"], "METHOD_NOT_ALLOWED");
}

#[tokio::test]
async fn test_malformed_bodies_are_400() {
    let gateway = offline_gateway();

    let not_json = gateway
        .handle(&json!({
            "httpMethod": "POST",
            "path": "/mcp",
            "headers": {"x-desk-api-key": KEY_A, "content-type": "application/json"},
            "body": "{not json",
        }))
        .await;
    assert_eq!(not_json.status_code, 400);
    assert_eq!(body(&not_json)["error"]["code"], "INVALID_BODY");

    let wrong_version = gateway
        .handle(&rpc_event(
            Some(KEY_A),
            json!({"jsonrpc": "1.0", "id": 1, "method": "tools/list"}),
        ))
        .await;
    assert_eq!(wrong_version.status_code, 400);
    assert_eq!(body(&wrong_version)["error"]["code"], "INVALID_REQUEST");

    let missing_id = gateway
        .handle(&rpc_event(
            Some(KEY_A),
            json!({"jsonrpc": "2.0", "method": "tools/list"}),
        ))
        .await;
    assert_eq!(missing_id.status_code, 400);
}

#[tokio::test]
async fn test_malformed_event_is_400() {
    let response = offline_gateway().handle(&json!(["not", "an", "event"])).await;
    assert_eq!(response.status_code, 400);
    assert_eq!(body(&response)["error"]["code"], "MALFORMED_EVENT");
}

#[tokio::test]
async fn test_session_id_is_echoed() {
    let response = offline_gateway()
        .handle(&json!({
            "httpMethod": "POST",
            "path": "/mcp",
            "headers": {"x-desk-api-key": KEY_A, "Mcp-Session-Id": "sess-abc"},
            "body": r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#,
        }))
        .await;

    assert_eq!(response.header("mcp-session-id"), Some("sess-abc"));
}

#[tokio::test]
async fn test_tool_call_reaches_desk_api() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tickets/7"))
        .and(header("Authorization", format!("Bearer {KEY_A}").as_str()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": 7, "subject": "Printer on fire"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = gateway(&server.uri())
        .handle(&rpc_event(
            Some(KEY_A),
            json!({
                "jsonrpc": "2.0",
                "id": 9,
                "method": "tools/call",
                "params": {"name": "get_ticket", "arguments": {"ticket_id": 7}},
            }),
        ))
        .await;

    assert_eq!(response.status_code, 200);
    let text = tool_text(&response);
    assert!(text.contains("Printer on fire"));
    assert!(!response.body.contains(KEY_A));
}

#[tokio::test]
async fn test_downstream_failure_is_internal_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tickets"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database exploded"))
        .mount(&server)
        .await;

    let response = gateway(&server.uri())
        .handle(&rpc_event(
            Some(KEY_A),
            json!({
                "jsonrpc": "2.0",
                "id": 11,
                "method": "tools/call",
                "params": {"name": "list_tickets"},
            }),
        ))
        .await;

    assert_eq!(response.status_code, 200);
    let body = body(&response);
    assert_eq!(body["id"], 11);
    assert_eq!(body["error"]["code"], -32603);
    assert!(!response.body.contains("database exploded"));
}

#[tokio::test]
async fn test_concurrent_tenants_are_isolated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tickets/1"))
        .and(header("Authorization", format!("Bearer {KEY_A}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "subject": "alpha"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tickets/1"))
        .and(header("Authorization", format!("Bearer {KEY_B}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "subject": "bravo"})))
        .mount(&server)
        .await;

    let gateway = gateway(&server.uri());
    let call = |key: &str, id: &str| {
        rpc_event(
            Some(key),
            json!({
                "jsonrpc": "2.0",
                "id": id,
                "method": "tools/call",
                "params": {"name": "get_ticket", "arguments": {"ticket_id": 1}},
            }),
        )
    };
    let (event_a, event_b) = (call(KEY_A, "a"), call(KEY_B, "b"));

    let mut tasks = Vec::new();
    for _ in 0..10 {
        tasks.push(async {
            tokio::join!(gateway.handle(&event_a), gateway.handle(&event_b))
        });
    }

    for (a, b) in futures::future::join_all(tasks).await {
        let (text_a, text_b) = (tool_text(&a), tool_text(&b));
        assert!(text_a.contains("alpha") && !text_a.contains("bravo"));
        assert!(text_b.contains("bravo") && !text_b.contains("alpha"));
        assert_eq!(body(&a)["id"], "a");
        assert_eq!(body(&b)["id"], "b");
        for response in [&a, &b] {
            assert!(!response.body.contains(KEY_A) && !response.body.contains(KEY_B));
        }
    }
}
