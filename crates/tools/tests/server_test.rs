//! End-to-end tests of the JSON-RPC loop over in-memory streams.

use orderup_tools::{Config, ServerKind, ToolServer};
use serde_json::{Value, json};
use tempfile::TempDir;

fn config_for(dir: &TempDir) -> Config {
    Config {
        data_dir: dir.path().join("data"),
        traffic_dir: Some(dir.path().join("traffic")),
        ..Config::default()
    }
}

async fn exchange(server: &ToolServer, requests: &[Value]) -> Vec<Value> {
    let input: String = requests.iter().map(|r| format!("{r}\n")).collect();
    let mut output = Vec::new();
    server
        .serve(input.as_bytes(), &mut output)
        .await
        .expect("serve in-memory streams");
    String::from_utf8(output)
        .expect("utf-8 output")
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line is JSON"))
        .collect()
}

#[tokio::test]
async fn answers_lists_and_calls_in_order() {
    let dir = TempDir::new().expect("temp dir");
    let server = ToolServer::from_config(&config_for(&dir), ServerKind::Orders);

    let responses = exchange(
        &server,
        &[
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize"}),
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
            json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
            json!({"jsonrpc": "2.0", "id": "call-1", "method": "tools/call", "params": {
                "name": "save_order",
                "arguments": {"name": "Alice", "order_details": "Avocado Toast", "estimated_wait_time": "10 minutes"}
            }}),
            json!({"jsonrpc": "2.0", "id": 4, "method": "tools/call", "params": {
                "name": "get_order_status", "arguments": {"order_id": 1}
            }}),
        ],
    )
    .await;

    assert_eq!(responses.len(), 4, "the notification gets no response");
    assert_eq!(responses[0]["result"]["serverInfo"]["name"], json!("orderup-orders"));

    let names: Vec<_> = responses[1]["result"]["tools"]
        .as_array()
        .expect("tool list")
        .iter()
        .map(|t| t["function"]["name"].as_str().expect("tool name").to_string())
        .collect();
    assert_eq!(
        names,
        vec!["save_order", "list_orders", "set_order_status", "get_order_status"]
    );

    assert_eq!(responses[2]["id"], json!("call-1"));
    assert_eq!(responses[2]["result"]["order_id"], json!(1));
    assert_eq!(
        responses[3]["result"],
        json!({"success": true, "order_id": 1, "status": "RECEIVED"})
    );
}

#[tokio::test]
async fn protocol_errors_use_standard_codes() {
    let dir = TempDir::new().expect("temp dir");
    let server = ToolServer::from_config(&config_for(&dir), ServerKind::Pantry);

    let parse_error = server.handle_line("{not json").await.expect("response");
    let parse_error: Value = serde_json::from_str(&parse_error).expect("json");
    assert_eq!(parse_error["error"]["code"], json!(-32700));
    assert_eq!(parse_error["id"], Value::Null);

    let responses = exchange(
        &server,
        &[
            json!({"jsonrpc": "2.0", "id": 1, "method": "resources/list"}),
            json!({"jsonrpc": "2.0", "id": 2, "method": "tools/call", "params": {"name": "launch_rocket"}}),
            json!({"jsonrpc": "2.0", "id": 3, "method": "tools/call", "params": {
                "name": "take_ingredients", "arguments": {"ingredients": "lots"}
            }}),
            json!({"jsonrpc": "2.0", "id": 4, "method": "tools/call"}),
        ],
    )
    .await;

    let codes: Vec<_> = responses.iter().map(|r| r["error"]["code"].clone()).collect();
    assert_eq!(codes, vec![json!(-32601), json!(-32602), json!(-32602), json!(-32602)]);
}

#[tokio::test]
async fn ledger_refusals_are_results_not_errors() {
    let dir = TempDir::new().expect("temp dir");
    let server = ToolServer::from_config(&config_for(&dir), ServerKind::OrderUp);

    let responses = exchange(
        &server,
        &[json!({"jsonrpc": "2.0", "id": 9, "method": "tools/call", "params": {
            "name": "mark_order_delivered", "arguments": {"order_id": 42}
        }})],
    )
    .await;

    assert!(responses[0].get("error").is_none());
    assert_eq!(responses[0]["result"]["success"], json!(false));
}

#[tokio::test]
async fn servers_share_state_through_files() {
    let dir = TempDir::new().expect("temp dir");
    let config = config_for(&dir);
    let chef = ToolServer::from_config(&config, ServerKind::Pantry);
    let supplier = ToolServer::from_config(&config, ServerKind::Pantry);

    supplier
        .call_tool("add_ingredients", json!({"ingredients": {"eggs": 12}}))
        .await
        .expect("restock");
    let taken = chef
        .call_tool("take_ingredients", json!({"ingredients": {"eggs": 4}}))
        .await
        .expect("take");
    assert_eq!(taken["updated_inventory"], json!({"eggs": 8}));

    let seen = supplier
        .call_tool("check_pantry", json!({"ingredient": "eggs"}))
        .await
        .expect("check");
    assert_eq!(seen["eggs"], json!(8));
}

#[tokio::test]
async fn every_handled_request_is_logged() {
    let dir = TempDir::new().expect("temp dir");
    let server = ToolServer::from_config(&config_for(&dir), ServerKind::Menu);

    exchange(
        &server,
        &[
            json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"}),
            json!({"jsonrpc": "2.0", "id": 2, "method": "tools/call", "params": {"name": "list_categories"}}),
        ],
    )
    .await;

    let logged = std::fs::read_dir(dir.path().join("traffic"))
        .expect("traffic dir exists")
        .count();
    assert_eq!(logged, 2);
}
