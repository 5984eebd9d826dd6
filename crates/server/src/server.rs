//! MCP server over newline-delimited JSON-RPC on stdio.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use serde_json::json;
use tracing::{debug, error, info, warn};

use cmc_tool::ToolRegistry;

use crate::protocol::{error_codes, methods, JsonRpcId, JsonRpcRequest, JsonRpcResponse};

const PROTOCOL_VERSION: &str = "2024-11-05";

pub struct McpServer {
    registry: ToolRegistry,
}

impl McpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    /// Read requests from stdin line by line and write responses to stdout.
    ///
    /// Notifications produce no output. Logging goes to stderr so stdout
    /// stays a clean JSON-RPC stream.
    pub async fn run(&self) -> Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut stdout = stdout.lock();

        info!(tools = self.registry.len(), "server ready, waiting for requests");

        for line in stdin.lock().lines() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    error!("error reading stdin: {}", e);
                    break;
                }
            };

            if line.trim().is_empty() {
                continue;
            }

            let Some(response) = self.handle_line(&line).await else {
                continue;
            };

            let response_json = serde_json::to_string(&response)?;
            debug!("sending: {}", response_json);

            writeln!(stdout, "{}", response_json)?;
            stdout.flush()?;
        }

        info!("stdin closed, shutting down");
        Ok(())
    }

    /// Handle one raw input line. Returns `None` for notifications.
    pub async fn handle_line(&self, input: &str) -> Option<JsonRpcResponse> {
        let request: JsonRpcRequest = match serde_json::from_str(input) {
            Ok(r) => r,
            Err(e) => {
                warn!("failed to parse request: {}", e);
                // Per JSON-RPC 2.0 an undeterminable request id is sent
                // back as an explicit null, not omitted.
                return Some(JsonRpcResponse::error(
                    Some(JsonRpcId::Null),
                    error_codes::PARSE_ERROR,
                    format!("Parse error: {}", e),
                ));
            }
        };

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                request.id,
                error_codes::INVALID_REQUEST,
                "Invalid JSON-RPC version",
            ));
        }

        if request.is_notification() {
            debug!(method = %request.method, "notification, no response");
            return None;
        }

        Some(self.dispatch(request).await)
    }

    async fn dispatch(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        debug!(method = %request.method, "dispatching request");

        match request.method.as_str() {
            methods::INITIALIZE => JsonRpcResponse::success(
                request.id,
                json!({
                    "protocolVersion": PROTOCOL_VERSION,
                    "capabilities": { "tools": {} },
                    "serverInfo": {
                        "name": env!("CARGO_PKG_NAME"),
                        "version": env!("CARGO_PKG_VERSION"),
                    },
                }),
            ),
            methods::TOOLS_LIST => JsonRpcResponse::success(
                request.id,
                json!({ "tools": self.registry.definitions() }),
            ),
            methods::TOOLS_CALL => self.handle_tool_call(request).await,
            other => JsonRpcResponse::error(
                request.id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method not found: {}", other),
            ),
        }
    }

    async fn handle_tool_call(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let params = request.params.unwrap_or_else(|| json!({}));

        let Some(name) = params.get("name").and_then(|v| v.as_str()) else {
            return JsonRpcResponse::error(
                request.id,
                error_codes::INVALID_PARAMS,
                "Missing tool name",
            );
        };

        let arguments = params
            .get("arguments")
            .cloned()
            .unwrap_or_else(|| json!({}));

        let result = self.registry.invoke(name, arguments).await;

        match serde_json::to_value(&result) {
            Ok(value) => JsonRpcResponse::success(request.id, value),
            Err(e) => JsonRpcResponse::error(
                request.id,
                error_codes::INTERNAL_ERROR,
                format!("Failed to serialize tool result: {}", e),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cmc_foundation::Result as ToolOutcome;
    use cmc_tool::{Tool, ToolDef};
    use serde_json::Value;
    use std::sync::Arc;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn definition(&self) -> ToolDef {
            ToolDef::builder("echo", "Echo the input back").build()
        }

        async fn execute(&self, params: Value) -> ToolOutcome<Value> {
            Ok(params)
        }
    }

    fn server_with_echo() -> McpServer {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool));
        McpServer::new(registry)
    }

    #[tokio::test]
    async fn test_initialize_reports_server_info() {
        let server = server_with_echo();

        let resp = server
            .handle_line(r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#)
            .await
            .unwrap();

        let result = resp.result.unwrap();
        assert_eq!(result["serverInfo"]["name"], "cmc-server");
        assert!(result["capabilities"]["tools"].is_object());
    }

    #[tokio::test]
    async fn test_tools_list_includes_registered_tools() {
        let server = server_with_echo();

        let resp = server
            .handle_line(r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#)
            .await
            .unwrap();

        let tools = resp.result.unwrap()["tools"].as_array().unwrap().clone();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0]["name"], "echo");
        assert!(tools[0]["inputSchema"].is_object());
    }

    #[tokio::test]
    async fn test_tool_call_wraps_result() {
        let server = server_with_echo();

        let resp = server
            .handle_line(
                r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"echo","arguments":{"x":1}}}"#,
            )
            .await
            .unwrap();

        let result = resp.result.unwrap();
        assert_eq!(result["isError"], false);
        assert_eq!(result["content"][0]["type"], "text");
    }

    #[tokio::test]
    async fn test_unknown_tool_is_a_tool_error_not_protocol_error() {
        let server = server_with_echo();

        let resp = server
            .handle_line(
                r#"{"jsonrpc":"2.0","id":4,"method":"tools/call","params":{"name":"nope","arguments":{}}}"#,
            )
            .await
            .unwrap();

        assert!(resp.error.is_none());
        let result = resp.result.unwrap();
        assert_eq!(result["isError"], true);
        assert_eq!(result["content"][0]["text"], "Error: Unknown tool: nope");
    }

    #[tokio::test]
    async fn test_missing_tool_name_is_invalid_params() {
        let server = server_with_echo();

        let resp = server
            .handle_line(r#"{"jsonrpc":"2.0","id":5,"method":"tools/call","params":{}}"#)
            .await
            .unwrap();

        assert_eq!(resp.error.unwrap().code, error_codes::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_parse_error_carries_null_id() {
        let server = server_with_echo();

        let resp = server.handle_line("not json").await.unwrap();

        assert_eq!(resp.error.unwrap().code, error_codes::PARSE_ERROR);
        assert_eq!(resp.id, Some(JsonRpcId::Null));
    }

    #[tokio::test]
    async fn test_null_id_request_gets_a_response() {
        let server = server_with_echo();

        let resp = server
            .handle_line(r#"{"jsonrpc":"2.0","id":null,"method":"tools/list"}"#)
            .await
            .expect("null id is a request, not a notification");

        assert_eq!(resp.id, Some(JsonRpcId::Null));
        assert!(resp.result.is_some());
    }

    #[tokio::test]
    async fn test_wrong_version_rejected() {
        let server = server_with_echo();

        let resp = server
            .handle_line(r#"{"jsonrpc":"1.0","id":6,"method":"tools/list"}"#)
            .await
            .unwrap();

        assert_eq!(resp.error.unwrap().code, error_codes::INVALID_REQUEST);
    }

    #[tokio::test]
    async fn test_notification_gets_no_response() {
        let server = server_with_echo();

        let resp = server
            .handle_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await;

        assert!(resp.is_none());
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let server = server_with_echo();

        let resp = server
            .handle_line(r#"{"jsonrpc":"2.0","id":7,"method":"resources/list"}"#)
            .await
            .unwrap();

        assert_eq!(resp.error.unwrap().code, error_codes::METHOD_NOT_FOUND);
    }
}
