//! Thin MCP client over streamable HTTP.
//!
//! Speaks just enough JSON-RPC to initialize a session, list tools and call
//! them, forwarding the caller's bearer token so the MCP server resolves the
//! same identity the chat caller authenticated with. The server may answer a
//! POST either as plain JSON or as a one-shot SSE stream; both are handled.

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Serialize;
use serde_json::{Value, json};

use crate::chat::ChatError;

const SESSION_HEADER: &str = "mcp-session-id";
const PROTOCOL_VERSION: &str = "2025-03-26";

#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

pub struct McpClient {
    base_url: String,
    http: reqwest::Client,
}

impl McpClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub async fn list_tools(&self, token: &str) -> Result<Vec<ToolDescriptor>, ChatError> {
        let session = self.open_session(token).await?;

        let result = self
            .request(
                token,
                Some(&session),
                &json!({ "jsonrpc": "2.0", "id": 2, "method": "tools/list" }),
            )
            .await?;

        let tools = result["tools"]
            .as_array()
            .map(|arr| {
                arr.iter()
                    .map(|tool| ToolDescriptor {
                        name: tool["name"].as_str().unwrap_or_default().to_string(),
                        description: tool["description"].as_str().unwrap_or_default().to_string(),
                        input_schema: tool["inputSchema"].clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(tools)
    }

    pub async fn call_tool(
        &self,
        token: &str,
        name: &str,
        arguments: Value,
    ) -> Result<Value, ChatError> {
        let session = self.open_session(token).await?;

        self.request(
            token,
            Some(&session),
            &json!({
                "jsonrpc": "2.0",
                "id": 3,
                "method": "tools/call",
                "params": { "name": name, "arguments": arguments }
            }),
        )
        .await
    }

    /// Initialize a fresh session and acknowledge it. Sessions are opened per
    /// call; conversation state lives with the chat caller, not here.
    async fn open_session(&self, token: &str) -> Result<String, ChatError> {
        let init = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "initialize",
            "params": {
                "protocolVersion": PROTOCOL_VERSION,
                "clientInfo": { "name": "vacay-chat", "version": env!("CARGO_PKG_VERSION") },
                "capabilities": {}
            }
        });

        let (session, _) = self.post(token, None, &init).await?;
        let session = session.ok_or_else(|| {
            ChatError::Protocol("MCP server did not return a session id".to_string())
        })?;

        let initialized = json!({ "jsonrpc": "2.0", "method": "notifications/initialized" });
        self.post(token, Some(&session), &initialized).await?;

        Ok(session)
    }

    /// POST a JSON-RPC request and unwrap its `result`.
    async fn request(
        &self,
        token: &str,
        session: Option<&str>,
        body: &Value,
    ) -> Result<Value, ChatError> {
        let (_, response) = self.post(token, session, body).await?;
        let response = response
            .ok_or_else(|| ChatError::Protocol("Empty response from MCP server".to_string()))?;

        if let Some(error) = response.get("error") {
            let message = error["message"].as_str().unwrap_or("unknown error");
            return Err(ChatError::Tool(message.to_string()));
        }

        Ok(response["result"].clone())
    }

    async fn post(
        &self,
        token: &str,
        session: Option<&str>,
        body: &Value,
    ) -> Result<(Option<String>, Option<Value>), ChatError> {
        let mut req = self
            .http
            .post(&self.base_url)
            .header(ACCEPT, "application/json, text/event-stream")
            .bearer_auth(token)
            .json(body);
        if let Some(session) = session {
            req = req.header(SESSION_HEADER, session);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let session_id = resp
            .headers()
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        // Notifications are acknowledged with 202 and no body.
        if status == StatusCode::ACCEPTED {
            return Ok((session_id, None));
        }
        if !status.is_success() {
            return Err(ChatError::Protocol(format!(
                "MCP server returned HTTP {status}"
            )));
        }

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let text = resp.text().await?;

        let value = if content_type.starts_with("text/event-stream") {
            parse_sse_payload(&text)?
        } else {
            serde_json::from_str(&text)
                .map_err(|e| ChatError::Protocol(format!("Malformed JSON response: {e}")))?
        };

        Ok((session_id, Some(value)))
    }
}

/// Pull the first JSON payload out of a one-shot SSE body.
fn parse_sse_payload(body: &str) -> Result<Value, ChatError> {
    for line in body.lines() {
        if let Some(data) = line.strip_prefix("data:") {
            if let Ok(value) = serde_json::from_str(data.trim()) {
                return Ok(value);
            }
        }
    }
    Err(ChatError::Protocol(
        "No JSON payload in event stream".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sse_payload_is_extracted() {
        let body = "event: message\ndata: {\"jsonrpc\":\"2.0\",\"id\":1,\"result\":{\"ok\":true}}\n\n";
        let value = parse_sse_payload(body).unwrap();
        assert_eq!(value["result"]["ok"], true);
    }

    #[test]
    fn sse_without_payload_is_an_error() {
        assert!(parse_sse_payload("event: ping\n\n").is_err());
    }
}
