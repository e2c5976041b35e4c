//! Conversational front end over the MCP tool surface.
//!
//! The orchestrator is stateless: the caller round-trips the conversation
//! history with each request. Each turn sends the history plus the MCP tool
//! catalog to an OpenAI-compatible completions endpoint; if the model asks
//! for tools, they are executed against the MCP server with the caller's own
//! bearer token and the model is consulted once more for the final answer.

pub mod mcp_client;

use chrono::{Datelike, Utc};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;

pub use mcp_client::{McpClient, ToolDescriptor};

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Tool call failed: {0}")]
    Tool(String),

    #[error("Completion API error: {0}")]
    Upstream(String),
}

pub struct ChatService {
    http: reqwest::Client,
    mcp: McpClient,
    api_key: String,
    model: String,
    base_url: String,
    max_messages: usize,
}

impl ChatService {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let api_key = config
            .openai_api_key
            .clone()
            .ok_or_else(|| anyhow::anyhow!("OPENAI_API_KEY must be set for the chat server"))?;

        Ok(Self {
            http: reqwest::Client::new(),
            mcp: McpClient::new(&config.mcp_server_url),
            api_key,
            model: config.openai_model.clone(),
            base_url: config.openai_base_url.trim_end_matches('/').to_string(),
            max_messages: config.max_conversation_messages,
        })
    }

    /// System prompt seeding a new conversation.
    pub fn initial_prompt() -> String {
        let year = Utc::now().date_naive().year();
        format!(
            "You are a helpful HR assistant for vacation management. The current year is {year}. \
             You can look up corporate holidays, check vacation balances, list, create and cancel \
             vacation entries, and calculate business days between dates. Dates are in YYYY-MM-DD \
             format and date ranges are inclusive. Vacation entries are either 'vacation' or \
             'optional_holiday'. Always confirm the dates and type with the user before creating \
             or cancelling an entry. If a tool reports a negative available balance, warn the \
             user that the request exceeds their remaining days."
        )
    }

    pub async fn list_tools(&self, token: &str) -> Result<Vec<ToolDescriptor>, ChatError> {
        self.mcp.list_tools(token).await
    }

    /// Run one conversational turn. `messages` must already contain the
    /// system prompt and the latest user message; the returned history ends
    /// with the assistant's reply.
    pub async fn chat(&self, token: &str, mut messages: Vec<Value>) -> Result<Vec<Value>, ChatError> {
        let tools = self.mcp.list_tools(token).await?;
        let tool_specs: Vec<Value> = tools
            .iter()
            .map(|t| {
                json!({
                    "type": "function",
                    "function": {
                        "name": t.name,
                        "description": t.description,
                        "parameters": t.input_schema,
                    }
                })
            })
            .collect();

        let assistant = self.complete(&messages, Some(&tool_specs)).await?;

        if let Some(tool_calls) = assistant["tool_calls"].as_array().cloned() {
            messages.push(assistant.clone());

            for call in &tool_calls {
                let id = call["id"].as_str().unwrap_or_default();
                let name = call["function"]["name"].as_str().unwrap_or_default();
                let arguments = call["function"]["arguments"]
                    .as_str()
                    .and_then(|raw| serde_json::from_str(raw).ok())
                    .unwrap_or_else(|| json!({}));

                info!(tool = name, "Executing tool call");
                let outcome = match self.mcp.call_tool(token, name, arguments).await {
                    Ok(result) => result,
                    Err(e) => {
                        warn!(tool = name, error = %e, "Tool call failed");
                        json!({ "error": e.to_string() })
                    }
                };

                messages.push(json!({
                    "role": "tool",
                    "tool_call_id": id,
                    "content": outcome.to_string(),
                }));
            }

            // One tool round per turn, then a plain completion for the answer.
            let final_message = self.complete(&messages, None).await?;
            messages.push(json!({
                "role": "assistant",
                "content": final_message["content"].as_str().unwrap_or_default(),
            }));
        } else {
            messages.push(json!({
                "role": "assistant",
                "content": assistant["content"].as_str().unwrap_or_default(),
            }));
        }

        Ok(trim_history(messages, self.max_messages))
    }

    async fn complete(
        &self,
        messages: &[Value],
        tools: Option<&[Value]>,
    ) -> Result<Value, ChatError> {
        let mut body = json!({
            "model": self.model,
            "messages": messages,
        });
        if let Some(tools) = tools {
            if !tools.is_empty() {
                body["tools"] = json!(tools);
                body["tool_choice"] = json!("auto");
            }
        }

        let resp = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            return Err(ChatError::Upstream(format!("HTTP {status}: {detail}")));
        }

        let payload: Value = resp.json().await?;
        let message = payload["choices"][0]["message"].clone();
        if message.is_null() {
            return Err(ChatError::Upstream(
                "Completion response carried no message".to_string(),
            ));
        }

        Ok(message)
    }
}

/// Keep the system prompt plus the most recent messages so long chats stay
/// within the model's context.
fn trim_history(messages: Vec<Value>, max_messages: usize) -> Vec<Value> {
    if messages.len() <= max_messages + 1 {
        return messages;
    }

    let mut trimmed = Vec::with_capacity(max_messages + 1);
    if messages.first().map(|m| m["role"] == "system").unwrap_or(false) {
        trimmed.push(messages[0].clone());
    }
    trimmed.extend(messages[messages.len() - max_messages..].iter().cloned());
    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(role: &str, content: &str) -> Value {
        json!({ "role": role, "content": content })
    }

    #[test]
    fn short_history_is_untouched() {
        let history = vec![message("system", "prompt"), message("user", "hi")];
        assert_eq!(trim_history(history.clone(), 20), history);
    }

    #[test]
    fn long_history_keeps_system_and_tail() {
        let mut history = vec![message("system", "prompt")];
        for i in 0..30 {
            history.push(message("user", &format!("message {i}")));
        }

        let trimmed = trim_history(history, 10);
        assert_eq!(trimmed.len(), 11);
        assert_eq!(trimmed[0]["role"], "system");
        assert_eq!(trimmed[10]["content"], "message 29");
        assert_eq!(trimmed[1]["content"], "message 20");
    }

    #[test]
    fn history_without_system_message_keeps_only_tail() {
        let history: Vec<Value> = (0..30)
            .map(|i| message("user", &format!("message {i}")))
            .collect();

        let trimmed = trim_history(history, 10);
        assert_eq!(trimmed.len(), 10);
        assert_eq!(trimmed[0]["content"], "message 20");
    }

    #[test]
    fn initial_prompt_names_the_current_year() {
        let year = Utc::now().date_naive().year().to_string();
        assert!(ChatService::initial_prompt().contains(&year));
    }
}
