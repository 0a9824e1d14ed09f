//! OpenAI Chat Completions API provider.

use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, WayfinderError};
use crate::types::*;

use super::http::{bearer_headers, shared_client, status_to_error};
use super::{ModelProvider, ProviderRequest, ProviderResponse};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

pub struct OpenAiProvider {
    model: String,
    api_key: String,
    base_url: String,
}

impl OpenAiProvider {
    pub fn new(model: impl Into<String>, api_key: String, base_url: Option<String>) -> Self {
        Self {
            model: model.into(),
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }

    fn chat_request<'a>(&'a self, request: &'a ProviderRequest) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: request.messages.iter().map(encode_message).collect(),
            max_tokens: request.settings.max_tokens,
            temperature: request.settings.temperature,
            top_p: request.settings.top_p,
            stop: request.settings.stop_sequences.as_deref(),
            tools: request
                .tools
                .as_deref()
                .filter(|tools| !tools.is_empty())
                .map(|tools| {
                    tools
                        .iter()
                        .map(|tool| ChatToolDef {
                            kind: "function",
                            function: ChatFunctionDef {
                                name: &tool.name,
                                description: &tool.description,
                                parameters: &tool.parameters,
                            },
                        })
                        .collect()
                }),
        }
    }
}

#[async_trait]
impl ModelProvider for OpenAiProvider {
    fn provider_name(&self) -> &str {
        "openai"
    }

    fn model_id(&self) -> &str {
        &self.model
    }

    async fn generate_text(&self, request: &ProviderRequest) -> Result<ProviderResponse> {
        let body = self.chat_request(request);
        let url = format!("{}/chat/completions", self.base_url);

        debug!(model = %self.model, "requesting chat completion");

        let resp = shared_client()
            .post(&url)
            .headers(bearer_headers(&self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if status != 200 {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body_text));
        }

        decode_response(resp.json().await?)
    }
}

fn decode_response(data: ChatResponse) -> Result<ProviderResponse> {
    let choice = data
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| WayfinderError::api(200, "No choices in OpenAI response"))?;

    let tool_calls = choice
        .message
        .tool_calls
        .unwrap_or_default()
        .into_iter()
        .map(decode_tool_call)
        .collect();

    // The wire strings use the same snake_case names as FinishReason.
    let finish_reason = choice
        .finish_reason
        .as_deref()
        .and_then(|reason| FinishReason::from_str(reason).ok());

    let usage = data.usage.map_or_else(Usage::default, |u| Usage {
        input_tokens: u.prompt_tokens,
        output_tokens: u.completion_tokens,
        total_tokens: u.total_tokens,
    });

    Ok(ProviderResponse {
        text: choice.message.content.unwrap_or_default(),
        usage,
        tool_calls,
        finish_reason,
    })
}

/// Tool-call arguments arrive as a JSON-encoded string; the raw string is
/// kept when it does not decode.
fn decode_tool_call(call: ChatToolCall) -> AgentToolCall {
    AgentToolCall {
        id: call.id,
        name: call.function.name,
        arguments: serde_json::from_str(&call.function.arguments)
            .unwrap_or(serde_json::Value::String(call.function.arguments)),
    }
}

/// Encode one message in the Chat Completions wire shape.
fn encode_message(message: &ModelMessage) -> serde_json::Value {
    match message.role {
        Role::System => serde_json::json!({
            "role": "system",
            "content": message.text(),
        }),
        Role::User => serde_json::json!({
            "role": "user",
            "content": message.text(),
        }),
        Role::Assistant => {
            let mut value = serde_json::json!({ "role": "assistant" });
            let obj = value.as_object_mut().unwrap();
            let text = message.text();
            if !text.is_empty() {
                obj.insert("content".into(), text.into());
            }
            let tool_calls: Vec<serde_json::Value> = message
                .tool_calls()
                .into_iter()
                .map(encode_tool_call)
                .collect();
            if !tool_calls.is_empty() {
                obj.insert("tool_calls".into(), tool_calls.into());
            }
            value
        }
        Role::Tool => {
            let result = message.content.iter().find_map(|part| match part {
                ContentPart::ToolResult(r) => Some(r),
                _ => None,
            });
            match result {
                Some(r) => serde_json::json!({
                    "role": "tool",
                    "tool_call_id": r.tool_call_id,
                    "content": r.result.to_string(),
                }),
                None => serde_json::json!({
                    "role": "tool",
                    "content": message.text(),
                }),
            }
        }
    }
}

fn encode_tool_call(call: &AgentToolCall) -> serde_json::Value {
    serde_json::json!({
        "id": call.id,
        "type": "function",
        "function": {
            "name": call.name,
            "arguments": call.arguments.to_string(),
        }
    })
}

/// Chat Completions request body.
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<ChatToolDef<'a>>>,
}

#[derive(Serialize)]
struct ChatToolDef<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    function: ChatFunctionDef<'a>,
}

#[derive(Serialize)]
struct ChatFunctionDef<'a> {
    name: &'a str,
    description: &'a str,
    parameters: &'a serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
    tool_calls: Option<Vec<ChatToolCall>>,
}

#[derive(Debug, Deserialize)]
struct ChatToolCall {
    id: String,
    function: ChatFunctionCall,
}

#[derive(Debug, Deserialize)]
struct ChatFunctionCall {
    name: String,
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}
