//! Model provider trait and the OpenAI implementation.

pub mod http;
pub mod openai;

use async_trait::async_trait;

use crate::config::WayfinderConfig;
use crate::error::{Result, WayfinderError};
use crate::types::{AgentToolCall, FinishReason, GenerationSettings, ModelMessage, Usage};

/// Model used when the caller does not configure one.
pub const DEFAULT_MODEL: &str = "gpt-4-turbo-preview";

/// A request sent to a model provider.
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    pub messages: Vec<ModelMessage>,
    pub settings: GenerationSettings,
    pub tools: Option<Vec<ToolDefinition>>,
}

/// Tool definition sent to the provider API.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// Response from a provider.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub text: String,
    pub usage: Usage,
    pub tool_calls: Vec<AgentToolCall>,
    pub finish_reason: Option<FinishReason>,
}

/// The model's decision for one turn of the agent-execution loop: either a
/// terminal answer or a batch of tool invocations to satisfy first.
#[derive(Debug, Clone)]
pub enum ModelTurn {
    FinalAnswer(String),
    ToolCalls {
        text: String,
        calls: Vec<AgentToolCall>,
    },
}

impl From<ProviderResponse> for ModelTurn {
    fn from(response: ProviderResponse) -> Self {
        if response.tool_calls.is_empty() {
            ModelTurn::FinalAnswer(response.text)
        } else {
            ModelTurn::ToolCalls {
                text: response.text,
                calls: response.tool_calls,
            }
        }
    }
}

/// Core trait implemented by model providers.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &str;

    /// The model ID this provider instance serves.
    fn model_id(&self) -> &str;

    /// Generate text (non-streaming).
    async fn generate_text(&self, request: &ProviderRequest) -> Result<ProviderResponse>;
}

/// Create the configured provider.
///
/// A missing credential fails here, at startup, rather than deep inside a
/// planning request.
pub fn create_provider(config: &WayfinderConfig) -> Result<Box<dyn ModelProvider>> {
    let api_key = config
        .api_key()
        .ok_or_else(|| WayfinderError::Configuration("Missing OPENAI_API_KEY".into()))?;
    let model = config.model().unwrap_or_else(|| DEFAULT_MODEL.to_string());
    Ok(Box::new(openai::OpenAiProvider::new(
        model,
        api_key,
        config.get_base_url("openai"),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_provider_requires_credential() {
        let config = WayfinderConfig::new();
        let err = create_provider(&config).unwrap_err();
        assert!(matches!(err, WayfinderError::Configuration(_)));
    }

    #[test]
    fn create_provider_uses_configured_model() {
        let config = WayfinderConfig::new();
        config.set_api_key("sk-test");
        config.set_model("gpt-4o-mini");

        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.model_id(), "gpt-4o-mini");
        assert_eq!(provider.provider_name(), "openai");
    }

    #[test]
    fn response_without_tool_calls_is_a_final_answer() {
        let response = ProviderResponse {
            text: "done".into(),
            usage: Usage::default(),
            tool_calls: Vec::new(),
            finish_reason: Some(FinishReason::Stop),
        };
        assert!(matches!(
            ModelTurn::from(response),
            ModelTurn::FinalAnswer(text) if text == "done"
        ));
    }

    #[test]
    fn response_with_tool_calls_is_a_tool_turn() {
        let response = ProviderResponse {
            text: String::new(),
            usage: Usage::default(),
            tool_calls: vec![AgentToolCall {
                id: "call_1".into(),
                name: "weather_lookup".into(),
                arguments: serde_json::json!({}),
            }],
            finish_reason: Some(FinishReason::ToolCalls),
        };
        match ModelTurn::from(response) {
            ModelTurn::ToolCalls { calls, .. } => assert_eq!(calls.len(), 1),
            other => panic!("unexpected turn: {other:?}"),
        }
    }
}
