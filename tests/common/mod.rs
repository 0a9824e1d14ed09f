//! Shared test support: a scripted mock provider.
#![allow(dead_code)] // not every test target uses every helper

use std::collections::VecDeque;
use std::sync::Mutex;

use wayfinder::error::Result;
use wayfinder::provider::{ModelProvider, ProviderRequest, ProviderResponse};
use wayfinder::types::{AgentToolCall, FinishReason, Usage};

/// Provider that returns queued responses in FIFO order and records every
/// request it receives.
pub struct MockProvider {
    model_id: String,
    responses: Mutex<VecDeque<ProviderResponse>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl MockProvider {
    pub fn new(model_id: &str) -> Self {
        Self {
            model_id: model_id.to_string(),
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a plain text (final answer) response.
    pub fn queue_response(&self, text: &str) {
        self.responses.lock().unwrap().push_back(ProviderResponse {
            text: text.to_string(),
            usage: Usage::default(),
            tool_calls: Vec::new(),
            finish_reason: Some(FinishReason::Stop),
        });
    }

    /// Queue a response requesting a single tool call.
    pub fn queue_tool_call(&self, id: &str, name: &str, arguments: serde_json::Value) {
        self.responses.lock().unwrap().push_back(ProviderResponse {
            text: String::new(),
            usage: Usage::default(),
            tool_calls: vec![AgentToolCall {
                id: id.to_string(),
                name: name.to_string(),
                arguments,
            }],
            finish_reason: Some(FinishReason::ToolCalls),
        });
    }

    /// Number of requests the provider has served.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<ProviderRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait::async_trait]
impl ModelProvider for MockProvider {
    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn generate_text(&self, request: &ProviderRequest) -> Result<ProviderResponse> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| ProviderResponse {
                text: String::new(),
                usage: Usage::default(),
                tool_calls: Vec::new(),
                finish_reason: Some(FinishReason::Stop),
            }))
    }
}

// Lets tests keep a handle on the provider after handing it to the planner.
#[async_trait::async_trait]
impl ModelProvider for std::sync::Arc<MockProvider> {
    fn provider_name(&self) -> &str {
        self.as_ref().provider_name()
    }

    fn model_id(&self) -> &str {
        self.as_ref().model_id()
    }

    async fn generate_text(&self, request: &ProviderRequest) -> Result<ProviderResponse> {
        self.as_ref().generate_text(request).await
    }
}
