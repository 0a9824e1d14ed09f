//! Text generation with a bounded tool loop.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::Result;
use crate::provider::{ModelProvider, ModelTurn, ProviderRequest, ToolDefinition};
use crate::tools::arguments::ToolArguments;
use crate::tools::tool::{Tool, ToolExecutionContext};
use crate::tools::validation::validate_arguments;
use crate::types::*;

/// Default bound on model/tool round trips within one generation.
///
/// The loop is deliberately bounded; when the budget runs out the text of
/// the last turn is returned with [`FinishReason::Length`].
pub const DEFAULT_MAX_TOOL_TURNS: usize = 10;

/// One model turn and the tool activity it triggered.
#[derive(Debug, Clone)]
pub struct GenerationStep {
    pub text: String,
    pub tool_calls: Vec<AgentToolCall>,
    pub tool_results: Vec<AgentToolResult>,
    pub usage: Usage,
    pub finish_reason: Option<FinishReason>,
}

/// Result of a generation, including the per-turn steps.
#[derive(Debug, Clone)]
pub struct GenerateTextResult {
    pub text: String,
    pub steps: Vec<GenerationStep>,
    pub messages: Vec<ModelMessage>,
    pub usage: Usage,
    pub finish_reason: Option<FinishReason>,
}

/// Generate text, executing tool calls until the model produces a final
/// answer or the turn budget is exhausted.
///
/// Each provider response is interpreted as a [`ModelTurn`]: a terminal
/// answer returns immediately; a batch of tool calls is validated against
/// each tool's schema, executed, and fed back as tool-result messages.
/// Failures at the tool level become `is_error` results the model can react
/// to, never errors escaping this function.
pub async fn generate_text(
    provider: &dyn ModelProvider,
    mut messages: Vec<ModelMessage>,
    settings: GenerationSettings,
    tools: &[Arc<dyn Tool>],
    ctx: &ToolExecutionContext,
    max_tool_turns: usize,
) -> Result<GenerateTextResult> {
    let tool_defs: Option<Vec<ToolDefinition>> = if tools.is_empty() {
        None
    } else {
        Some(
            tools
                .iter()
                .map(|t| ToolDefinition {
                    name: t.name().to_string(),
                    description: t.description().to_string(),
                    parameters: t.parameters().schema.clone(),
                })
                .collect(),
        )
    };

    let mut steps = Vec::new();
    let mut total_usage = Usage::default();

    for turn in 0..max_tool_turns {
        let request = ProviderRequest {
            messages: messages.clone(),
            settings: settings.clone(),
            tools: tool_defs.clone(),
        };

        debug!(turn, "generate_text: calling provider");
        let response = provider.generate_text(&request).await?;

        total_usage.merge(&response.usage);
        let usage = response.usage;
        let finish_reason = response.finish_reason;

        match ModelTurn::from(response) {
            ModelTurn::FinalAnswer(text) => {
                steps.push(GenerationStep {
                    text: text.clone(),
                    tool_calls: Vec::new(),
                    tool_results: Vec::new(),
                    usage,
                    finish_reason,
                });

                return Ok(GenerateTextResult {
                    text,
                    steps,
                    messages,
                    usage: total_usage,
                    finish_reason,
                });
            }
            ModelTurn::ToolCalls { text, calls } => {
                let mut assistant_content: Vec<ContentPart> = Vec::new();
                if !text.is_empty() {
                    assistant_content.push(ContentPart::Text { text: text.clone() });
                }
                for tc in &calls {
                    assistant_content.push(ContentPart::ToolCall(tc.clone()));
                }
                messages.push(ModelMessage {
                    role: Role::Assistant,
                    content: assistant_content,
                });

                let mut tool_results = Vec::new();
                for tc in &calls {
                    let result = dispatch_tool_call(tc, tools, ctx).await;
                    messages.push(ModelMessage::tool_result(
                        result.tool_call_id.clone(),
                        result.result.clone(),
                        result.is_error,
                    ));
                    tool_results.push(result);
                }

                steps.push(GenerationStep {
                    text,
                    tool_calls: calls,
                    tool_results,
                    usage,
                    finish_reason,
                });
            }
        }
    }

    // Turn budget exhausted before the model settled on an answer.
    warn!(max_tool_turns, "generate_text: tool turn budget exhausted");
    let last_text = steps.last().map(|s| s.text.clone()).unwrap_or_default();
    Ok(GenerateTextResult {
        text: last_text,
        steps,
        messages,
        usage: total_usage,
        finish_reason: Some(FinishReason::Length),
    })
}

/// Execute one tool call, validating its arguments first. All failure modes
/// collapse into an `is_error` result for the model to narrate.
async fn dispatch_tool_call(
    call: &AgentToolCall,
    tools: &[Arc<dyn Tool>],
    ctx: &ToolExecutionContext,
) -> AgentToolResult {
    let tool = match tools.iter().find(|t| t.name() == call.name) {
        Some(tool) => tool,
        None => {
            warn!(tool = %call.name, "Tool not found");
            return AgentToolResult {
                tool_call_id: call.id.clone(),
                result: serde_json::json!({"error": format!("Tool '{}' not found", call.name)}),
                is_error: true,
            };
        }
    };

    if let Err(violation) = validate_arguments(&call.arguments, &tool.parameters().schema) {
        warn!(tool = %call.name, %violation, "Tool arguments rejected");
        return AgentToolResult {
            tool_call_id: call.id.clone(),
            result: serde_json::json!({
                "error": format!("invalid arguments for '{}': {violation}", call.name),
            }),
            is_error: true,
        };
    }

    let args = ToolArguments::new(call.arguments.clone());
    match tool.execute(&args, ctx).await {
        Ok(value) => AgentToolResult {
            tool_call_id: call.id.clone(),
            result: value,
            is_error: false,
        },
        Err(e) => {
            warn!(tool = %call.name, error = %e, "Tool execution failed");
            AgentToolResult {
                tool_call_id: call.id.clone(),
                result: serde_json::json!({"error": e.to_string()}),
                is_error: true,
            }
        }
    }
}
