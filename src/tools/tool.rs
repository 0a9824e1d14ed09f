//! The tool seam between the planner and the model.

use std::future::Future;
use std::pin::Pin;

use async_trait::async_trait;
use chrono::NaiveDate;

use super::arguments::ToolArguments;
use super::types::AgentToolParameters;
use crate::error::Result;

/// State threaded into every tool invocation.
///
/// Carries the reference date the planner was constructed with; the trip
/// tools resolve partial date arguments against it.
#[derive(Debug, Clone, Copy)]
pub struct ToolExecutionContext {
    pub reference_date: NaiveDate,
}

impl ToolExecutionContext {
    pub fn new(reference_date: NaiveDate) -> Self {
        Self { reference_date }
    }
}

/// A named, schema-typed function the model may elect to invoke.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Name the model addresses the tool by.
    fn name(&self) -> &str;

    /// Description shown to the model alongside the schema.
    fn description(&self) -> &str;

    /// JSON Schema for the arguments.
    fn parameters(&self) -> &AgentToolParameters;

    /// Run the tool against validated arguments.
    async fn execute(
        &self,
        args: &ToolArguments,
        ctx: &ToolExecutionContext,
    ) -> Result<serde_json::Value>;
}

type BoxedHandler = Box<
    dyn Fn(
            ToolArguments,
            ToolExecutionContext,
        ) -> Pin<Box<dyn Future<Output = Result<serde_json::Value>> + Send>>
        + Send
        + Sync,
>;

/// A [`Tool`] built from an async closure.
pub struct AgentTool {
    name: String,
    description: String,
    parameters: AgentToolParameters,
    handler: BoxedHandler,
}

impl AgentTool {
    pub fn new<F, Fut>(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: AgentToolParameters,
        handler: F,
    ) -> Self
    where
        F: Fn(ToolArguments, ToolExecutionContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<serde_json::Value>> + Send + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
            handler: Box::new(move |args, ctx| Box::pin(handler(args, ctx))),
        }
    }
}

#[async_trait]
impl Tool for AgentTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn parameters(&self) -> &AgentToolParameters {
        &self.parameters
    }

    async fn execute(
        &self,
        args: &ToolArguments,
        ctx: &ToolExecutionContext,
    ) -> Result<serde_json::Value> {
        (self.handler)(args.clone(), *ctx).await
    }
}

impl std::fmt::Debug for AgentTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentTool")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}
