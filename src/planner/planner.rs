//! The trip-planning orchestrator.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::WayfinderConfig;
use crate::error::{error_trace, Result};
use crate::forecast::ForecastClient;
use crate::generation::{generate_text, DEFAULT_MAX_TOOL_TURNS};
use crate::provider::{self, ModelProvider};
use crate::tools::tool::{Tool, ToolExecutionContext};
use crate::tools::trip::trip_tools;
use crate::types::{ChatTurn, GenerationSettings, ModelMessage};

use super::session::PlanningSession;

/// One planning request: the user's free-text input plus the prior turns
/// the caller wants threaded into the session. Transient; lives for one
/// call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripRequest {
    pub input: String,
    #[serde(default)]
    pub chat_history: Vec<ChatTurn>,
}

impl TripRequest {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            chat_history: Vec::new(),
        }
    }

    pub fn with_history(mut self, chat_history: Vec<ChatTurn>) -> Self {
        self.chat_history = chat_history;
        self
    }
}

/// Outcome envelope of a planning call. Exactly one of `data`/`error` is
/// populated, matching `success`; the constructors are the only way to
/// build one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PlanResult {
    pub fn success(data: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data.into()),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// Orchestrates trip planning: assembles the prompt, exposes the trip tools
/// to the model, drives the agent-execution loop, and wraps the outcome in
/// a [`PlanResult`].
pub struct TripPlanner {
    provider: Box<dyn ModelProvider>,
    system_prompt: String,
    tools: Vec<Arc<dyn Tool>>,
    settings: GenerationSettings,
    max_tool_turns: usize,
    reference_date: NaiveDate,
}

impl TripPlanner {
    /// Create a planner around an existing provider with no tools
    /// registered. The reference date anchors the system prompt and all
    /// partial-date resolution; pass a fixed date for deterministic tests.
    pub fn new(provider: Box<dyn ModelProvider>, reference_date: NaiveDate) -> Self {
        Self {
            provider,
            system_prompt: build_system_prompt(reference_date),
            tools: Vec::new(),
            settings: GenerationSettings {
                temperature: Some(0.7),
                ..Default::default()
            },
            max_tool_turns: DEFAULT_MAX_TOOL_TURNS,
            reference_date,
        }
    }

    /// Create a fully wired planner from config: OpenAI provider, today's
    /// date as reference, and the three trip tools registered.
    ///
    /// Fails fast when the API credential is missing so startup reports a
    /// configuration problem instead of the first request failing.
    pub fn from_config(config: &WayfinderConfig) -> Result<Self> {
        let provider = provider::create_provider(config)?;
        let reference = Local::now().date_naive();
        let client = Arc::new(ForecastClient::from_config(config));

        let mut planner = Self::new(provider, reference);
        planner.tools = trip_tools(client);
        Ok(planner)
    }

    /// Register an additional tool.
    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.push(tool);
        self
    }

    /// Override generation settings.
    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Override the bound on model/tool round trips per call.
    pub fn with_max_tool_turns(mut self, max_tool_turns: usize) -> Self {
        self.max_tool_turns = max_tool_turns;
        self
    }

    /// The system instruction block, fixed at construction.
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// The reference date this planner resolves partial dates against.
    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    /// Plan a trip: thread the request into the session, run the agent
    /// loop, and return the outcome envelope.
    ///
    /// Never returns an error; any failure in prompt assembly, model
    /// invocation, or answer extraction is captured in the envelope
    /// together with its diagnostic trace.
    pub async fn plan_trip(
        &self,
        session: &mut PlanningSession,
        request: TripRequest,
    ) -> PlanResult {
        session.append_turns(&request.chat_history);

        let mut messages = Vec::with_capacity(session.len() + 2);
        messages.push(ModelMessage::system(self.system_prompt.clone()));
        messages.extend(session.messages().iter().cloned());
        messages.push(ModelMessage::user(request.input.clone()));

        debug!(
            history_len = session.len(),
            tools = self.tools.len(),
            "plan_trip: invoking agent"
        );

        match generate_text(
            self.provider.as_ref(),
            messages,
            self.settings.clone(),
            &self.tools,
            &ToolExecutionContext::new(self.reference_date),
            self.max_tool_turns,
        )
        .await
        {
            Ok(result) => {
                session.push_assistant(result.text.clone());
                PlanResult::success(result.text)
            }
            Err(e) => PlanResult::failure(format!(
                "Error in plan_trip: {e}\n\n{}",
                error_trace(&e)
            )),
        }
    }
}

/// Build the system instruction block, embedding the reference date.
///
/// The date-handling guidance mirrors what the date resolver computes; it
/// is kept as documentation for the model, while the resolver applied at
/// the tool boundary remains the source of truth.
fn build_system_prompt(reference_date: NaiveDate) -> String {
    format!(
        "You are a helpful travel assistant that helps users plan their trips.\n\
         You can provide weather forecasts, find events, and create detailed itineraries.\n\
         Be friendly, informative, and provide useful recommendations.\n\
         \n\
         IMPORTANT DATE HANDLING INSTRUCTIONS:\n\
         - Today is {}\n\
         - When users mention dates without a year, assume they mean the next occurrence of that date.\n\
         - For date ranges that cross into a new year (e.g., December to January), ensure the year transitions correctly.\n\
         - Always confirm the dates you're using for planning to avoid confusion.",
        reference_date.format("%B %d, %Y"),
    )
}
