//! The trip-planning tools exposed to the model.
//!
//! `weather_lookup` is backed by the geocoding and forecast services;
//! `event_lookup` and `itinerary_draft` are deterministic stubs that can be
//! swapped for real backends without touching the surrounding protocol.
//! Tool date arguments are run through [`crate::dates::resolve`] against the
//! reference date in the execution context, so partial dates coming back
//! from the model still land on concrete calendar days.

use std::sync::Arc;

use serde::Deserialize;
use tracing::warn;

use crate::dates;
use crate::forecast::ForecastClient;
use crate::tools::tool::{AgentTool, Tool, ToolExecutionContext};
use crate::tools::types::AgentToolParameters;

#[derive(Debug, Deserialize)]
struct WeatherArgs {
    location: String,
    start_date: String,
    end_date: String,
}

#[derive(Debug, Deserialize)]
struct EventArgs {
    location: String,
    date: String,
    category: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ItineraryArgs {
    destination: String,
    start_date: String,
    end_date: String,
    interests: Vec<String>,
    budget: String,
}

/// Create the `weather_lookup` tool.
///
/// Geocodes the location, fetches the daily forecast for the span, and
/// formats a multi-line summary. Lookup and transport failures are folded
/// into the returned text so the model can narrate them; they are never
/// raised out of the tool.
pub fn weather_lookup_tool(client: Arc<ForecastClient>) -> Arc<dyn Tool> {
    Arc::new(AgentTool::new(
        "weather_lookup",
        "Get the weather forecast for a location and date range",
        AgentToolParameters::object()
            .string("location", "City and country (e.g., 'Paris,France')", true)
            .string("start_date", "Start date in YYYY-MM-DD format", true)
            .string("end_date", "End date in YYYY-MM-DD format", true)
            .build(),
        move |args, ctx: ToolExecutionContext| {
            let client = Arc::clone(&client);
            async move {
                let params: WeatherArgs = args.deserialize()?;
                let start = dates::resolve(&params.start_date, ctx.reference_date);
                let end = dates::resolve(&params.end_date, ctx.reference_date);

                let point = match client.geocode(&params.location).await {
                    Ok(Some(point)) => point,
                    Ok(None) => {
                        return Ok(serde_json::Value::String(format!(
                            "Location '{}' not found",
                            params.location
                        )));
                    }
                    Err(e) => {
                        warn!(location = %params.location, error = %e, "geocoding failed");
                        return Ok(serde_json::Value::String(format!(
                            "Error getting weather data: {e}"
                        )));
                    }
                };

                match client.daily(point, start, end).await {
                    Ok(forecast) => {
                        let mut summary =
                            format!("Weather forecast for {}:\n", params.location);
                        summary.push_str(&forecast.summary_lines().join("\n"));
                        Ok(serde_json::Value::String(summary))
                    }
                    Err(e) => {
                        warn!(location = %params.location, error = %e, "forecast failed");
                        Ok(serde_json::Value::String(format!(
                            "Error getting weather data: {e}"
                        )))
                    }
                }
            }
        },
    ))
}

/// Create the `event_lookup` tool.
///
/// Returns a fixed list of generic activities. A real events API can
/// replace the body without changing the tool contract.
pub fn event_lookup_tool() -> Arc<dyn Tool> {
    Arc::new(AgentTool::new(
        "event_lookup",
        "Find events in a location on a specific date",
        AgentToolParameters::object()
            .string("location", "City and country (e.g., 'Paris,France')", true)
            .string("date", "Date in YYYY-MM-DD format", true)
            .string("category", "Event category (e.g., 'music', 'sports')", false)
            .build(),
        |args, ctx: ToolExecutionContext| async move {
            let params: EventArgs = args.deserialize()?;
            let date = dates::resolve(&params.date, ctx.reference_date);

            let last_line = match params.category.as_deref() {
                Some(category) if !category.is_empty() => {
                    format!("{} event", capitalize(category))
                }
                _ => "Local market".to_string(),
            };

            Ok(serde_json::Value::String(format!(
                "Events in {} on {}:\n- Local festival\n- Museum exhibition\n- Guided city tour\n- {}",
                params.location, date, last_line
            )))
        },
    ))
}

/// Create the `itinerary_draft` tool.
///
/// Produces a fixed-shape skeleton itinerary; the model fleshes it out in
/// its final answer.
pub fn itinerary_draft_tool() -> Arc<dyn Tool> {
    Arc::new(AgentTool::new(
        "itinerary_draft",
        "Create a travel itinerary based on destination, dates, interests, and budget",
        AgentToolParameters::object()
            .string("destination", "Travel destination", true)
            .string("start_date", "Start date in YYYY-MM-DD format", true)
            .string("end_date", "End date in YYYY-MM-DD format", true)
            .string_array("interests", "Traveler interests", true)
            .string("budget", "Trip budget (e.g., 'moderate', '$2000')", true)
            .build(),
        |args, ctx: ToolExecutionContext| async move {
            let params: ItineraryArgs = args.deserialize()?;
            let start = dates::resolve(&params.start_date, ctx.reference_date);
            let end = dates::resolve(&params.end_date, ctx.reference_date);

            Ok(serde_json::Value::String(format!(
                "Suggested itinerary for {} from {} to {}:\n\
                 - Day 1: Arrival and city orientation\n\
                 - Day 2: Visit main attractions\n\
                 - Day 3: Day trip to nearby locations\n\
                 - Day 4: Local experiences\n\
                 - Day 5: Departure\n\
                 \n\
                 Interests: {}\n\
                 Budget: {}",
                params.destination,
                start,
                end,
                params.interests.join(", "),
                params.budget,
            )))
        },
    ))
}

/// All trip-planning tools, bound to a forecast client.
pub fn trip_tools(client: Arc<ForecastClient>) -> Vec<Arc<dyn Tool>> {
    vec![
        weather_lookup_tool(client),
        event_lookup_tool(),
        itinerary_draft_tool(),
    ]
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
