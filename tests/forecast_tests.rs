//! Tests for the geocoding/forecast clients and the weather tool against a
//! mock HTTP server.

mod common;

use std::sync::Arc;

use chrono::NaiveDate;
use common::MockProvider;
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wayfinder::forecast::{ForecastClient, GeoPoint};
use wayfinder::planner::{PlanningSession, TripPlanner, TripRequest};
use wayfinder::tools::tool::ToolExecutionContext;
use wayfinder::tools::trip::weather_lookup_tool;
use wayfinder::tools::ToolArguments;
use wayfinder::types::{ContentPart, Role};

fn reference() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

fn ctx() -> ToolExecutionContext {
    ToolExecutionContext::new(reference())
}

fn geo_body(latitude: f64, longitude: f64) -> serde_json::Value {
    serde_json::json!({
        "results": [{
            "latitude": latitude,
            "longitude": longitude,
            "name": "Paris",
        }]
    })
}

fn forecast_body() -> serde_json::Value {
    serde_json::json!({
        "daily": {
            "time": ["2024-12-23", "2024-12-24"],
            "weathercode": [3, 61],
            "temperature_2m_max": [5.2, 4.0],
            "temperature_2m_min": [-1.0, 0.5],
            "precipitation_sum": [0.4, 0.0],
        }
    })
}

#[tokio::test]
async fn geocode_returns_first_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("name", "Paris,France"))
        .and(query_param("count", "1"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(geo_body(48.85, 2.35)))
        .mount(&server)
        .await;

    let client = ForecastClient::with_base_urls(server.uri(), server.uri());
    let point = client.geocode("Paris,France").await.unwrap().unwrap();

    assert_eq!(point, GeoPoint { latitude: 48.85, longitude: 2.35 });
}

#[tokio::test]
async fn geocode_empty_results_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let client = ForecastClient::with_base_urls(server.uri(), server.uri());
    let point = client.geocode("Atlantis").await.unwrap();

    assert!(point.is_none());
}

#[tokio::test]
async fn daily_forecast_parses_parallel_arrays() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("start_date", "2024-12-23"))
        .and(query_param("end_date", "2024-12-24"))
        .and(query_param("timezone", "auto"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(&server)
        .await;

    let client = ForecastClient::with_base_urls(server.uri(), server.uri());
    let forecast = client
        .daily(
            GeoPoint { latitude: 48.85, longitude: 2.35 },
            NaiveDate::from_ymd_opt(2024, 12, 23).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 24).unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(forecast.time.len(), 2);
    assert_eq!(forecast.temperature_2m_max[0], 5.2);
    assert_eq!(forecast.precipitation_sum[1], 0.0);
}

#[tokio::test]
async fn weather_tool_formats_summary() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(geo_body(48.85, 2.35)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(&server)
        .await;

    let client = Arc::new(ForecastClient::with_base_urls(server.uri(), server.uri()));
    let tool = weather_lookup_tool(client);
    let args = ToolArguments::new(serde_json::json!({
        "location": "Paris,France",
        "start_date": "12/23",
        "end_date": "12/24",
    }));

    let result = tool.execute(&args, &ctx()).await.unwrap();

    let text = result.as_str().unwrap();
    assert!(text.starts_with("Weather forecast for Paris,France:"));
    assert!(text.contains("2024-12-23: High: 5.2°C, Low: -1°C, Precipitation: 0.4mm"));
    assert!(text.contains("2024-12-24"));
}

#[tokio::test]
async fn weather_tool_reports_unknown_location_as_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let client = Arc::new(ForecastClient::with_base_urls(server.uri(), server.uri()));
    let tool = weather_lookup_tool(client);
    let args = ToolArguments::new(serde_json::json!({
        "location": "Atlantis",
        "start_date": "12/23",
        "end_date": "12/24",
    }));

    let result = tool.execute(&args, &ctx()).await.unwrap();

    assert_eq!(result.as_str().unwrap(), "Location 'Atlantis' not found");
}

#[tokio::test]
async fn weather_tool_folds_transport_failures_into_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let client = Arc::new(ForecastClient::with_base_urls(server.uri(), server.uri()));
    let tool = weather_lookup_tool(client);
    let args = ToolArguments::new(serde_json::json!({
        "location": "Paris,France",
        "start_date": "12/23",
        "end_date": "12/24",
    }));

    // Not an Err: the failure is narrated in the tool output.
    let result = tool.execute(&args, &ctx()).await.unwrap();

    let text = result.as_str().unwrap();
    assert!(text.starts_with("Error getting weather data:"));
    assert!(text.contains("500"));
}

#[tokio::test]
async fn unknown_location_flows_back_through_the_model() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let provider = Arc::new(MockProvider::new("test-model"));
    provider.queue_tool_call(
        "call_1",
        "weather_lookup",
        serde_json::json!({
            "location": "Atlantis",
            "start_date": "12/23",
            "end_date": "12/24",
        }),
    );
    provider.queue_response("I couldn't find Atlantis; could you check the spelling?");

    let client = Arc::new(ForecastClient::with_base_urls(server.uri(), server.uri()));
    let planner = TripPlanner::new(Box::new(Arc::clone(&provider)), reference())
        .with_tool(weather_lookup_tool(client));
    let mut session = PlanningSession::new();

    let result = planner
        .plan_trip(&mut session, TripRequest::new("Weather in Atlantis over the holidays?"))
        .await;

    assert!(result.success);

    // The "not found" text reached the model as a non-error tool result.
    let request = provider.last_request().unwrap();
    let tool_msg = request
        .messages
        .iter()
        .find(|m| m.role == Role::Tool)
        .unwrap();
    match &tool_msg.content[0] {
        ContentPart::ToolResult(r) => {
            assert!(!r.is_error);
            assert_eq!(r.result, serde_json::json!("Location 'Atlantis' not found"));
        }
        other => panic!("unexpected content: {other:?}"),
    }
}
