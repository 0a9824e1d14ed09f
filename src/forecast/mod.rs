//! Clients for the geocoding and daily-forecast services (Open-Meteo).

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use crate::config::WayfinderConfig;
use crate::error::Result;
use crate::provider::http::{shared_client, status_to_error};

const GEOCODING_BASE_URL: &str = "https://geocoding-api.open-meteo.com/v1";
const FORECAST_BASE_URL: &str = "https://api.open-meteo.com/v1";

/// Coordinates for a geocoded place name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Daily forecast series, as parallel arrays indexed by day offset.
#[derive(Debug, Clone, Deserialize)]
pub struct DailyForecast {
    pub time: Vec<String>,
    pub temperature_2m_max: Vec<f64>,
    pub temperature_2m_min: Vec<f64>,
    pub precipitation_sum: Vec<f64>,
}

impl DailyForecast {
    /// One human-readable line per forecast day.
    pub fn summary_lines(&self) -> Vec<String> {
        self.time
            .iter()
            .enumerate()
            .map(|(i, day)| {
                format!(
                    "{day}: High: {}°C, Low: {}°C, Precipitation: {}mm",
                    self.temperature_2m_max.get(i).copied().unwrap_or_default(),
                    self.temperature_2m_min.get(i).copied().unwrap_or_default(),
                    self.precipitation_sum.get(i).copied().unwrap_or_default(),
                )
            })
            .collect()
    }
}

/// HTTP client for the two weather-facing external services.
#[derive(Debug, Clone)]
pub struct ForecastClient {
    geocoding_base: String,
    forecast_base: String,
}

impl Default for ForecastClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastClient {
    pub fn new() -> Self {
        Self {
            geocoding_base: GEOCODING_BASE_URL.to_string(),
            forecast_base: FORECAST_BASE_URL.to_string(),
        }
    }

    /// Create a client honoring base-URL overrides from config.
    pub fn from_config(config: &WayfinderConfig) -> Self {
        Self {
            geocoding_base: config
                .get_base_url("geocoding")
                .unwrap_or_else(|| GEOCODING_BASE_URL.to_string()),
            forecast_base: config
                .get_base_url("forecast")
                .unwrap_or_else(|| FORECAST_BASE_URL.to_string()),
        }
    }

    /// Create a client against explicit base URLs (used by tests).
    pub fn with_base_urls(geocoding_base: impl Into<String>, forecast_base: impl Into<String>) -> Self {
        Self {
            geocoding_base: geocoding_base.into(),
            forecast_base: forecast_base.into(),
        }
    }

    /// Resolve a place name to coordinates.
    ///
    /// An empty result set is not an error; it means the location is
    /// unknown to the geocoder and yields `Ok(None)`.
    pub async fn geocode(&self, name: &str) -> Result<Option<GeoPoint>> {
        let url = format!("{}/search", self.geocoding_base);

        debug!(name, "geocoding lookup");

        let resp = shared_client()
            .get(&url)
            .query(&[("name", name), ("count", "1"), ("format", "json")])
            .send()
            .await?;

        let status = resp.status().as_u16();
        if status != 200 {
            let body = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body));
        }

        let data: GeoResponse = resp.json().await?;
        Ok(data
            .results
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(|r| GeoPoint {
                latitude: r.latitude,
                longitude: r.longitude,
            }))
    }

    /// Fetch the daily forecast for a coordinate over a date span.
    pub async fn daily(
        &self,
        point: GeoPoint,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<DailyForecast> {
        let url = format!("{}/forecast", self.forecast_base);

        debug!(
            latitude = point.latitude,
            longitude = point.longitude,
            %start_date,
            %end_date,
            "forecast lookup"
        );

        let resp = shared_client()
            .get(&url)
            .query(&[
                ("latitude", point.latitude.to_string()),
                ("longitude", point.longitude.to_string()),
                ("start_date", start_date.format("%Y-%m-%d").to_string()),
                ("end_date", end_date.format("%Y-%m-%d").to_string()),
                (
                    "daily",
                    "weathercode,temperature_2m_max,temperature_2m_min,precipitation_sum"
                        .to_string(),
                ),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await?;

        let status = resp.status().as_u16();
        if status != 200 {
            let body = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body));
        }

        let data: ForecastResponse = resp.json().await?;
        Ok(data.daily)
    }
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    results: Option<Vec<GeoResult>>,
}

#[derive(Debug, Deserialize)]
struct GeoResult {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: DailyForecast,
}
