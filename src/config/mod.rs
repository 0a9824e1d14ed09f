//! Configuration loaded from the environment (with `.env` support).

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Runtime configuration for Wayfinder.
///
/// Values set explicitly take precedence over what [`from_env`] loaded.
/// The per-service base URLs exist so tests can point the model, geocoding,
/// and forecast clients at local mock servers.
///
/// [`from_env`]: WayfinderConfig::from_env
#[derive(Debug, Clone, Default)]
pub struct WayfinderConfig {
    values: Arc<RwLock<ConfigValues>>,
}

#[derive(Debug, Default)]
struct ConfigValues {
    openai_api_key: Option<String>,
    model: Option<String>,
    base_urls: HashMap<String, String>,
}

impl WayfinderConfig {
    /// Create an empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from the environment, reading a `.env` file first when present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let config = Self::new();

        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            config.set_api_key(key);
        }
        if let Ok(model) = std::env::var("WAYFINDER_MODEL") {
            config.set_model(model);
        }
        for (var, service) in [
            ("OPENAI_BASE_URL", "openai"),
            ("WAYFINDER_GEOCODING_URL", "geocoding"),
            ("WAYFINDER_FORECAST_URL", "forecast"),
        ] {
            if let Ok(url) = std::env::var(var) {
                config.set_base_url(service, url);
            }
        }

        config
    }

    pub fn set_api_key(&self, key: impl Into<String>) {
        self.values.write().unwrap().openai_api_key = Some(key.into());
    }

    /// The model-endpoint credential, when one is configured.
    pub fn api_key(&self) -> Option<String> {
        self.values.read().unwrap().openai_api_key.clone()
    }

    /// Whether the model-endpoint credential is present.
    pub fn has_credentials(&self) -> bool {
        self.values.read().unwrap().openai_api_key.is_some()
    }

    pub fn set_model(&self, model: impl Into<String>) {
        self.values.write().unwrap().model = Some(model.into());
    }

    /// Model ID override, when one was configured.
    pub fn model(&self) -> Option<String> {
        self.values.read().unwrap().model.clone()
    }

    pub fn set_base_url(&self, service: &str, url: impl Into<String>) {
        self.values
            .write()
            .unwrap()
            .base_urls
            .insert(service.to_string(), url.into());
    }

    pub fn get_base_url(&self, service: &str) -> Option<String> {
        self.values.read().unwrap().base_urls.get(service).cloned()
    }
}
