//! Accessors for tool call arguments.

use serde::de::DeserializeOwned;

use crate::error::WayfinderError;

/// Arguments passed to a tool, as decoded from the model's tool call.
#[derive(Debug, Clone)]
pub struct ToolArguments {
    value: serde_json::Value,
}

impl ToolArguments {
    pub fn new(value: serde_json::Value) -> Self {
        Self { value }
    }

    /// The raw argument value.
    pub fn value(&self) -> &serde_json::Value {
        &self.value
    }

    /// Get a required string field.
    pub fn get_str(&self, key: &str) -> Result<&str, WayfinderError> {
        self.value
            .get(key)
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                WayfinderError::InvalidArgument(format!("missing string argument '{key}'"))
            })
    }

    /// Get an optional string field.
    pub fn get_str_opt(&self, key: &str) -> Option<&str> {
        self.value.get(key).and_then(|v| v.as_str())
    }

    /// Deserialize the arguments into a typed struct.
    ///
    /// Mismatches surface as [`WayfinderError::InvalidArgument`] so tool
    /// dispatch can report them as structured errors rather than panicking.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, WayfinderError> {
        serde_json::from_value(self.value.clone())
            .map_err(|e| WayfinderError::InvalidArgument(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_str_returns_field() {
        let args = ToolArguments::new(serde_json::json!({"location": "Kyoto,Japan"}));
        assert_eq!(args.get_str("location").unwrap(), "Kyoto,Japan");
    }

    #[test]
    fn get_str_rejects_missing_field() {
        let args = ToolArguments::new(serde_json::json!({}));
        assert!(matches!(
            args.get_str("location"),
            Err(WayfinderError::InvalidArgument(_)),
        ));
    }

    #[test]
    fn get_str_opt_returns_none_for_non_string() {
        let args = ToolArguments::new(serde_json::json!({"count": 3}));
        assert_eq!(args.get_str_opt("count"), None);
        assert_eq!(args.get_str_opt("missing"), None);
    }

    #[test]
    fn deserialize_into_typed_struct() {
        #[derive(serde::Deserialize)]
        struct Args {
            location: String,
            date: String,
        }

        let args = ToolArguments::new(serde_json::json!({
            "location": "Paris,France",
            "date": "2024-12-23",
        }));
        let typed: Args = args.deserialize().unwrap();
        assert_eq!(typed.location, "Paris,France");
        assert_eq!(typed.date, "2024-12-23");
    }

    #[test]
    fn deserialize_mismatch_is_invalid_argument() {
        #[derive(serde::Deserialize)]
        #[allow(dead_code)]
        struct Args {
            location: String,
        }

        let args = ToolArguments::new(serde_json::json!({"location": 42}));
        assert!(matches!(
            args.deserialize::<Args>(),
            Err(WayfinderError::InvalidArgument(_)),
        ));
    }
}
