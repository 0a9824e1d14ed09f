//! Tool parameter schemas and the schema builder.

use serde::{Deserialize, Serialize};

/// JSON Schema-based parameter definition for a tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentToolParameters {
    /// JSON Schema object describing the parameters.
    pub schema: serde_json::Value,
}

impl AgentToolParameters {
    /// Builder: create an object schema with properties.
    pub fn object() -> ParameterBuilder {
        ParameterBuilder::default()
    }
}

/// Builder for object schemas. Only the property kinds the trip tools
/// declare are offered.
#[derive(Default)]
pub struct ParameterBuilder {
    properties: serde_json::Map<String, serde_json::Value>,
    required: Vec<String>,
}

impl ParameterBuilder {
    fn property(mut self, name: String, schema: serde_json::Value, required: bool) -> Self {
        if required {
            self.required.push(name.clone());
        }
        self.properties.insert(name, schema);
        self
    }

    /// Add a string property.
    pub fn string(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
        required: bool,
    ) -> Self {
        self.property(
            name.into(),
            serde_json::json!({
                "type": "string",
                "description": description.into(),
            }),
            required,
        )
    }

    /// Add an array-of-strings property.
    pub fn string_array(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
        required: bool,
    ) -> Self {
        self.property(
            name.into(),
            serde_json::json!({
                "type": "array",
                "items": { "type": "string" },
                "description": description.into(),
            }),
            required,
        )
    }

    /// Build into AgentToolParameters.
    pub fn build(self) -> AgentToolParameters {
        AgentToolParameters {
            schema: serde_json::json!({
                "type": "object",
                "properties": self.properties,
                "required": self.required,
            }),
        }
    }
}
