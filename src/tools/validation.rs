//! Pre-dispatch validation of tool-call arguments.
//!
//! The model is not guaranteed to produce arguments matching the schema a
//! tool declared. Dispatch checks every call here first, so shape problems
//! surface as one structured violation instead of a panic or an ad hoc
//! message from inside the tool body.

use std::fmt;

use serde_json::Value;

/// First violation found when checking arguments against a tool schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaViolation {
    /// The schema expects an object and the arguments are something else.
    NotAnObject { found: &'static str },
    /// A required field is absent.
    MissingField { field: String },
    /// A declared property carries the wrong JSON type.
    WrongType {
        field: String,
        expected: String,
        found: &'static str,
    },
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnObject { found } => {
                write!(f, "expected object arguments, got {found}")
            }
            Self::MissingField { field } => {
                write!(f, "missing required field '{field}'")
            }
            Self::WrongType {
                field,
                expected,
                found,
            } => {
                write!(f, "field '{field}' expected type '{expected}', got {found}")
            }
        }
    }
}

/// Check arguments against a tool's JSON Schema before dispatch.
///
/// Covers what the trip tool schemas declare: the top-level object shape,
/// required-field presence, and per-property type agreement. Stops at the
/// first violation; nested schemas are not descended into.
pub fn validate_arguments(args: &Value, schema: &Value) -> Result<(), SchemaViolation> {
    let Some(fields) = args.as_object() else {
        if schema.get("type").and_then(Value::as_str) == Some("object") {
            return Err(SchemaViolation::NotAnObject {
                found: type_name(args),
            });
        }
        return Ok(());
    };

    if let Some(required) = schema.get("required").and_then(Value::as_array) {
        for field in required.iter().filter_map(Value::as_str) {
            if !fields.contains_key(field) {
                return Err(SchemaViolation::MissingField {
                    field: field.to_string(),
                });
            }
        }
    }

    let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
        return Ok(());
    };
    for (name, value) in fields {
        let declared = properties
            .get(name)
            .and_then(|prop| prop.get("type"))
            .and_then(Value::as_str);
        if let Some(expected) = declared {
            if !matches_type(value, expected) {
                return Err(SchemaViolation::WrongType {
                    field: name.clone(),
                    expected: expected.to_string(),
                    found: type_name(value),
                });
            }
        }
    }

    Ok(())
}

fn matches_type(value: &Value, expected: &str) -> bool {
    match expected {
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "boolean" => value.is_boolean(),
        "array" => value.is_array(),
        "object" => value.is_object(),
        "null" => value.is_null(),
        _ => true,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn weather_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "location": { "type": "string" },
                "start_date": { "type": "string" },
                "end_date": { "type": "string" },
            },
            "required": ["location", "start_date", "end_date"],
        })
    }

    #[test]
    fn non_object_arguments_are_rejected() {
        let err = validate_arguments(&json!("Paris"), &weather_schema()).unwrap_err();
        assert_eq!(err, SchemaViolation::NotAnObject { found: "string" });
    }

    #[test]
    fn first_missing_required_field_is_reported() {
        let args = json!({ "location": "Paris,France" });
        let err = validate_arguments(&args, &weather_schema()).unwrap_err();
        assert_eq!(
            err,
            SchemaViolation::MissingField {
                field: "start_date".into(),
            },
        );
        assert_eq!(err.to_string(), "missing required field 'start_date'");
    }

    #[test]
    fn complete_arguments_pass() {
        let args = json!({
            "location": "Paris,France",
            "start_date": "12/23",
            "end_date": "1/2",
        });
        assert_eq!(validate_arguments(&args, &weather_schema()), Ok(()));
    }

    #[test]
    fn mistyped_property_is_rejected() {
        let schema = json!({
            "type": "object",
            "properties": { "interests": { "type": "array" } },
            "required": ["interests"],
        });
        let args = json!({ "interests": "museums" });

        let err = validate_arguments(&args, &schema).unwrap_err();
        assert_eq!(
            err,
            SchemaViolation::WrongType {
                field: "interests".into(),
                expected: "array".into(),
                found: "string",
            },
        );
    }

    #[test]
    fn absent_optional_field_passes() {
        let schema = json!({
            "type": "object",
            "properties": {
                "location": { "type": "string" },
                "category": { "type": "string" },
            },
            "required": ["location"],
        });
        let args = json!({ "location": "Lisbon,Portugal" });

        assert_eq!(validate_arguments(&args, &schema), Ok(()));
    }

    #[test]
    fn undeclared_extra_fields_pass() {
        let args = json!({
            "location": "Oslo,Norway",
            "start_date": "7/1",
            "end_date": "7/4",
            "units": "metric",
        });
        assert_eq!(validate_arguments(&args, &weather_schema()), Ok(()));
    }

    #[test]
    fn empty_schema_accepts_anything() {
        assert_eq!(validate_arguments(&json!({ "x": 1 }), &json!({})), Ok(()));
        assert_eq!(validate_arguments(&Value::Null, &json!({})), Ok(()));
    }
}
