//! Tool descriptors advertised to the provider and tool outputs folded back
//! into the transcript.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A tool as advertised in the `functions` catalogue of a completion request.
///
/// Descriptors are static process-lifetime configuration: they are built once
/// when the registry is assembled and never change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Tool name (function name)
    pub name: String,
    /// Human-readable description of what the tool does
    pub description: String,
    /// JSON Schema describing the tool's parameters
    pub parameters: Value,
}

/// Argument payloads that do not satisfy a descriptor's schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    /// Arguments must be a JSON object.
    #[error("arguments must be a JSON object")]
    NotAnObject,

    /// A property listed in `required` is absent.
    #[error("missing required argument '{0}'")]
    MissingRequired(String),
}

impl ToolDescriptor {
    /// Create a new tool descriptor.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }

    /// Descriptor for a tool that takes no arguments.
    pub fn without_parameters(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(
            name,
            description,
            serde_json::json!({
                "type": "object",
                "properties": {}
            }),
        )
    }

    /// Validate that the parameters value is a usable JSON Schema object.
    pub fn validate(&self) -> Result<(), String> {
        let obj = self
            .parameters
            .as_object()
            .ok_or_else(|| "Tool parameters must be a JSON object (schema)".to_string())?;

        if !obj.contains_key("type") {
            return Err("Tool parameters schema must have 'type' field".to_string());
        }

        Ok(())
    }

    /// Names listed under the schema's `required` key.
    pub fn required_parameters(&self) -> Vec<&str> {
        self.parameters
            .get("required")
            .and_then(Value::as_array)
            .map(|req| req.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Whether the tool declares no parameters at all.
    pub fn takes_no_arguments(&self) -> bool {
        self.parameters
            .get("properties")
            .and_then(Value::as_object)
            .map_or(true, |props| props.is_empty())
    }

    /// Check parsed arguments against the object shape and `required` list.
    pub fn check_arguments(&self, arguments: &Value) -> Result<(), ArgumentError> {
        let obj = arguments.as_object().ok_or(ArgumentError::NotAnObject)?;

        for name in self.required_parameters() {
            if !obj.contains_key(name) {
                return Err(ArgumentError::MissingRequired(name.to_string()));
            }
        }

        Ok(())
    }
}

/// What a tool handler produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    /// Plain string result
    Text(String),
    /// Structured result, stringified as compact JSON
    Structured(Value),
}

impl ToolOutput {
    /// Stringify for a function-role transcript entry.
    pub fn into_content(self) -> String {
        match self {
            ToolOutput::Text(text) => text,
            ToolOutput::Structured(Value::String(text)) => text,
            ToolOutput::Structured(value) => value.to_string(),
        }
    }
}

impl From<String> for ToolOutput {
    fn from(text: String) -> Self {
        ToolOutput::Text(text)
    }
}

impl From<&str> for ToolOutput {
    fn from(text: &str) -> Self {
        ToolOutput::Text(text.to_string())
    }
}

impl From<Value> for ToolOutput {
    fn from(value: Value) -> Self {
        ToolOutput::Structured(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn search_descriptor() -> ToolDescriptor {
        ToolDescriptor::new(
            "search_component",
            "Find a component",
            json!({
                "type": "object",
                "properties": {
                    "description": {"type": "string"}
                },
                "required": ["description"]
            }),
        )
    }

    #[test]
    fn test_descriptor_validation() {
        assert!(search_descriptor().validate().is_ok());
        assert!(ToolDescriptor::new("t", "d", json!("nope")).validate().is_err());
        assert!(ToolDescriptor::new("t", "d", json!({"properties": {}}))
            .validate()
            .is_err());
    }

    #[test]
    fn test_check_arguments() {
        let tool = search_descriptor();
        assert!(tool.check_arguments(&json!({"description": "button"})).is_ok());
        assert_eq!(
            tool.check_arguments(&json!({})),
            Err(ArgumentError::MissingRequired("description".to_string()))
        );
        assert_eq!(
            tool.check_arguments(&json!(["button"])),
            Err(ArgumentError::NotAnObject)
        );
    }

    #[test]
    fn test_zero_argument_descriptor() {
        let tool = ToolDescriptor::without_parameters("docs", "Static docs");
        assert!(tool.takes_no_arguments());
        assert!(tool.required_parameters().is_empty());
        assert!(!search_descriptor().takes_no_arguments());
    }

    #[test]
    fn test_descriptor_wire_shape() {
        let json = serde_json::to_value(search_descriptor()).unwrap();
        assert_eq!(json["name"], "search_component");
        assert_eq!(json["parameters"]["required"][0], "description");
        assert_eq!(json.as_object().unwrap().len(), 3);
    }

    #[test]
    fn test_output_stringification() {
        assert_eq!(ToolOutput::from("plain").into_content(), "plain");
        assert_eq!(
            ToolOutput::from(json!({"componentContent": "<Button/>"})).into_content(),
            r#"{"componentContent":"<Button/>"}"#
        );
        assert_eq!(ToolOutput::Structured(json!("quoted")).into_content(), "quoted");
    }
}
