//! Tool trait and related types

use async_trait::async_trait;
use cmc_foundation::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Definition of a tool exposed to the external agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDef {
    /// Tool name (unique identifier)
    pub name: String,

    /// Human-readable description
    pub description: String,

    /// JSON Schema for parameters
    #[serde(rename = "inputSchema")]
    pub parameters: ToolParameters,
}

/// Parameters schema for a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParameters {
    /// Type (usually "object")
    #[serde(rename = "type")]
    pub schema_type: String,

    /// Properties (parameter definitions)
    pub properties: Value,

    /// Required parameters
    #[serde(default)]
    pub required: Vec<String>,
}

impl ToolDef {
    /// Create a new tool definition builder
    pub fn builder(name: impl Into<String>, description: impl Into<String>) -> ToolDefBuilder {
        ToolDefBuilder::new(name, description)
    }
}

/// Builder for ToolDef
pub struct ToolDefBuilder {
    name: String,
    description: String,
    properties: serde_json::Map<String, Value>,
    required: Vec<String>,
}

impl ToolDefBuilder {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            properties: serde_json::Map::new(),
            required: vec![],
        }
    }

    /// Add a string parameter
    pub fn string_param(
        mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        required: bool,
    ) -> Self {
        let name = name.into();
        self.properties.insert(
            name.clone(),
            serde_json::json!({
                "type": "string",
                "description": description.into()
            }),
        );
        if required {
            self.required.push(name);
        }
        self
    }

    /// Add an integer parameter
    pub fn integer_param(
        mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        required: bool,
    ) -> Self {
        let name = name.into();
        self.properties.insert(
            name.clone(),
            serde_json::json!({
                "type": "integer",
                "description": description.into()
            }),
        );
        if required {
            self.required.push(name);
        }
        self
    }

    /// Add an optional integer parameter constrained to `[min, max]`
    pub fn ranged_integer_param(
        mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        min: i64,
        max: i64,
        default: Option<i64>,
    ) -> Self {
        let name = name.into();
        let mut schema = serde_json::json!({
            "type": "integer",
            "description": description.into(),
            "minimum": min,
            "maximum": max
        });
        if let Some(default) = default {
            schema["default"] = serde_json::json!(default);
        }
        self.properties.insert(name, schema);
        self
    }

    /// Add a number parameter
    pub fn number_param(
        mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        required: bool,
    ) -> Self {
        let name = name.into();
        self.properties.insert(
            name.clone(),
            serde_json::json!({
                "type": "number",
                "description": description.into()
            }),
        );
        if required {
            self.required.push(name);
        }
        self
    }

    /// Build the ToolDef
    pub fn build(self) -> ToolDef {
        ToolDef {
            name: self.name,
            description: self.description,
            parameters: ToolParameters {
                schema_type: "object".to_string(),
                properties: Value::Object(self.properties),
                required: self.required,
            },
        }
    }
}

/// A single content block of a tool result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolContent {
    /// Content type, always "text"
    #[serde(rename = "type")]
    pub content_type: String,

    /// The payload or error text
    pub text: String,
}

/// Result of a tool invocation - the only shape that ever crosses the tool
/// boundary. Success and failure share it, distinguished by `is_error`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub content: Vec<ToolContent>,

    #[serde(rename = "isError", default)]
    pub is_error: bool,
}

impl ToolResult {
    /// Wrap a successful payload as pretty-printed JSON text
    pub fn json(value: &Value) -> Self {
        let text =
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
        Self {
            content: vec![ToolContent {
                content_type: "text".to_string(),
                text,
            }],
            is_error: false,
        }
    }

    /// Wrap a failure message
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent {
                content_type: "text".to_string(),
                text: format!("Error: {}", message.into()),
            }],
            is_error: true,
        }
    }

    /// Text of the first content block (convenience accessor)
    pub fn first_text(&self) -> &str {
        self.content.first().map(|c| c.text.as_str()).unwrap_or("")
    }
}

/// Tool trait - implement this to expose a new tool
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool definition
    fn definition(&self) -> ToolDef;

    /// Execute the tool with given parameters.
    ///
    /// Errors returned here never cross the tool boundary directly; the
    /// registry converts them into error `ToolResult`s.
    async fn execute(&self, params: Value) -> Result<Value>;

    /// Get the tool name (convenience method)
    fn name(&self) -> String {
        self.definition().name
    }
}
