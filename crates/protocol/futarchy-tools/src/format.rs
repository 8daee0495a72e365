//! Per-runtime renderers for the canonical definitions.
//!
//! The set of runtimes is closed, so each is a variant rather than a trait
//! implementation. All formats share one JSON Schema body and differ only
//! in the envelope and in whether parameter defaults are included.

use serde_json::{json, Map, Value};

use crate::definitions::{all_tools, ToolDefinition, ToolParameter};

/// Agent runtime a definition is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolFormat {
    /// `{name, description, input_schema}`
    Anthropic,
    /// `{type: "function", function: {name, description, parameters}}`
    OpenAi,
    /// `{name, description, inputSchema}`
    Mcp,
    /// `{name, description, schema}`
    LangChain,
}

impl ToolFormat {
    pub const ALL: [ToolFormat; 4] = [
        ToolFormat::Anthropic,
        ToolFormat::OpenAi,
        ToolFormat::Mcp,
        ToolFormat::LangChain,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anthropic => "anthropic",
            Self::OpenAi => "openai",
            Self::Mcp => "mcp",
            Self::LangChain => "langchain",
        }
    }

    /// Whether parameter defaults appear in the schema.
    pub fn includes_defaults(&self) -> bool {
        matches!(self, Self::OpenAi | Self::LangChain)
    }

    /// Render one definition.
    pub fn render(&self, tool: &ToolDefinition) -> Value {
        let schema = input_schema(tool, self.includes_defaults());
        match self {
            Self::Anthropic => json!({
                "name": tool.name.as_str(),
                "description": tool.description,
                "input_schema": schema,
            }),
            Self::OpenAi => json!({
                "type": "function",
                "function": {
                    "name": tool.name.as_str(),
                    "description": tool.description,
                    "parameters": schema,
                },
            }),
            Self::Mcp => json!({
                "name": tool.name.as_str(),
                "description": tool.description,
                "inputSchema": schema,
            }),
            Self::LangChain => json!({
                "name": tool.name.as_str(),
                "description": tool.description,
                "schema": schema,
            }),
        }
    }

    /// Render every tool.
    pub fn render_all(&self) -> Vec<Value> {
        all_tools().iter().map(|t| self.render(t)).collect()
    }
}

impl std::fmt::Display for ToolFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ToolFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "anthropic" | "claude" => Ok(Self::Anthropic),
            "openai" => Ok(Self::OpenAi),
            "mcp" => Ok(Self::Mcp),
            "langchain" => Ok(Self::LangChain),
            other => Err(format!(
                "unknown tool format '{}' (expected anthropic, openai, mcp or langchain)",
                other
            )),
        }
    }
}

/// JSON Schema object for a tool's parameters.
pub fn input_schema(tool: &ToolDefinition, with_defaults: bool) -> Value {
    let properties: Map<String, Value> = tool
        .parameters
        .iter()
        .map(|p| (p.name.to_string(), property(p, with_defaults)))
        .collect();

    json!({
        "type": "object",
        "properties": properties,
        "required": tool.required(),
    })
}

fn property(param: &ToolParameter, with_defaults: bool) -> Value {
    let mut schema = Map::new();
    schema.insert("type".into(), json!(param.kind.as_str()));
    schema.insert("description".into(), json!(param.description));
    if let Some(values) = param.enum_values {
        schema.insert("enum".into(), json!(values));
    }
    if with_defaults {
        if let Some(default) = &param.default {
            schema.insert("default".into(), default.clone());
        }
    }
    Value::Object(schema)
}
