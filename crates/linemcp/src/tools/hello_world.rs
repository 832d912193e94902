//! Hello World Tool
//!
//! Reference tool: greets the caller by name.

use serde_json::{Map, Value};

use crate::protocol::messages::{CallToolResult, ToolDescription};
use crate::protocol::params;
use crate::registry::ToolError;

pub const NAME: &str = "hello_world";

/// Used when `name` is missing or not a string.
pub const DEFAULT_NAME: &str = "World";

/// Input schema for hello_world tool
pub fn schema() -> Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "name": {
                "type": "string",
                "description": "Your name"
            }
        }
    })
}

pub fn description() -> ToolDescription {
    ToolDescription {
        name: NAME.to_string(),
        description: "A simple hello world function".to_string(),
        input_schema: schema(),
    }
}

pub fn execute(arguments: &Map<String, Value>) -> Result<CallToolResult, ToolError> {
    let name = params::string_or(arguments, "name", DEFAULT_NAME).value;
    Ok(CallToolResult::text(format!("Hello, {}!", name)))
}
