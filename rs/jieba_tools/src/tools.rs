//! Tool definitions advertised to LLM clients.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{Json, config::DispatcherConfig, params::Operation};

/// A tool description with the JSON Schema of its arguments.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Json,
}

fn text_schema() -> Json {
    json!({
        "description": "A single text or an array of texts. Results are keyed by the index of each text.",
        "oneOf": [
            { "type": "string" },
            { "type": "array", "items": { "type": "string" } }
        ]
    })
}

impl ToolDefinition {
    pub fn new(op: Operation, config: &DispatcherConfig) -> Self {
        let (description, input_schema) = match op {
            Operation::Tokenize => (
                "Segment Chinese text into tokens with jieba. Returns {\"<index>\": [token, ...]}.",
                json!({
                    "type": "object",
                    "properties": {
                        "text": text_schema(),
                        "mode": {
                            "type": "string",
                            "enum": ["exact", "search"],
                            "default": config.default_mode.as_str(),
                            "description": "\"exact\" for the minimal token cover, \"search\" to also emit sub-tokens of long words."
                        },
                        "user_dict": {
                            "type": "array",
                            "items": { "type": "string" },
                            "description": "Extra words that must be kept as single tokens."
                        }
                    },
                    "required": ["text"]
                }),
            ),
            Operation::Tag => (
                "Part-of-speech tagging with ICTCLAS flags. Returns {\"<index>\": [{\"word\": ..., \"flag\": ...}, ...]}.",
                json!({
                    "type": "object",
                    "properties": {
                        "text": text_schema()
                    },
                    "required": ["text"]
                }),
            ),
            Operation::ExtractKeywords => (
                "Extract the top-k keywords of each text with single-document BM25-ADPT scoring. Returns {\"<index>\": [keyword, ...]}.",
                json!({
                    "type": "object",
                    "properties": {
                        "text": text_schema(),
                        "top_k": {
                            "type": "integer",
                            "minimum": 1,
                            "default": config.default_top_k,
                            "description": "Number of keywords per text."
                        }
                    },
                    "required": ["text"]
                }),
            ),
        };

        ToolDefinition {
            name: op.as_str().to_string(),
            description: description.to_string(),
            input_schema,
        }
    }
}

/// Returns the definitions of all tools.
pub fn tool_definitions(config: &DispatcherConfig) -> Vec<ToolDefinition> {
    Operation::ALL
        .into_iter()
        .map(|op| ToolDefinition::new(op, config))
        .collect()
}
