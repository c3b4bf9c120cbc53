//! # Request/Response structures for JSON-based tool calls
//!
//! An LLM client sends a [`ToolCall`] naming one of the tools (`tokenize`,
//! `tag`, `extract_keywords`) with its arguments, and receives a [`Response`]
//! holding either the batch result or a structured error.
use serde::{Deserialize, Serialize};

use crate::{Json, Map, error::ToolError, executor::Executor};

/// A named tool invocation.
///
/// # Example
/// ```json
/// {
///   "name": "extract_keywords",
///   "arguments": {
///     "text": ["我爱北京天安门", "Rust 是一门系统编程语言"],
///     "top_k": 2
///   }
/// }
/// ```
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ToolCall {
    /// The tool name.
    pub name: String,

    /// Tool arguments keyed by parameter name.
    #[serde(default)]
    pub arguments: Map<String, Json>,
}

impl ToolCall {
    pub fn new(name: impl Into<String>, arguments: Json) -> Result<Self, ToolError> {
        let arguments = match arguments {
            Json::Object(map) => map,
            Json::Null => Map::new(),
            other => {
                return Err(ToolError::invalid_parameter(format!(
                    "tool arguments must be an object, got {other}"
                )));
            }
        };
        Ok(ToolCall {
            name: name.into(),
            arguments,
        })
    }

    /// Executes the call and wraps the outcome into a [`Response`].
    pub async fn execute(self, executor: &impl Executor) -> Response {
        executor.execute(self).await.into()
    }
}

/// Response structure of a tool call
///
/// Either `result` or `error` is present, never both.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Response {
    /// Successful response holding the batch result
    Ok { result: Json },

    /// Error response holding structured error details
    Err { error: ErrorObject },
}

impl Response {
    pub fn ok(result: Json) -> Self {
        Self::Ok { result }
    }

    pub fn err(error: impl Into<ErrorObject>) -> Self {
        Self::Err {
            error: error.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }

    pub fn into_result(self) -> Result<Json, ErrorObject> {
        match self {
            Self::Ok { result } => Ok(result),
            Self::Err { error } => Err(error),
        }
    }
}

/// Structured error details for failed calls
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ErrorObject {
    /// Error kind, e.g. "InvalidInputKind", "InvalidParameter", "SegmentationFailure"
    pub name: String,

    /// Human-readable error message
    pub message: String,

    /// Optional additional error data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Json>,
}

impl From<serde_json::Error> for ErrorObject {
    fn from(error: serde_json::Error) -> Self {
        ErrorObject {
            name: "SerializationError".to_string(),
            message: error.to_string(),
            data: None,
        }
    }
}

impl From<ToolError> for ErrorObject {
    fn from(error: ToolError) -> Self {
        let (name, message) = match error {
            ToolError::InvalidInputKind(msg) => ("InvalidInputKind", msg),
            ToolError::InvalidParameter(msg) => ("InvalidParameter", msg),
            ToolError::SegmentationFailure(msg) => ("SegmentationFailure", msg),
            ToolError::UnknownTool(msg) => ("UnknownTool", msg),
            ToolError::Serialization(msg) => ("SerializationError", msg),
        };

        ErrorObject {
            name: name.to_string(),
            message,
            data: None,
        }
    }
}

impl From<ToolError> for Response {
    fn from(error: ToolError) -> Self {
        Response::Err {
            error: error.into(),
        }
    }
}

impl<E> From<Result<Json, E>> for Response
where
    E: Into<ErrorObject>,
{
    fn from(result: Result<Json, E>) -> Self {
        match result {
            Ok(result) => Response::Ok { result },
            Err(err) => Response::Err { error: err.into() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_call_serde() {
        let call: ToolCall = serde_json::from_value(json!({
            "name": "tokenize",
            "arguments": {"text": "我爱北京天安门", "mode": "search"}
        }))
        .unwrap();
        assert_eq!(call.name, "tokenize");
        assert_eq!(call.arguments.get("mode"), Some(&json!("search")));

        let call: ToolCall = serde_json::from_value(json!({"name": "tag"})).unwrap();
        assert!(call.arguments.is_empty());
    }

    #[test]
    fn test_tool_call_new() {
        let call = ToolCall::new("tag", json!({"text": "a"})).unwrap();
        assert_eq!(call.arguments.len(), 1);
        assert!(ToolCall::new("tag", Json::Null).unwrap().arguments.is_empty());
        assert!(matches!(
            ToolCall::new("tag", json!(["a"])),
            Err(ToolError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_response() {
        let res = Response::ok(json!({"0": ["我"]}));
        assert!(res.is_ok());
        assert_eq!(
            serde_json::to_string(&res).unwrap(),
            r#"{"result":{"0":["我"]}}"#
        );
        assert_eq!(
            res,
            serde_json::from_str(r#"{"result":{"0":["我"]}}"#).unwrap()
        );

        let res = Response::from(ToolError::invalid_parameter("top_k must be a positive integer"));
        assert!(!res.is_ok());
        assert_eq!(
            serde_json::to_string(&res).unwrap(),
            r#"{"error":{"name":"InvalidParameter","message":"top_k must be a positive integer"}}"#
        );

        let res = Response::err(ErrorObject {
            name: "TestError".to_string(),
            message: "An error occurred".to_string(),
            data: Some(json!("Additional info")),
        });
        assert_eq!(
            serde_json::to_string(&res).unwrap(),
            r#"{"error":{"name":"TestError","message":"An error occurred","data":"Additional info"}}"#
        );
        let err = res.into_result().unwrap_err();
        assert_eq!(err.name, "TestError");
    }

    #[test]
    fn test_error_names() {
        for (err, name) in [
            (ToolError::invalid_input_kind("x"), "InvalidInputKind"),
            (ToolError::invalid_parameter("x"), "InvalidParameter"),
            (
                ToolError::SegmentationFailure("x".to_string()),
                "SegmentationFailure",
            ),
            (ToolError::unknown_tool("x"), "UnknownTool"),
            (ToolError::serialization("x"), "SerializationError"),
        ] {
            let obj: ErrorObject = err.into();
            assert_eq!(obj.name, name);
            assert_eq!(obj.message, "x");
        }
    }
}
