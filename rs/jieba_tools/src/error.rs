//! # Tool call error types

use std::fmt::Display;

use jieba_text::TextError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    #[error("InvalidInputKind: {0}")]
    InvalidInputKind(String),

    #[error("InvalidParameter: {0}")]
    InvalidParameter(String),

    #[error("SegmentationFailure: {0}")]
    SegmentationFailure(String),

    #[error("UnknownTool: {0}")]
    UnknownTool(String),

    #[error("SerializationError: {0}")]
    Serialization(String),
}

impl ToolError {
    pub fn invalid_input_kind(err: impl Display) -> Self {
        ToolError::InvalidInputKind(format!("{err}"))
    }

    pub fn invalid_parameter(err: impl Display) -> Self {
        ToolError::InvalidParameter(format!("{err}"))
    }

    pub fn unknown_tool(err: impl Display) -> Self {
        ToolError::UnknownTool(format!("{err}"))
    }

    pub fn serialization(err: impl Display) -> Self {
        ToolError::Serialization(format!("{err}"))
    }
}

impl From<TextError> for ToolError {
    fn from(err: TextError) -> Self {
        match err {
            TextError::InvalidInputKind(msg) => ToolError::InvalidInputKind(msg),
            TextError::InvalidParameter(msg) => ToolError::InvalidParameter(msg),
            TextError::SegmentationFailure(msg) => ToolError::SegmentationFailure(msg),
        }
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        ToolError::serialization(err)
    }
}
