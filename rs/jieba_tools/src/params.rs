//! Tool names and validated tool parameters.

use jieba_text::{CustomTerms, SegmentMode, TextInput};
use std::{fmt, str::FromStr};

use crate::{Json, Map, config::DispatcherConfig, error::ToolError};

/// The operations exposed as tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Tokenize,
    Tag,
    ExtractKeywords,
}

impl Operation {
    pub const ALL: [Operation; 3] = [
        Operation::Tokenize,
        Operation::Tag,
        Operation::ExtractKeywords,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Tokenize => "tokenize",
            Operation::Tag => "tag",
            Operation::ExtractKeywords => "extract_keywords",
        }
    }
}

impl FromStr for Operation {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| ToolError::unknown_tool(format!("no tool named {s:?}")))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of `tokenize`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizeParams {
    pub text: TextInput,
    pub mode: SegmentMode,
    pub user_dict: CustomTerms,
}

/// Parameters of `tag`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagParams {
    pub text: TextInput,
}

/// Parameters of `extract_keywords`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractKeywordsParams {
    pub text: TextInput,
    pub top_k: usize,
}

impl TokenizeParams {
    pub fn from_arguments(
        args: &Map<String, Json>,
        config: &DispatcherConfig,
    ) -> Result<Self, ToolError> {
        Ok(TokenizeParams {
            text: required_text(args)?,
            mode: optional_mode(args, config.default_mode)?,
            user_dict: optional_user_dict(args)?,
        })
    }
}

impl TagParams {
    pub fn from_arguments(args: &Map<String, Json>) -> Result<Self, ToolError> {
        Ok(TagParams {
            text: required_text(args)?,
        })
    }
}

impl ExtractKeywordsParams {
    pub fn from_arguments(
        args: &Map<String, Json>,
        config: &DispatcherConfig,
    ) -> Result<Self, ToolError> {
        Ok(ExtractKeywordsParams {
            text: required_text(args)?,
            top_k: optional_top_k(args, config.default_top_k)?,
        })
    }
}

/// Absent and `null` arguments both fall back to the default.
fn present<'a>(args: &'a Map<String, Json>, key: &str) -> Option<&'a Json> {
    args.get(key).filter(|v| !v.is_null())
}

fn required_text(args: &Map<String, Json>) -> Result<TextInput, ToolError> {
    let value = args
        .get("text")
        .ok_or_else(|| ToolError::invalid_parameter("missing required argument \"text\""))?;
    Ok(TextInput::try_from(value)?)
}

fn optional_mode(args: &Map<String, Json>, default: SegmentMode) -> Result<SegmentMode, ToolError> {
    match present(args, "mode") {
        None => Ok(default),
        Some(Json::String(mode)) => Ok(mode.parse()?),
        Some(other) => Err(ToolError::invalid_parameter(format!(
            "mode must be \"exact\" or \"search\", got {other}"
        ))),
    }
}

fn optional_user_dict(args: &Map<String, Json>) -> Result<CustomTerms, ToolError> {
    match present(args, "user_dict") {
        None => Ok(CustomTerms::default()),
        Some(Json::Array(items)) => {
            let words = items
                .iter()
                .map(|item| {
                    item.as_str().ok_or_else(|| {
                        ToolError::invalid_parameter(format!(
                            "user_dict entries must be strings, got {item}"
                        ))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(CustomTerms::new(words))
        }
        Some(other) => Err(ToolError::invalid_parameter(format!(
            "user_dict must be an array of strings, got {other}"
        ))),
    }
}

fn optional_top_k(args: &Map<String, Json>, default: usize) -> Result<usize, ToolError> {
    let Some(value) = present(args, "top_k") else {
        return Ok(default);
    };

    match value.as_u64() {
        Some(k) if k > 0 => Ok(usize::try_from(k).unwrap_or(usize::MAX)),
        _ => Err(ToolError::invalid_parameter(format!(
            "top_k must be a positive integer, got {value}"
        ))),
    }
}
