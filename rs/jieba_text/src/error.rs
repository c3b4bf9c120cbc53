use std::fmt::Display;

use thiserror::Error;

/// Errors that can occur while segmenting, filtering or ranking documents.
///
/// `InvalidInputKind` and `InvalidParameter` abort a whole batch before any
/// document is processed. `SegmentationFailure` is scoped to one document:
/// the batch assembler omits that document and keeps going.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TextError {
    /// The top-level input is neither a string nor an array of strings.
    #[error("InvalidInputKind: {0}")]
    InvalidInputKind(String),

    /// A parameter is out of range or not recognized (`top_k`, `mode`, ...).
    #[error("InvalidParameter: {0}")]
    InvalidParameter(String),

    /// The segmentation engine could not process a document.
    #[error("SegmentationFailure: {0}")]
    SegmentationFailure(String),
}

impl TextError {
    pub fn invalid_input_kind(err: impl Display) -> Self {
        TextError::InvalidInputKind(format!("{err}"))
    }

    pub fn invalid_parameter(err: impl Display) -> Self {
        TextError::InvalidParameter(format!("{err}"))
    }

    pub fn segmentation_failure(err: impl Display) -> Self {
        TextError::SegmentationFailure(format!("{err}"))
    }

    /// Returns the error kind name used on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            TextError::InvalidInputKind(_) => "InvalidInputKind",
            TextError::InvalidParameter(_) => "InvalidParameter",
            TextError::SegmentationFailure(_) => "SegmentationFailure",
        }
    }

    /// Returns the message without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            TextError::InvalidInputKind(msg)
            | TextError::InvalidParameter(msg)
            | TextError::SegmentationFailure(msg) => msg,
        }
    }
}
