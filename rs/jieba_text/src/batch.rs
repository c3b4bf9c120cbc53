//! Document batches
//!
//! Normalizes a single text or an array of texts into indexed [`Document`]s,
//! processes them independently and assembles the per-document results back
//! in input order.

use rayon::prelude::*;
use serde::{Deserialize, Serialize, Serializer, ser::SerializeMap};
use serde_json::Value;

use crate::error::TextError;

/// One input text and its position in the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    index: usize,
    text: String,
}

impl Document {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Document {
            index,
            text: text.into(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Tool input: either one text or an ordered list of texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextInput {
    Single(String),
    Batch(Vec<String>),
}

impl TextInput {
    /// Splits the input into documents indexed `0..N` in input order.
    pub fn documents(&self) -> Vec<Document> {
        match self {
            TextInput::Single(text) => vec![Document::new(0, text.as_str())],
            TextInput::Batch(texts) => texts
                .iter()
                .enumerate()
                .map(|(i, text)| Document::new(i, text.as_str()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            TextInput::Single(_) => 1,
            TextInput::Batch(texts) => texts.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<&str> for TextInput {
    fn from(text: &str) -> Self {
        TextInput::Single(text.to_string())
    }
}

impl From<String> for TextInput {
    fn from(text: String) -> Self {
        TextInput::Single(text)
    }
}

impl From<Vec<String>> for TextInput {
    fn from(texts: Vec<String>) -> Self {
        TextInput::Batch(texts)
    }
}

impl From<Vec<&str>> for TextInput {
    fn from(texts: Vec<&str>) -> Self {
        TextInput::Batch(texts.into_iter().map(str::to_owned).collect())
    }
}

impl TryFrom<&Value> for TextInput {
    type Error = TextError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(text) => Ok(TextInput::Single(text.clone())),
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| match item {
                    Value::String(text) => Ok(text.clone()),
                    other => Err(TextError::invalid_input_kind(format!(
                        "text[{i}] must be a string, got {}",
                        json_kind(other)
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(TextInput::Batch),
            other => Err(TextError::invalid_input_kind(format!(
                "text must be a string or an array of strings, got {}",
                json_kind(other)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Per-document results keyed by document index, in input order.
///
/// Serializes as a JSON object whose keys are the stringified indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResult<T> {
    entries: Vec<(usize, T)>,
}

impl<T> Default for BatchResult<T> {
    fn default() -> Self {
        BatchResult {
            entries: Vec::new(),
        }
    }
}

impl<T> BatchResult<T> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the result of the document at `index`, if it was not omitted.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.entries
            .binary_search_by_key(&index, |(i, _)| *i)
            .ok()
            .map(|pos| &self.entries[pos].1)
    }

    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|(i, _)| *i)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.entries.iter().map(|(i, v)| (*i, v))
    }

    pub fn into_entries(self) -> Vec<(usize, T)> {
        self.entries
    }
}

impl<T: Serialize> Serialize for BatchResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (index, value) in &self.entries {
            map.serialize_entry(&index.to_string(), value)?;
        }
        map.end()
    }
}

/// Processes every document independently and in parallel.
///
/// # Arguments
///
/// * `docs` - Documents of one batch, in input order
/// * `f` - Per-document processing function
///
/// # Returns
///
/// * `Ok(BatchResult)` - Results in input order. Documents failing with
///   `SegmentationFailure` are omitted.
/// * `Err(TextError::SegmentationFailure)` - if the batch is non-empty and every document failed
/// * `Err(_)` - the first error of any other kind; the batch is abandoned
pub fn process_batch<T, F>(docs: &[Document], f: F) -> Result<BatchResult<T>, TextError>
where
    T: Send,
    F: Fn(&Document) -> Result<T, TextError> + Sync + Send,
{
    let outcomes: Vec<(usize, Result<T, TextError>)> =
        docs.par_iter().map(|doc| (doc.index(), f(doc))).collect();

    let total = outcomes.len();
    let mut entries = Vec::with_capacity(total);
    let mut failures: Vec<String> = Vec::new();
    for (index, outcome) in outcomes {
        match outcome {
            Ok(value) => entries.push((index, value)),
            Err(TextError::SegmentationFailure(reason)) => {
                log::warn!(index = index, reason:% = reason; "document omitted from batch result");
                failures.push(format!("document {index}: {reason}"));
            }
            Err(err) => return Err(err),
        }
    }

    if total > 0 && entries.is_empty() {
        return Err(TextError::segmentation_failure(format!(
            "all {total} documents failed: {}",
            failures.join("; ")
        )));
    }

    Ok(BatchResult { entries })
}
