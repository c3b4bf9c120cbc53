use jieba_text::{Bm25AdptConfig, SegmentMode, SegmenterConfig};
use serde::{Deserialize, Serialize};

use crate::error::ToolError;

/// Dispatcher configuration.
///
/// Every field is optional in the serialized form; missing fields take their defaults.
///
/// # Example
/// ```json
/// {
///   "segmenter": { "hmm": true, "parallel_threshold": 10000 },
///   "bm25": { "k1": 1.5, "b": 0.75 },
///   "default_mode": "exact",
///   "default_top_k": 3,
///   "dictionary_words": ["区块链"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Jieba engine settings.
    pub segmenter: SegmenterConfig,

    /// BM25-ADPT ranking parameters.
    pub bm25: Bm25AdptConfig,

    /// Mode used by `tokenize` when the call does not name one.
    pub default_mode: SegmentMode,

    /// Keyword count used by `extract_keywords` when the call does not name one.
    pub default_top_k: usize,

    /// Words added to the jieba dictionary once, when the dispatcher is built.
    pub dictionary_words: Vec<String>,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        DispatcherConfig {
            segmenter: SegmenterConfig::default(),
            bm25: Bm25AdptConfig::default(),
            default_mode: SegmentMode::Exact,
            default_top_k: 3,
            dictionary_words: Vec::new(),
        }
    }
}

impl DispatcherConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json(s: &str) -> Result<Self, ToolError> {
        let config: DispatcherConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ToolError> {
        if self.default_top_k == 0 {
            return Err(ToolError::invalid_parameter(
                "default_top_k must be a positive integer",
            ));
        }
        self.bm25.validate()?;
        Ok(())
    }
}
