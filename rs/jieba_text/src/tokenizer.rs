use jieba_rs::Jieba;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr, sync::Arc};

use crate::error::TextError;

/// Segmentation mode.
///
/// - `Exact`: the minimal, non-overlapping token cover of the text.
/// - `Search`: exact segmentation plus overlapping sub-tokens of long words, for indexing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentMode {
    #[default]
    Exact,
    Search,
}

impl SegmentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SegmentMode::Exact => "exact",
            SegmentMode::Search => "search",
        }
    }
}

impl FromStr for SegmentMode {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exact" => Ok(SegmentMode::Exact),
            "search" => Ok(SegmentMode::Search),
            other => Err(TextError::invalid_parameter(format!(
                "unknown segmentation mode {other:?}, expected \"exact\" or \"search\""
            ))),
        }
    }
}

impl fmt::Display for SegmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A token paired with its ICTCLAS part-of-speech flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedToken {
    pub word: String,
    pub flag: String,
}

/// Caller-supplied vocabulary that must come out of segmentation as atomic tokens.
///
/// Entries are trimmed, empty entries are dropped and duplicates are removed.
/// Entries are kept longest first so matching is leftmost-longest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomTerms {
    terms: Vec<String>,
}

/// A slice of the input text produced by [`CustomTerms::split`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Piece<'a> {
    /// An occurrence of a custom term.
    Term(&'a str),
    /// Text between custom terms, to be segmented by the engine.
    Gap(&'a str),
}

impl CustomTerms {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut terms: Vec<String> = terms
            .into_iter()
            .map(|t| t.as_ref().trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        terms.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        terms.dedup();
        CustomTerms { terms }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    /// Splits `text` at every leftmost-longest occurrence of a custom term.
    /// Concatenating the pieces yields `text` again.
    pub(crate) fn split<'a>(&self, text: &'a str) -> Vec<Piece<'a>> {
        let mut pieces = Vec::new();
        let mut gap_start = 0;
        let mut pos = 0;
        while pos < text.len() {
            let rest = &text[pos..];
            match self.terms.iter().find(|t| rest.starts_with(t.as_str())) {
                Some(term) => {
                    if gap_start < pos {
                        pieces.push(Piece::Gap(&text[gap_start..pos]));
                    }
                    pieces.push(Piece::Term(&text[pos..pos + term.len()]));
                    pos += term.len();
                    gap_start = pos;
                }
                None => {
                    pos += rest.chars().next().map_or(1, char::len_utf8);
                }
            }
        }
        if gap_start < text.len() {
            pieces.push(Piece::Gap(&text[gap_start..]));
        }
        pieces
    }
}

/// The segmentation engine seam.
///
/// Implementations must be shareable across threads: every document of a batch
/// may be segmented concurrently against the same instance.
pub trait Segmenter: Send + Sync {
    /// Splits `text` into an ordered sequence of tokens.
    /// Occurrences of `custom_terms` are emitted as single tokens.
    fn segment(
        &self,
        text: &str,
        mode: SegmentMode,
        custom_terms: &CustomTerms,
    ) -> Result<Vec<String>, TextError>;

    /// Splits `text` into ordered (token, part-of-speech) pairs.
    fn tag(&self, text: &str) -> Result<Vec<TaggedToken>, TextError>;
}

/// Configuration for [`JiebaSegmenter`].
///
/// - `hmm`: Enables HMM based recognition of words missing from the dictionary.
/// - `parallel_threshold`: Texts of at least this many bytes are segmented line by line in parallel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    pub hmm: bool,
    pub parallel_threshold: usize,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        SegmenterConfig {
            hmm: true,
            parallel_threshold: 10_000,
        }
    }
}

/// [`Segmenter`] backed by the jieba dictionary.
///
/// The dictionary is loaded once and shared read-only behind an `Arc`;
/// cloning the segmenter is cheap.
#[derive(Clone)]
pub struct JiebaSegmenter {
    jieba: Arc<Jieba>,
    config: SegmenterConfig,
}

impl JiebaSegmenter {
    /// Creates a segmenter with the built-in dictionary.
    pub fn new(config: Option<SegmenterConfig>) -> Self {
        Self::with_words(std::iter::empty::<&str>(), config)
    }

    /// Creates a segmenter with the built-in dictionary extended by `words`.
    ///
    /// The words are injected once here; the engine is never mutated afterwards.
    pub fn with_words<I, S>(words: I, config: Option<SegmenterConfig>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut jieba = Jieba::new();
        let mut added = 0usize;
        for word in words {
            let word = word.as_ref().trim();
            if !word.is_empty() {
                jieba.add_word(word, None, None);
                added += 1;
            }
        }
        let config = config.unwrap_or_default();
        log::debug!(words = added, hmm = config.hmm; "jieba dictionary loaded");
        JiebaSegmenter {
            jieba: Arc::new(jieba),
            config,
        }
    }

    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    fn cut<'a>(&self, text: &'a str, mode: SegmentMode) -> Vec<&'a str> {
        match mode {
            SegmentMode::Exact => self.jieba.cut(text, self.config.hmm),
            SegmentMode::Search => self.jieba.cut_for_search(text, self.config.hmm),
        }
    }

    fn cut_with_terms(&self, text: &str, mode: SegmentMode, terms: &CustomTerms) -> Vec<String> {
        if terms.is_empty() {
            return self.cut(text, mode).into_iter().map(str::to_owned).collect();
        }

        let mut tokens = Vec::new();
        for piece in terms.split(text) {
            match piece {
                Piece::Term(term) => tokens.push(term.to_owned()),
                Piece::Gap(gap) => tokens.extend(self.cut(gap, mode).into_iter().map(str::to_owned)),
            }
        }
        tokens
    }

    fn tag_chunk(&self, text: &str) -> Vec<TaggedToken> {
        self.jieba
            .tag(text, self.config.hmm)
            .into_iter()
            .map(|t| TaggedToken {
                word: t.word.to_owned(),
                flag: t.tag.to_owned(),
            })
            .collect()
    }

    /// Large texts are split after each newline. Jieba never joins a newline
    /// with its neighbours, so per-line results concatenate to the serial result.
    fn lines<'a>(&self, text: &'a str) -> Option<Vec<&'a str>> {
        if text.len() < self.config.parallel_threshold {
            return None;
        }
        Some(text.split_inclusive('\n').collect())
    }
}

impl Segmenter for JiebaSegmenter {
    fn segment(
        &self,
        text: &str,
        mode: SegmentMode,
        custom_terms: &CustomTerms,
    ) -> Result<Vec<String>, TextError> {
        // a term spanning a newline would be cut apart by the line split
        let line_safe = custom_terms.iter().all(|t| !t.contains('\n'));
        match self.lines(text) {
            Some(lines) if line_safe => Ok(lines
                .par_iter()
                .flat_map_iter(|line| self.cut_with_terms(line, mode, custom_terms))
                .collect()),
            _ => Ok(self.cut_with_terms(text, mode, custom_terms)),
        }
    }

    fn tag(&self, text: &str) -> Result<Vec<TaggedToken>, TextError> {
        match self.lines(text) {
            Some(lines) => Ok(lines
                .par_iter()
                .flat_map_iter(|line| self.tag_chunk(line))
                .collect()),
            None => Ok(self.tag_chunk(text)),
        }
    }
}
