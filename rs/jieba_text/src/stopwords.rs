//! Stopword and punctuation filtering
//!
//! The built-in list merges the common Chinese stopword lists (HIT, SCU and
//! the Chinese stopword corpus) with Chinese and ASCII punctuation and common
//! English function words, sorted and deduplicated. It is parsed once per
//! process and never modified afterwards.

use std::{collections::HashSet, sync::LazyLock};

static BUILTIN: LazyLock<StopwordFilter> =
    LazyLock::new(|| StopwordFilter::parse(include_str!("stopwords.txt")));

/// A read-only filter removing stopwords and punctuation-only tokens.
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    stopwords: HashSet<String>,
}

impl StopwordFilter {
    /// Returns the process-wide built-in filter.
    pub fn builtin() -> &'static StopwordFilter {
        &BUILTIN
    }

    /// One stopword per line; surrounding whitespace and blank lines are ignored.
    fn parse(source: &str) -> Self {
        let stopwords = source
            .lines()
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .map(str::to_owned)
            .collect();
        StopwordFilter { stopwords }
    }

    /// Checks if a word is in the stopword set.
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    /// A token survives filtering when, after trimming, it is non-empty,
    /// not a stopword and contains at least one letter or digit.
    pub fn is_valid_token(&self, token: &str) -> bool {
        let token = token.trim();
        !token.is_empty()
            && !self.stopwords.contains(token)
            && token.chars().any(char::is_alphanumeric)
    }

    /// Returns the surviving tokens, trimmed, in their original order.
    pub fn filter<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<String> {
        tokens
            .iter()
            .map(|t| t.as_ref().trim())
            .filter(|t| self.is_valid_token(t))
            .map(str::to_owned)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }
}
