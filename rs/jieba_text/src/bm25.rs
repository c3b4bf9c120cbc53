//! # BM25-ADPT keyword ranking
//!
//! Ranks the distinct terms of a single document without any corpus statistics.
//! The document is split into sentences, which act as its own pseudo-corpus for
//! length normalization. The fixed BM25 saturation constant `k1` is replaced by
//! a per-term value derived from the document's term-frequency distribution:
//!
//! ```text
//! L       = number of (filtered) tokens
//! V       = number of distinct terms
//! N       = number of non-empty sentences
//! dl(i)   = length of sentence i, avgdl = L / N
//! avgtf   = L / V
//! cv2     = variance(tf) / avgtf²
//!
//! k1'(t)  = k1 · (1 + cv2) · avgtf / tf(t)
//! sat(t)  = tf(t) / (tf(t) + k1'(t))
//! w(i)    = 1 / ((1 − b) + b · dl(i) / avgdl)
//! norm(t) = Σ_i tf_i(t) · w(i) / tf(t)
//! score(t) = sat(t) · norm(t)
//! ```
//!
//! There is no inverse document frequency factor: each document is scored on its own.
//! All arithmetic is done in `f64` so that large, nearby frequencies stay distinct.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::TextError;

/// Characters that end a sentence.
pub const SENTENCE_TERMINATORS: &[char] = &['。', '！', '？', '!', '?', '\n', ';', '；'];

/// Splits `text` into trimmed, non-empty sentences.
pub fn split_sentences(text: &str) -> impl Iterator<Item = &str> {
    text.split(SENTENCE_TERMINATORS)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Configuration parameters for the BM25-ADPT ranking algorithm
///
/// - `k1`: Base term frequency saturation, scaled per term by the document's tf dispersion.
///   Larger values widen the gap between frequent and rare terms.
/// - `b`: Weight of the sentence length normalization. 0.0 disables it, 1.0 applies it fully.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bm25AdptConfig {
    pub k1: f64,
    pub b: f64,
}

impl Default for Bm25AdptConfig {
    /// Returns the defaults (k1=1.5, b=0.75)
    fn default() -> Self {
        Bm25AdptConfig { k1: 1.5, b: 0.75 }
    }
}

impl Bm25AdptConfig {
    pub fn validate(&self) -> Result<(), TextError> {
        if !(self.k1.is_finite() && self.k1 > 0.0) {
            return Err(TextError::invalid_parameter(format!(
                "k1 must be a positive number, got {}",
                self.k1
            )));
        }
        if !(0.0..=1.0).contains(&self.b) {
            return Err(TextError::invalid_parameter(format!(
                "b must be within [0, 1], got {}",
                self.b
            )));
        }
        Ok(())
    }
}

/// Frequency statistics of one distinct term within one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermStatistics {
    pub term: String,
    /// Number of occurrences in the filtered token sequence.
    pub tf: usize,
    /// Position of the first occurrence in the filtered token sequence.
    pub first_position: usize,
    /// (sentence index, occurrences in that sentence), in sentence order.
    pub sentence_tf: Vec<(usize, usize)>,
}

/// A term with its BM25-ADPT score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredTerm {
    pub term: String,
    pub tf: usize,
    pub first_position: usize,
    pub score: f64,
}

/// Computes term statistics in first-occurrence order.
///
/// Positions count through all sentences as one filtered sequence.
pub fn term_statistics<S: AsRef<str>>(sentences: &[Vec<S>]) -> Vec<TermStatistics> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut stats: Vec<TermStatistics> = Vec::new();
    let mut pos = 0;
    for (sid, sentence) in sentences.iter().enumerate() {
        for token in sentence {
            let token = token.as_ref();
            match positions.get(token) {
                Some(&i) => {
                    let st = &mut stats[i];
                    st.tf += 1;
                    match st.sentence_tf.last_mut() {
                        Some((last, n)) if *last == sid => *n += 1,
                        _ => st.sentence_tf.push((sid, 1)),
                    }
                }
                None => {
                    positions.insert(token, stats.len());
                    stats.push(TermStatistics {
                        term: token.to_owned(),
                        tf: 1,
                        first_position: pos,
                        sentence_tf: vec![(sid, 1)],
                    });
                }
            }
            pos += 1;
        }
    }
    stats
}

/// Single-document BM25-ADPT keyword ranker.
#[derive(Debug, Clone, Default)]
pub struct Bm25Adpt {
    config: Bm25AdptConfig,
}

impl Bm25Adpt {
    /// Creates a new ranker with optional config, defaults are used when `None`.
    pub fn new(config: Option<Bm25AdptConfig>) -> Self {
        Bm25Adpt {
            config: config.unwrap_or_default(),
        }
    }

    pub fn config(&self) -> &Bm25AdptConfig {
        &self.config
    }

    /// Term-specific saturation constant. Terms far above the document's
    /// average frequency get a small `k1'` and saturate close to 1.
    fn adaptive_k1(&self, tf: f64, avgtf: f64, cv2: f64) -> f64 {
        self.config.k1 * (1.0 + cv2) * avgtf / tf
    }

    /// Weight of one occurrence in a sentence of length `dl`.
    /// Occurrences in short sentences weigh more than those in long ones.
    fn length_weight(&self, dl: f64, avgdl: f64) -> f64 {
        let b = self.config.b;
        1.0 / ((1.0 - b) + b * dl / avgdl)
    }

    /// Scores every distinct term of a document.
    ///
    /// # Arguments
    ///
    /// * `sentences` - Filtered tokens of each sentence, in document order
    ///
    /// # Returns
    ///
    /// All distinct terms, sorted by descending score. Ties are broken by the
    /// earlier first occurrence.
    pub fn score<S: AsRef<str>>(&self, sentences: &[Vec<S>]) -> Vec<ScoredTerm> {
        let stats = term_statistics(sentences);
        if stats.is_empty() {
            return Vec::new();
        }

        let doc_len: usize = sentences.iter().map(Vec::len).sum();
        let non_empty = sentences.iter().filter(|s| !s.is_empty()).count();
        let doc_len = doc_len as f64;
        let avgdl = doc_len / non_empty as f64;
        let weights: Vec<f64> = sentences
            .iter()
            .map(|s| self.length_weight(s.len() as f64, avgdl))
            .collect();

        let distinct = stats.len() as f64;
        let avgtf = doc_len / distinct;
        let variance = stats
            .iter()
            .map(|s| {
                let d = s.tf as f64 - avgtf;
                d * d
            })
            .sum::<f64>()
            / distinct;
        let cv2 = variance / (avgtf * avgtf);

        let mut scored: Vec<ScoredTerm> = stats
            .into_iter()
            .map(|s| {
                let tf = s.tf as f64;
                let sat = tf / (tf + self.adaptive_k1(tf, avgtf, cv2));
                let norm = s
                    .sentence_tf
                    .iter()
                    .map(|&(sid, n)| n as f64 * weights[sid])
                    .sum::<f64>()
                    / tf;
                ScoredTerm {
                    term: s.term,
                    tf: s.tf,
                    first_position: s.first_position,
                    score: sat * norm,
                }
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.first_position.cmp(&b.first_position))
        });
        scored
    }

    /// Extracts the top-k keywords of a document.
    ///
    /// # Arguments
    ///
    /// * `sentences` - Filtered tokens of each sentence, in document order
    /// * `top_k` - Maximum number of keywords to return, must be positive
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<String>)` - min(top_k, distinct terms) keywords, best first
    /// * `Err(TextError::InvalidParameter)` - if `top_k` is 0
    pub fn extract<S: AsRef<str>>(
        &self,
        sentences: &[Vec<S>],
        top_k: usize,
    ) -> Result<Vec<String>, TextError> {
        if top_k == 0 {
            return Err(TextError::invalid_parameter(
                "top_k must be a positive integer",
            ));
        }

        let mut scored = self.score(sentences);
        scored.truncate(top_k);
        Ok(scored.into_iter().map(|s| s.term).collect())
    }
}
