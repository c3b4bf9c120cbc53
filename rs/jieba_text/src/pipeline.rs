use std::sync::Arc;

use crate::{
    batch::{BatchResult, TextInput, process_batch},
    bm25::{Bm25Adpt, Bm25AdptConfig, split_sentences},
    error::TextError,
    stopwords::StopwordFilter,
    tokenizer::{CustomTerms, SegmentMode, Segmenter, TaggedToken},
};

/// Batch pipelines for tokenization, tagging and keyword extraction.
///
/// The pipeline only holds shared read-only state, so one instance can serve
/// any number of concurrent requests.
pub struct TextPipeline<S> {
    segmenter: Arc<S>,
    stopwords: &'static StopwordFilter,
    ranker: Bm25Adpt,
}

impl<S> Clone for TextPipeline<S> {
    fn clone(&self) -> Self {
        TextPipeline {
            segmenter: self.segmenter.clone(),
            stopwords: self.stopwords,
            ranker: self.ranker.clone(),
        }
    }
}

impl<S: Segmenter> TextPipeline<S> {
    /// Creates a pipeline using the built-in stopword list.
    pub fn new(segmenter: Arc<S>, config: Option<Bm25AdptConfig>) -> Self {
        TextPipeline {
            segmenter,
            stopwords: StopwordFilter::builtin(),
            ranker: Bm25Adpt::new(config),
        }
    }

    pub fn segmenter(&self) -> &S {
        &self.segmenter
    }

    pub fn ranker(&self) -> &Bm25Adpt {
        &self.ranker
    }

    /// Segments every document. No stopword filtering is applied.
    pub fn tokenize(
        &self,
        input: &TextInput,
        mode: SegmentMode,
        custom_terms: &CustomTerms,
    ) -> Result<BatchResult<Vec<String>>, TextError> {
        let docs = input.documents();
        log::debug!(
            documents = docs.len(),
            mode:% = mode,
            custom_terms = custom_terms.len();
            "tokenize batch"
        );
        process_batch(&docs, |doc| {
            self.segmenter.segment(doc.text(), mode, custom_terms)
        })
    }

    /// Tags every document with part-of-speech flags.
    pub fn tag(&self, input: &TextInput) -> Result<BatchResult<Vec<TaggedToken>>, TextError> {
        let docs = input.documents();
        log::debug!(documents = docs.len(); "tag batch");
        process_batch(&docs, |doc| self.segmenter.tag(doc.text()))
    }

    /// Extracts the top-k keywords of every document.
    ///
    /// Each document is split into sentences, segmented in exact mode and
    /// stripped of stopwords before ranking.
    ///
    /// `top_k` is checked before any document is touched; 0 fails the whole batch.
    pub fn extract_keywords(
        &self,
        input: &TextInput,
        top_k: usize,
    ) -> Result<BatchResult<Vec<String>>, TextError> {
        if top_k == 0 {
            return Err(TextError::invalid_parameter(
                "top_k must be a positive integer",
            ));
        }

        let docs = input.documents();
        log::debug!(documents = docs.len(), top_k = top_k; "extract_keywords batch");
        let no_terms = CustomTerms::default();
        process_batch(&docs, |doc| {
            let sentences = split_sentences(doc.text())
                .map(|sentence| -> Result<Vec<String>, TextError> {
                    let tokens = self
                        .segmenter
                        .segment(sentence, SegmentMode::Exact, &no_terms)?;
                    Ok(self.stopwords.filter(&tokens))
                })
                .collect::<Result<Vec<_>, TextError>>()?;
            self.ranker.extract(&sentences, top_k)
        })
    }
}
