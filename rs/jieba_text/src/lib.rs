//! # Jieba Text Library
//!
//! Batch preprocessing for Chinese text: segmentation, part-of-speech tagging
//! and single-document BM25-ADPT keyword extraction.

pub mod batch;
pub mod bm25;
pub mod error;
pub mod pipeline;
pub mod stopwords;
pub mod tokenizer;

pub use batch::*;
pub use bm25::*;
pub use error::*;
pub use pipeline::*;
pub use stopwords::*;
pub use tokenizer::*;
