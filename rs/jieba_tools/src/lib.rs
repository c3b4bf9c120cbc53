//! # Jieba Tools
//!
//! Exposes `tokenize`, `tag` and `extract_keywords` as tool calls for LLM
//! clients. A [`ToolCall`] is validated, routed to the matching `jieba_text`
//! pipeline and answered with a [`Response`] whose result maps each document
//! index to that document's output.

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod executor;
pub mod params;
pub mod request;
pub mod tools;

pub use config::*;
pub use dispatcher::*;
pub use error::*;
pub use executor::*;
pub use params::*;
pub use request::*;
pub use tools::*;

pub use serde_json::{Map, Value as Json};
