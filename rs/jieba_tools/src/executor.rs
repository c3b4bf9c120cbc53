//! # Tool Executor Module
//!
//! Defines the [`Executor`] trait implemented by anything that can serve tool
//! calls, plus [`execute_tool`], a convenience entry point taking raw JSON.

use async_trait::async_trait;

use crate::{Json, error::ToolError, request::ToolCall};

/// The core trait that defines how tool calls are executed.
///
/// Each call is one independent unit of work; nothing is published before the
/// full result exists. The text pipelines are CPU-bound and have no await
/// points, so the dispatcher finishes a call within the first poll of the
/// returned future and blocks the polling thread meanwhile. A call can only be
/// abandoned before it is first polled. Run large batches under
/// `spawn_blocking` (or an equivalent) to keep an async runtime responsive.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Executes a tool call and returns its JSON result.
    ///
    /// # Arguments
    ///
    /// * `call` - The tool name and its arguments
    ///
    /// # Returns
    ///
    /// - `Ok(Json)`: the batch result, keyed by stringified document index
    /// - `Err(ToolError)`: `UnknownTool`, `InvalidInputKind`, `InvalidParameter`,
    ///   or `SegmentationFailure` when every document of the batch failed
    async fn execute(&self, call: ToolCall) -> Result<Json, ToolError>;
}

/// Parses a raw JSON tool call and executes it.
///
/// # Arguments
///
/// * `executor` - An implementation of the `Executor` trait
/// * `call` - A JSON string like `{"name": "tag", "arguments": {"text": "..."}}`
pub async fn execute_tool(executor: &impl Executor, call: &str) -> Result<Json, ToolError> {
    let call: ToolCall = serde_json::from_str(call)?;
    executor.execute(call).await
}
