use async_trait::async_trait;
use jieba_text::{BatchResult, JiebaSegmenter, Segmenter, TaggedToken, TextPipeline};
use std::sync::Arc;

use crate::{
    Json,
    config::DispatcherConfig,
    error::ToolError,
    executor::Executor,
    params::{ExtractKeywordsParams, Operation, TagParams, TokenizeParams},
    request::ToolCall,
    tools::{ToolDefinition, tool_definitions},
};

/// Routes tool calls to the text pipelines.
///
/// All state is read-only after construction; share one dispatcher across
/// requests behind an `Arc` or by cloning.
pub struct Dispatcher<S> {
    pipeline: TextPipeline<S>,
    config: Arc<DispatcherConfig>,
}

impl<S> Clone for Dispatcher<S> {
    fn clone(&self) -> Self {
        Dispatcher {
            pipeline: self.pipeline.clone(),
            config: self.config.clone(),
        }
    }
}

impl Dispatcher<JiebaSegmenter> {
    /// Loads the jieba dictionary, plus `config.dictionary_words`, and builds a dispatcher.
    pub fn from_config(config: DispatcherConfig) -> Result<Self, ToolError> {
        config.validate()?;
        let segmenter = JiebaSegmenter::with_words(
            config.dictionary_words.iter(),
            Some(config.segmenter.clone()),
        );
        Ok(Self::new(Arc::new(segmenter), config))
    }
}

impl<S: Segmenter> Dispatcher<S> {
    pub fn new(segmenter: Arc<S>, config: DispatcherConfig) -> Self {
        Dispatcher {
            pipeline: TextPipeline::new(segmenter, Some(config.bm25.clone())),
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        tool_definitions(&self.config)
    }

    pub fn tokenize(&self, params: &TokenizeParams) -> Result<BatchResult<Vec<String>>, ToolError> {
        Ok(self
            .pipeline
            .tokenize(&params.text, params.mode, &params.user_dict)?)
    }

    pub fn tag(&self, params: &TagParams) -> Result<BatchResult<Vec<TaggedToken>>, ToolError> {
        Ok(self.pipeline.tag(&params.text)?)
    }

    pub fn extract_keywords(
        &self,
        params: &ExtractKeywordsParams,
    ) -> Result<BatchResult<Vec<String>>, ToolError> {
        Ok(self.pipeline.extract_keywords(&params.text, params.top_k)?)
    }

    /// Validates the call, runs the matching pipeline and serializes the batch result.
    pub fn dispatch(&self, call: &ToolCall) -> Result<Json, ToolError> {
        let op: Operation = call.name.parse()?;
        log::debug!(tool = op.as_str(), arguments = call.arguments.len(); "dispatching tool call");

        let result = match op {
            Operation::Tokenize => {
                let params = TokenizeParams::from_arguments(&call.arguments, &self.config)?;
                serde_json::to_value(self.tokenize(&params)?)?
            }
            Operation::Tag => {
                let params = TagParams::from_arguments(&call.arguments)?;
                serde_json::to_value(self.tag(&params)?)?
            }
            Operation::ExtractKeywords => {
                let params = ExtractKeywordsParams::from_arguments(&call.arguments, &self.config)?;
                serde_json::to_value(self.extract_keywords(&params)?)?
            }
        };
        Ok(result)
    }
}

#[async_trait]
impl<S: Segmenter + 'static> Executor for Dispatcher<S> {
    async fn execute(&self, call: ToolCall) -> Result<Json, ToolError> {
        let rt = self.dispatch(&call);
        if let Err(err) = &rt {
            log::info!(tool = call.name.as_str(), error:% = err; "tool call failed");
        }
        rt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Response;
    use jieba_text::{CustomTerms, SegmentMode, TextError};
    use serde_json::json;

    /// Splits on whitespace; fails on texts containing "FAIL".
    struct WhitespaceSegmenter;

    impl Segmenter for WhitespaceSegmenter {
        fn segment(
            &self,
            text: &str,
            _mode: SegmentMode,
            _custom_terms: &CustomTerms,
        ) -> Result<Vec<String>, TextError> {
            if text.contains("FAIL") {
                return Err(TextError::segmentation_failure("engine rejected text"));
            }
            Ok(text.split_whitespace().map(str::to_owned).collect())
        }

        fn tag(&self, text: &str) -> Result<Vec<TaggedToken>, TextError> {
            Ok(self
                .segment(text, SegmentMode::Exact, &CustomTerms::default())?
                .into_iter()
                .map(|word| TaggedToken {
                    word,
                    flag: "n".to_string(),
                })
                .collect())
        }
    }

    fn dispatcher() -> Dispatcher<WhitespaceSegmenter> {
        Dispatcher::new(Arc::new(WhitespaceSegmenter), DispatcherConfig::default())
    }

    fn call(name: &str, arguments: Json) -> ToolCall {
        ToolCall::new(name, arguments).unwrap()
    }

    #[tokio::test]
    async fn test_execute() {
        let dispatcher = dispatcher();

        let res = call("tokenize", json!({"text": ["a b", "c"]}))
            .execute(&dispatcher)
            .await;
        assert_eq!(res, Response::ok(json!({"0": ["a", "b"], "1": ["c"]})));

        let res = call("tag", json!({"text": "a"})).execute(&dispatcher).await;
        assert_eq!(
            res,
            Response::ok(json!({"0": [{"word": "a", "flag": "n"}]}))
        );

        let res = call("extract_keywords", json!({"text": "x y y z z z w"}))
            .execute(&dispatcher)
            .await;
        assert_eq!(res, Response::ok(json!({"0": ["z", "y", "x"]})));
    }

    #[tokio::test]
    async fn test_partial_failure() {
        let dispatcher = dispatcher();
        let result = dispatcher
            .execute(call(
                "extract_keywords",
                json!({"text": ["p p q", "FAIL", "c"], "top_k": 1}),
            ))
            .await
            .unwrap();
        assert_eq!(result, json!({"0": ["p"], "2": ["c"]}));

        let err = dispatcher
            .execute(call("tokenize", json!({"text": ["FAIL", "FAIL too"]})))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::SegmentationFailure(_)));
    }

    #[tokio::test]
    async fn test_errors() {
        let dispatcher = dispatcher();

        let res = call("summarize", json!({"text": "a"}))
            .execute(&dispatcher)
            .await;
        assert_eq!(res.into_result().unwrap_err().name, "UnknownTool");

        let res = call("extract_keywords", json!({"text": ["a", "b"], "top_k": 0}))
            .execute(&dispatcher)
            .await;
        assert_eq!(res.into_result().unwrap_err().name, "InvalidParameter");

        let res = call("extract_keywords", json!({"text": ["a"], "top_k": -2}))
            .execute(&dispatcher)
            .await;
        assert_eq!(res.into_result().unwrap_err().name, "InvalidParameter");

        let res = call("tag", json!({"text": {"nested": "a"}}))
            .execute(&dispatcher)
            .await;
        assert_eq!(res.into_result().unwrap_err().name, "InvalidInputKind");

        let res = call("tokenize", json!({"text": "a", "mode": "fuzzy"}))
            .execute(&dispatcher)
            .await;
        assert_eq!(res.into_result().unwrap_err().name, "InvalidParameter");
    }

    #[test]
    fn test_bm25_config_reaches_ranking() {
        let args = json!({"text": "x x p q r s t u。y", "top_k": 2});

        let result = dispatcher()
            .dispatch(&call("extract_keywords", args.clone()))
            .unwrap();
        assert_eq!(result, json!({"0": ["y", "x"]}));

        let config = DispatcherConfig::from_json(r#"{"bm25": {"b": 0.0}}"#).unwrap();
        let flat = Dispatcher::new(Arc::new(WhitespaceSegmenter), config);
        let result = flat.dispatch(&call("extract_keywords", args.clone())).unwrap();
        assert_eq!(result, json!({"0": ["x", "p"]}));

        let config = DispatcherConfig::from_json(r#"{"bm25": {"k1": 100.0}}"#).unwrap();
        let steep = Dispatcher::new(Arc::new(WhitespaceSegmenter), config);
        let result = steep.dispatch(&call("extract_keywords", args)).unwrap();
        assert_eq!(result, json!({"0": ["x", "y"]}));
    }

    #[test]
    fn test_execute_completes_on_first_poll() {
        use std::{
            future::Future,
            pin::pin,
            task::{Context, Poll, Waker},
        };

        let dispatcher = dispatcher();
        let mut fut = pin!(dispatcher.execute(call("tokenize", json!({"text": "a b"}))));
        let mut cx = Context::from_waker(Waker::noop());
        match fut.as_mut().poll(&mut cx) {
            Poll::Ready(result) => assert_eq!(result.unwrap(), json!({"0": ["a", "b"]})),
            Poll::Pending => panic!("tool call did not complete on the first poll"),
        }
    }

    #[test]
    fn test_definitions_follow_config() {
        let dispatcher = Dispatcher::new(
            Arc::new(WhitespaceSegmenter),
            DispatcherConfig {
                default_top_k: 7,
                ..Default::default()
            },
        );
        let defs = dispatcher.definitions();
        assert_eq!(defs[2].input_schema["properties"]["top_k"]["default"], 7);

        let result = dispatcher
            .dispatch(&call("extract_keywords", json!({"text": "a b c d e f g h i"})))
            .unwrap();
        assert_eq!(result["0"].as_array().unwrap().len(), 7);
    }
}
