use jieba_tools::{Dispatcher, DispatcherConfig, ToolCall};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    structured_logger::Builder::new().init();

    let config = DispatcherConfig::from_json(r#"{"default_top_k": 3, "dictionary_words": ["结巴分词"]}"#)?;
    let dispatcher = Dispatcher::from_config(config)?;

    let definitions = dispatcher.definitions();
    log::info!(tools:serde = definitions; "available tools");

    let calls = vec![
        ToolCall::new("tokenize", json!({"text": ["我爱北京天安门"], "mode": "exact"}))?,
        ToolCall::new(
            "tokenize",
            json!({"text": "小明硕士毕业于中国科学院计算所", "mode": "search", "user_dict": ["计算所"]}),
        )?,
        ToolCall::new("tag", json!({"text": "结巴分词是一个中文分词组件"}))?,
        ToolCall::new(
            "extract_keywords",
            json!({"text": ["结巴分词支持三种分词模式。结巴分词支持自定义词典。", ""], "top_k": 2}),
        )?,
        ToolCall::new("extract_keywords", json!({"text": "abc", "top_k": 0}))?,
    ];

    for call in calls {
        let name = call.name.clone();
        let response = call.execute(&dispatcher).await;
        log::info!(tool = name.as_str(), response:serde = response; "tool call");
        println!("{}", serde_json::to_string(&response)?);
    }

    Ok(())
}
