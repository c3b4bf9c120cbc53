use jieba_tools::{Dispatcher, DispatcherConfig, Executor, Response, ToolCall, execute_tool};
use serde_json::json;
use std::sync::LazyLock;

static DISPATCHER: LazyLock<Dispatcher<jieba_text::JiebaSegmenter>> = LazyLock::new(|| {
    Dispatcher::from_config(DispatcherConfig::default()).expect("default config is valid")
});

async fn run(name: &str, arguments: serde_json::Value) -> Response {
    ToolCall::new(name, arguments)
        .unwrap()
        .execute(&*DISPATCHER)
        .await
}

#[tokio::test]
async fn tokenize_exact() {
    let res = run("tokenize", json!({"text": ["我爱北京天安门"], "mode": "exact"})).await;
    assert_eq!(
        res,
        Response::ok(json!({"0": ["我", "爱", "北京", "天安门"]}))
    );

    let res = run("tokenize", json!({"text": "我爱北京天安门"})).await;
    assert_eq!(
        res,
        Response::ok(json!({"0": ["我", "爱", "北京", "天安门"]}))
    );
}

fn tokens_of(result: &serde_json::Value, index: &str) -> Vec<String> {
    result[index]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t.as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn tokenize_with_user_dict() {
    let text = "我爱北京天安门，北京天安门很美";

    let plain = run("tokenize", json!({"text": [text]}))
        .await
        .into_result()
        .unwrap();
    let plain = tokens_of(&plain, "0");
    assert!(!plain.iter().any(|t| t == "京天"));

    let res = run("tokenize", json!({"text": [text], "user_dict": ["京天"]}))
        .await
        .into_result()
        .unwrap();
    let tokens = tokens_of(&res, "0");
    assert_eq!(tokens.iter().filter(|t| *t == "京天").count(), 2);
    assert_ne!(tokens, plain);
    assert_eq!(tokens.concat(), text);
}

#[tokio::test]
async fn tag_keeps_structure_and_order() {
    let res = run("tag", json!({"text": ["我爱北京天安门"]}))
        .await
        .into_result()
        .unwrap();
    let pairs = res["0"].as_array().unwrap();
    assert_eq!(pairs.len(), 4);
    assert_eq!(pairs[0], json!({"word": "我", "flag": "r"}));
    assert_eq!(pairs[1], json!({"word": "爱", "flag": "v"}));
    assert_eq!(pairs[2]["word"], "北京");
    assert_eq!(pairs[3]["word"], "天安门");
}

#[tokio::test]
async fn extract_keywords_fixtures() {
    let res = run("extract_keywords", json!({"text": "", "top_k": 3})).await;
    assert_eq!(res, Response::ok(json!({"0": []})));

    // "我" is a stopword; the rest tie on frequency and keep document order
    let res = run("extract_keywords", json!({"text": ["我爱北京天安门"], "top_k": 2})).await;
    assert_eq!(res, Response::ok(json!({"0": ["爱", "北京"]})));

    let res = run("extract_keywords", json!({"text": ["我爱北京天安门"], "top_k": 10})).await;
    assert_eq!(res, Response::ok(json!({"0": ["爱", "北京", "天安门"]})));
}

#[tokio::test]
async fn extract_keywords_is_deterministic() {
    let args = json!({
        "text": [
            "北京是中国的首都。北京有天安门，天安门广场很大。",
            "上海是一座国际化大都市。",
            ""
        ],
        "top_k": 3
    });
    let first = run("extract_keywords", args.clone()).await.into_result().unwrap();
    let second = run("extract_keywords", args).await.into_result().unwrap();
    assert_eq!(first, second);

    let keys: Vec<&String> = first.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["0", "1", "2"]);
    assert_eq!(first["0"][0], "北京");
    assert!(first["2"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn invalid_top_k_fails_whole_batch() {
    for top_k in [json!(0), json!(-3)] {
        let res = run(
            "extract_keywords",
            json!({"text": ["我爱北京天安门", "上海"], "top_k": top_k}),
        )
        .await;
        let err = res.into_result().unwrap_err();
        assert_eq!(err.name, "InvalidParameter");
    }
}

#[tokio::test]
async fn raw_json_calls() {
    let result = execute_tool(
        &*DISPATCHER,
        r#"{"name": "tokenize", "arguments": {"text": ["我爱北京天安门", ""]}}"#,
    )
    .await
    .unwrap();
    assert_eq!(result, json!({"0": ["我", "爱", "北京", "天安门"], "1": []}));

    let err = execute_tool(&*DISPATCHER, r#"{"name": "tag", "arguments": {"text": 3}}"#)
        .await
        .unwrap_err();
    assert_eq!(err.to_string().split(':').next(), Some("InvalidInputKind"));

    let definitions = DISPATCHER.definitions();
    assert_eq!(definitions.len(), 3);
    let executor: &dyn Executor = &*DISPATCHER;
    assert!(executor.execute(ToolCall::new("tag", json!({"text": "a"})).unwrap()).await.is_ok());
}
