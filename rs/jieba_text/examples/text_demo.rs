use jieba_text::{CustomTerms, JiebaSegmenter, SegmentMode, TextInput, TextPipeline};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    structured_logger::Builder::new().init();

    let pipeline = TextPipeline::new(Arc::new(JiebaSegmenter::new(None)), None);

    let input = TextInput::from(vec![
        "我爱北京天安门",
        "Rust 是一门系统编程语言，Rust 快速、安全、并发。",
        "",
    ]);

    let tokens = pipeline.tokenize(&input, SegmentMode::Exact, &CustomTerms::default())?;
    log::info!(result:serde = tokens; "tokenize exact");

    let tokens = pipeline.tokenize(&input, SegmentMode::Search, &CustomTerms::new(["编程语言"]))?;
    log::info!(result:serde = tokens; "tokenize search with custom terms");

    let tags = pipeline.tag(&input)?;
    log::info!(result:serde = tags; "tag");

    let keywords = pipeline.extract_keywords(&input, 3)?;
    log::info!(result:serde = keywords; "extract_keywords");

    let sentences = vec![vec!["安全", "Rust", "并发", "Rust"], vec!["Rust"]];
    for scored in pipeline.ranker().score(&sentences) {
        println!("{}\ttf={}\tscore={:.4}", scored.term, scored.tf, scored.score);
    }

    Ok(())
}
