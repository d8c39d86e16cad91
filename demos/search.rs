//! Run a keyword or citation search from the command line.
//!
//! ```sh
//! cargo run --example search -- keyword "graph neural networks"
//! cargo run --example search -- citation https://arxiv.org/abs/2303.08774
//! ```

use paper_scout::{SearchEngine, SearchStatus};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let mode = args.next().unwrap_or_else(|| "keyword".to_owned());
    let input = args.collect::<Vec<_>>().join(" ");

    let engine = SearchEngine::new();
    match mode.as_str() {
        "citation" => engine.run_citation_search(&input).await?,
        _ => engine.run_keyword_search(&input).await?,
    }

    let state = engine.snapshot();
    if let Some(source) = &state.source_paper {
        println!("Source: {} ({})", source.title, source.id);
        match &source.semantic_scholar_id {
            Some(id) => println!("Semantic Scholar ID: {}", id),
            None => println!("No citation data available"),
        }
    }
    if let Some(link) = &state.scholar_link {
        println!("Scholar: {}", link);
    }
    if !state.key_terms.is_empty() {
        let terms: Vec<&str> = state.key_terms.iter().map(|t| t.term.as_str()).collect();
        println!("Key terms: {}", terms.join(", "));
    }
    for citing in &state.citing_papers {
        let year = citing
            .year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "Unknown".to_owned());
        println!("Cited by: {} ({}, {})", citing.title, citing.venue, year);
    }
    for paper in &state.papers {
        println!("{}  {}  [{}]", paper.id, paper.title, paper.authors.join(", "));
    }
    if let SearchStatus::Failed(message) = &state.status {
        eprintln!("Search failed: {}", message);
    }
    Ok(())
}
