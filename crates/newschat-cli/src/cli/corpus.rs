//! `newschat build-corpus`: fetch, embed and save the news corpus.

use std::time::Duration;

use anyhow::Context;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use newschat_core::corpus::builder::{BuildProgress, CorpusBuilder};
use newschat_core::repository::corpus::CorpusRepository;
use newschat_core::retrieval::store::VectorStore;

use crate::state::AppState;

pub async fn build_corpus(
    state: &AppState,
    keyword: &str,
    json: bool,
    quiet: bool,
) -> anyhow::Result<()> {
    let news = state.news_client()?;
    let client = state.openai_client()?;
    let builder = CorpusBuilder::new(news, state.embedder(client));

    let bar = if json || quiet {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new_spinner();
        bar.set_message(format!("searching news for '{keyword}'..."));
        bar.enable_steady_tick(Duration::from_millis(80));
        bar
    };

    let corpus = builder
        .build(keyword, |progress| match progress {
            BuildProgress::Fetched { count } => {
                bar.set_length(count as u64);
                if let Ok(style) = ProgressStyle::default_bar()
                    .template("{spinner:.cyan} [{bar:30.cyan/dim}] {pos}/{len} {wide_msg}")
                {
                    bar.set_style(style);
                }
                bar.set_message("embedding titles");
            }
            BuildProgress::Embedded { title, .. } => {
                bar.inc(1);
                bar.set_message(title.to_string());
            }
        })
        .await;
    bar.finish_and_clear();
    let corpus = corpus.with_context(|| format!("failed to build corpus for '{keyword}'"))?;

    state.corpus_repo.save(&corpus).await?;

    let store = VectorStore::new(corpus);
    let path = state.corpus_repo.path().display().to_string();

    if json {
        let summary = serde_json::json!({
            "keyword": keyword,
            "articles": store.len(),
            "dimension": store.dimension(),
            "total_tokens": store.total_tokens(),
            "path": path,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else if !quiet {
        println!();
        println!(
            "  {} Embedded {} articles for '{}'",
            style("*").green().bold(),
            style(store.len()).bold(),
            style(keyword).cyan()
        );
        println!(
            "  {}",
            style(format!("{} tokens billed, saved to {path}", store.total_tokens())).dim()
        );
        println!();
    }

    Ok(())
}
