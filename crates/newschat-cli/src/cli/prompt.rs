//! `newschat prompt`: compose the reference prompt for one question and
//! save it without calling the completion service.

use console::style;

use newschat_core::chat::session::{prepare_opening, ChatSettings};
use newschat_core::repository::chat_log::ChatLogRepository;

use crate::cli::spinner;
use crate::state::AppState;

pub async fn export_prompt(state: &AppState, question: &str, json: bool) -> anyhow::Result<()> {
    let store = state.load_store().await?;
    let embedder = state.embedder(state.openai_client()?);
    let assembler = ChatSettings::from_config(&state.config).assembler();

    let ranking = if json { None } else { Some(spinner("ranking articles...")) };
    let opening = prepare_opening(&store, &embedder, &assembler, question).await;
    if let Some(ranking) = ranking {
        ranking.finish_and_clear();
    }
    let opening = opening?;

    let location = state
        .chat_log_repo
        .save_prompt(question, &opening.conversation)
        .await?;

    if json {
        let summary = serde_json::json!({
            "question": question,
            "sources": opening.sources,
            "path": location,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!();
        println!(
            "  {} Prompt saved to {}",
            style("*").green().bold(),
            style(&location).cyan()
        );
        for (i, title) in opening.sources.iter().enumerate() {
            println!("  {} {}", style(format!("{}.", i + 1)).dim(), title);
        }
        println!();
    }

    Ok(())
}
