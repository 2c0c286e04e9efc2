//! Main chat loop orchestration.
//!
//! Coordinates the session lifecycle: corpus loading, welcome banner, the
//! input loop with streaming replies, slash commands and chat log
//! persistence after every completed turn.

use std::sync::Arc;
use std::time::Instant;

use console::style;
use tracing::{info, warn};
use uuid::Uuid;

use newschat_core::chat::session::{ChatError, ChatSession, ChatSettings};
use newschat_core::llm::provider::CompletionProvider;
use newschat_core::repository::chat_log::ChatLogRepository;
use newschat_core::retrieval::embedder::Embedder;
use newschat_core::retrieval::store::VectorStore;
use newschat_types::llm::Temperature;

use crate::cli::spinner;
use crate::state::AppState;

use super::banner::{print_welcome_banner, BannerInfo};
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::ChatRenderer;

/// Log level for failed turns. The renderer prints the error itself; the
/// log event stays below the default `warn` filter.
const TURN_FAILURE_LEVEL: tracing::Level = tracing::Level::DEBUG;

/// How a single turn ended.
enum TurnOutcome {
    Completed(String),
    Failed(ChatError),
    /// Ctrl+C or Ctrl+D while the reply was streaming.
    Cancelled,
}

/// Run the interactive chat loop.
pub async fn run_chat_loop(
    state: &AppState,
    temperature: Option<Temperature>,
    no_reference: bool,
) -> anyhow::Result<()> {
    let client = state.openai_client()?;

    let store = if no_reference {
        Arc::new(VectorStore::default())
    } else {
        state.load_store().await?
    };

    let mut settings = ChatSettings::from_config(&state.config);
    if let Some(temperature) = temperature {
        settings.temperature = temperature;
    }
    settings.use_reference = !no_reference;

    let session_id = Uuid::now_v7().to_string();
    info!(
        session_id = %session_id,
        model = %settings.model,
        temperature = %settings.temperature,
        use_reference = settings.use_reference,
        "chat session started"
    );

    print_welcome_banner(&BannerInfo {
        model: &settings.model,
        session_id: &session_id,
        articles: store.len(),
        budget_chars: settings.budget,
        use_reference: settings.use_reference,
    });

    let renderer = ChatRenderer::new(&settings.model);
    let mut session = ChatSession::new(
        state.chat_provider(Arc::clone(&client)),
        state.embedder(client),
        store,
        settings,
    );

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, _writer) = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        match chat_input.read_line().await {
            InputEvent::Eof | InputEvent::Interrupted => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            InputEvent::Message(text) => {
                if text.is_empty() {
                    continue;
                }

                if let Some(cmd) = commands::parse(&text) {
                    match cmd {
                        ChatCommand::Help => commands::print_help(),
                        ChatCommand::Clear => chat_input.clear(),
                        ChatCommand::History => renderer.print_history(session.conversation()),
                        ChatCommand::Sources => renderer.print_sources(session.sources()),
                        ChatCommand::Exit => {
                            println!("\n  {}", style("Session ended.").dim());
                            break;
                        }
                        ChatCommand::Unknown(name) => {
                            println!(
                                "\n  {} Unknown command: {}. Type /help for available commands.\n",
                                style("?").yellow().bold(),
                                style(name).dim()
                            );
                        }
                    }
                    continue;
                }

                chat_input.add_history(&text);
                let first_turn = session.turns() == 0;

                match run_turn(&mut session, &mut chat_input, &renderer, &text).await {
                    TurnOutcome::Completed(_) => {
                        if first_turn && !session.sources().is_empty() {
                            println!(
                                "  {}\n",
                                style(format!(
                                    "Answer grounded in {} articles (/sources to list them)",
                                    session.sources().len()
                                ))
                                .dim()
                            );
                        }
                        if let Err(e) = state.chat_log_repo.save_chat_log(session.conversation()).await {
                            warn!(error = %e, "failed to save chat log");
                        }
                    }
                    TurnOutcome::Failed(e) => {
                        tracing::event!(TURN_FAILURE_LEVEL, error = %e, "turn failed");
                        renderer.print_turn_error(&e);
                    }
                    TurnOutcome::Cancelled => {
                        println!("\n  {}", style("Reply cancelled. Session ended.").dim());
                        break;
                    }
                }
            }
        }
    }

    info!(session_id = %session_id, turns = session.turns(), "chat session ended");
    Ok(())
}

/// Run one turn while watching the input for Ctrl+C / Ctrl+D.
///
/// Cancelling drops the turn future, so nothing from the partial reply is
/// committed to the conversation.
async fn run_turn<P: CompletionProvider, E: Embedder>(
    session: &mut ChatSession<P, E>,
    input: &mut ChatInput,
    renderer: &ChatRenderer,
    text: &str,
) -> TurnOutcome {
    let thinking = spinner("thinking...");
    let start_time = Instant::now();
    let mut first_token = true;

    let turn = session.ask(text, |delta| {
        if first_token {
            thinking.finish_and_clear();
            renderer.print_reply_prefix();
            first_token = false;
        }
        renderer.print_streaming_token(delta);
    });
    let mut turn = std::pin::pin!(turn);

    let outcome = loop {
        tokio::select! {
            result = &mut turn => {
                break match result {
                    Ok(reply) => TurnOutcome::Completed(reply),
                    Err(e) => TurnOutcome::Failed(e),
                };
            }
            event = input.read_line() => match event {
                InputEvent::Interrupted | InputEvent::Eof => break TurnOutcome::Cancelled,
                InputEvent::Message(_) => {
                    tracing::debug!("ignoring input submitted while a reply is streaming");
                }
            }
        }
    };

    thinking.finish_and_clear();
    if let TurnOutcome::Completed(reply) = &outcome {
        let response_ms = start_time.elapsed().as_millis() as u64;
        renderer.print_stats_footer(reply.chars().count(), response_ms);
    }
    outcome
}
