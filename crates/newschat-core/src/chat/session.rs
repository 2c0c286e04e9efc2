//! Chat session: one conversation, many turns.
//!
//! A turn is committed atomically. The outgoing messages and the assistant
//! reply are appended only after the reply stream has been fully aggregated,
//! so a failed turn (or a dropped turn future) leaves the conversation exactly
//! as it was.

use std::sync::Arc;

use newschat_types::config::{GlobalConfig, OverflowPolicy};
use newschat_types::conversation::Conversation;
use newschat_types::error::RankError;
use newschat_types::llm::{CompletionRequest, LlmError, Message, Temperature};

use crate::llm::aggregator::aggregate;
use crate::llm::provider::CompletionProvider;
use crate::prompt::assembler::ContextAssembler;
use crate::prompt::composer;
use crate::retrieval::embedder::Embedder;
use crate::retrieval::store::VectorStore;

/// Errors that end a single turn. The session itself stays usable.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error(transparent)]
    Rank(#[from] RankError),

    #[error("completion failed: {0}")]
    Llm(#[from] LlmError),

    #[error("embedding the question failed: {0}")]
    Embedding(#[source] LlmError),
}

/// Per-session settings.
#[derive(Debug, Clone)]
pub struct ChatSettings {
    pub model: String,
    pub temperature: Temperature,
    pub budget: usize,
    pub policy: OverflowPolicy,
    /// When false, the first turn sends the bare question with no articles.
    pub use_reference: bool,
}

impl ChatSettings {
    pub fn from_config(config: &GlobalConfig) -> Self {
        Self {
            model: config.chat_model.clone(),
            temperature: config.default_temperature,
            budget: config.reference_budget_chars,
            policy: config.overflow_policy,
            use_reference: true,
        }
    }

    pub fn assembler(&self) -> ContextAssembler {
        ContextAssembler::new(self.budget, self.policy)
    }
}

/// The opening conversation for a question, plus the titles of the articles
/// that made it into the reference block.
#[derive(Debug, Clone)]
pub struct OpeningPrompt {
    pub conversation: Conversation,
    pub sources: Vec<String>,
}

/// Embed `question`, rank the store against it and compose the opening
/// conversation from the reference block that fits the budget.
pub async fn prepare_opening<E: Embedder>(
    store: &VectorStore,
    embedder: &E,
    assembler: &ContextAssembler,
    question: &str,
) -> Result<OpeningPrompt, ChatError> {
    let query = embedder.embed(question).await.map_err(ChatError::Embedding)?;
    let ranked = store.rank(&query.vector)?;
    let block = assembler.assemble(&ranked);

    if block.is_empty() && !ranked.is_empty() {
        tracing::warn!(
            budget = assembler.budget(),
            top_article = ranked[0].item.title(),
            "reference budget exhausted by the top-ranked article; sending no references"
        );
    }

    let sources = ranked[..block.included()]
        .iter()
        .map(|r| r.item.title().to_string())
        .collect();

    tracing::debug!(
        ranked = ranked.len(),
        included = block.included(),
        used_chars = block.used_chars(),
        truncated = block.truncated(),
        "reference block assembled"
    );

    Ok(OpeningPrompt {
        conversation: composer::compose(block.text(), question),
        sources,
    })
}

/// An interactive chat session over a fixed corpus.
pub struct ChatSession<P: CompletionProvider, E: Embedder> {
    provider: P,
    embedder: E,
    store: Arc<VectorStore>,
    settings: ChatSettings,
    conversation: Conversation,
    sources: Vec<String>,
    turns: u32,
}

impl<P: CompletionProvider, E: Embedder> ChatSession<P, E> {
    pub fn new(provider: P, embedder: E, store: Arc<VectorStore>, settings: ChatSettings) -> Self {
        Self {
            provider,
            embedder,
            store,
            settings,
            conversation: Conversation::new(),
            sources: Vec::new(),
            turns: 0,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn settings(&self) -> &ChatSettings {
        &self.settings
    }

    /// Titles of the articles included in the first turn's reference block.
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Number of completed turns.
    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Run one turn and return the assistant reply.
    ///
    /// Each text delta is passed to `on_delta` as it arrives. The conversation
    /// is only updated when the whole reply has been received.
    pub async fn ask(
        &mut self,
        text: &str,
        mut on_delta: impl FnMut(&str),
    ) -> Result<String, ChatError> {
        let (outgoing, sources) = if self.conversation.is_empty() {
            if self.settings.use_reference {
                let opening = prepare_opening(
                    &self.store,
                    &self.embedder,
                    &self.settings.assembler(),
                    text,
                )
                .await?;
                (opening.conversation, Some(opening.sources))
            } else {
                (composer::compose_without_reference(text), None)
            }
        } else {
            (composer::append_user(self.conversation.clone(), text), None)
        };

        let request = CompletionRequest {
            model: self.settings.model.clone(),
            messages: outgoing.messages().to_vec(),
            temperature: self.settings.temperature,
            stream: true,
        };

        tracing::debug!(
            provider = self.provider.name(),
            model = %request.model,
            messages = request.messages.len(),
            "sending turn"
        );

        let reply = aggregate(self.provider.stream_lines(request), &mut on_delta).await?;

        self.conversation = outgoing.with(Message::assistant(reply.clone()));
        if let Some(sources) = sources {
            self.sources = sources;
        }
        self.turns += 1;

        tracing::info!(
            turn = self.turns,
            reply_chars = reply.chars().count(),
            "turn complete"
        );
        Ok(reply)
    }
}
