//! First-turn conversation composer.
//!
//! The system instruction refers to the `<<question>>` marker and to the
//! `<<title>>` headers produced by the assembler, so both formats are part of
//! the contract with the model and must not drift.

use newschat_types::conversation::Conversation;
use newschat_types::llm::Message;

/// Marker placed between the reference block and the question.
pub const QUESTION_MARKER: &str = "<<question>>";

/// Fixed instruction describing the assistant's role and citation rule.
pub const SYSTEM_DESCRIPTION: &str = "You are a helpful assistant to answer to a question based on the news articles provided. \
The question follows after <<question>>, where 'question' is a fixed value. \
One or more news articles are provided with <<source_name>>, where 'source_name' is a title of the news article. \
You must cite the title of the news article you are referring to at the end of your answer. \
If you cannot answer the question based on the reference news articles, do not make up information; \
suggest possible topics that can be answered based on the news articles provided. ";

/// Compose the opening conversation: system instruction, then the reference
/// block followed by the question.
pub fn compose(reference_block: &str, question: &str) -> Conversation {
    Conversation::new()
        .with(Message::system(SYSTEM_DESCRIPTION))
        .with(Message::user(format!(
            "{reference_block}\n\n{QUESTION_MARKER}\n{question}"
        )))
}

/// Opening conversation when reference articles are disabled: the bare question.
pub fn compose_without_reference(question: &str) -> Conversation {
    Conversation::new().with(Message::user(question))
}

/// Append a follow-up user message. The reference context from the first
/// turn stays as it is.
pub fn append_user(conversation: Conversation, text: &str) -> Conversation {
    conversation.with(Message::user(text))
}
