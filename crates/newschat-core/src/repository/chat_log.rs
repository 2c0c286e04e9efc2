//! Chat log repository trait definition.

use newschat_types::conversation::Conversation;
use newschat_types::error::RepositoryError;

/// Persistence for conversations: the running chat log and one-off prompt
/// exports.
pub trait ChatLogRepository: Send + Sync {
    /// Overwrite the chat log with the full conversation so far.
    fn save_chat_log(
        &self,
        conversation: &Conversation,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Store the composed prompt for `question`.
    ///
    /// Returns a human-readable location of the written artifact.
    fn save_prompt(
        &self,
        question: &str,
        conversation: &Conversation,
    ) -> impl std::future::Future<Output = Result<String, RepositoryError>> + Send;
}
