//! JSON file chat log repository (`chat_log.json`, `prompt_for_Q_*.json`).

use std::path::{Path, PathBuf};

use newschat_core::repository::chat_log::ChatLogRepository;
use newschat_types::conversation::Conversation;
use newschat_types::error::RepositoryError;

use super::write_json;

/// File name of the running chat log inside the data directory.
pub const CHAT_LOG_FILE: &str = "chat_log.json";

/// File name for an exported prompt: spaces and path separators in the
/// question become underscores.
pub fn prompt_file_name(question: &str) -> String {
    let stem: String = question
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            other => other,
        })
        .collect();
    format!("prompt_for_Q_{stem}.json")
}

/// Writes conversations as bare JSON arrays of `{role, content}` objects.
#[derive(Debug, Clone)]
pub struct JsonChatLogRepository {
    dir: PathBuf,
}

impl JsonChatLogRepository {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            dir: data_dir.to_path_buf(),
        }
    }

    pub fn chat_log_path(&self) -> PathBuf {
        self.dir.join(CHAT_LOG_FILE)
    }

    pub fn prompt_path(&self, question: &str) -> PathBuf {
        self.dir.join(prompt_file_name(question))
    }
}

impl ChatLogRepository for JsonChatLogRepository {
    async fn save_chat_log(&self, conversation: &Conversation) -> Result<(), RepositoryError> {
        let path = self.chat_log_path();
        write_json(&path, conversation).await?;
        tracing::debug!(path = %path.display(), messages = conversation.len(), "chat log saved");
        Ok(())
    }

    async fn save_prompt(
        &self,
        question: &str,
        conversation: &Conversation,
    ) -> Result<String, RepositoryError> {
        let path = self.prompt_path(question);
        write_json(&path, conversation).await?;
        Ok(path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use newschat_types::llm::Message;
    use tempfile::tempdir;

    fn conversation() -> Conversation {
        Conversation::new()
            .with(Message::system("sys"))
            .with(Message::user("hi"))
            .with(Message::assistant("hello"))
    }

    #[test]
    fn test_prompt_file_name() {
        assert_eq!(
            prompt_file_name("What is new in AI"),
            "prompt_for_Q_What_is_new_in_AI.json"
        );
        assert_eq!(prompt_file_name("a/b"), "prompt_for_Q_a_b.json");
    }

    #[tokio::test]
    async fn test_chat_log_is_bare_message_array() {
        let tmp = tempdir().unwrap();
        let repo = JsonChatLogRepository::new(tmp.path());

        repo.save_chat_log(&conversation()).await.unwrap();

        let content = tokio::fs::read_to_string(tmp.path().join(CHAT_LOG_FILE))
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                {"role": "system", "content": "sys"},
                {"role": "user", "content": "hi"},
                {"role": "assistant", "content": "hello"}
            ])
        );
    }

    #[tokio::test]
    async fn test_chat_log_is_overwritten_each_turn() {
        let tmp = tempdir().unwrap();
        let repo = JsonChatLogRepository::new(tmp.path());

        repo.save_chat_log(&Conversation::new().with(Message::user("first")))
            .await
            .unwrap();
        repo.save_chat_log(&conversation()).await.unwrap();

        let content = tokio::fs::read_to_string(repo.chat_log_path()).await.unwrap();
        let loaded: Conversation = serde_json::from_str(&content).unwrap();
        assert_eq!(loaded.len(), 3);
    }

    #[tokio::test]
    async fn test_save_prompt_returns_location() {
        let tmp = tempdir().unwrap();
        let repo = JsonChatLogRepository::new(tmp.path());

        let location = repo.save_prompt("is ai safe", &conversation()).await.unwrap();

        assert!(location.ends_with("prompt_for_Q_is_ai_safe.json"));
        assert!(tmp.path().join("prompt_for_Q_is_ai_safe.json").exists());
    }
}
