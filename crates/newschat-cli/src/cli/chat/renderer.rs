//! Terminal output for streamed replies.
//!
//! Tokens are printed raw as they arrive; the stats footer and history
//! previews use `console` styling.

use std::io::Write;

use console::style;

use newschat_types::conversation::Conversation;
use newschat_types::llm::MessageRole;

/// Maximum characters shown per message in `/history`.
const PREVIEW_CHARS: usize = 100;

pub struct ChatRenderer {
    model: String,
}

impl ChatRenderer {
    pub fn new(model: &str) -> Self {
        Self {
            model: model.to_string(),
        }
    }

    /// Print the label that precedes a streamed reply.
    pub fn print_reply_prefix(&self) {
        print!("\n  {} ", style("Reply from GPT:").cyan().bold());
        let _ = std::io::stdout().flush();
    }

    /// Print a single streaming token (raw, no formatting).
    pub fn print_streaming_token(&self, token: &str) {
        print!("{token}");
        let _ = std::io::stdout().flush();
    }

    /// Print the stats footer after a reply.
    ///
    /// Format: "| {chars} chars . {time}s . {model}"
    pub fn print_stats_footer(&self, chars: usize, response_ms: u64) {
        let seconds = response_ms as f64 / 1000.0;
        println!(
            "\n  {} {} chars {} {:.1}s {} {}",
            style("|").dim(),
            style(chars).dim(),
            style("\u{00b7}").dim(),
            style(seconds).dim(),
            style("\u{00b7}").dim(),
            style(&self.model).dim(),
        );
        println!();
    }

    /// Report a failed turn. The conversation is unchanged, so the user can
    /// simply retry.
    pub fn print_turn_error(&self, error: &dyn std::fmt::Display) {
        eprintln!("\n  {} {error}", style("!").red().bold());
        eprintln!("  {}", style("Type a message to retry, /exit to quit.").dim());
    }

    pub fn print_history(&self, conversation: &Conversation) {
        println!();
        if conversation.is_empty() {
            println!("  {}", style("No messages yet.").dim());
        }
        for msg in conversation {
            let label = match msg.role {
                MessageRole::User => style("You").green(),
                MessageRole::Assistant => style("GPT").cyan(),
                MessageRole::System => style("System").dim(),
            };
            println!("  {} {}", label.bold(), preview(&msg.content));
        }
        println!();
    }

    pub fn print_sources(&self, sources: &[String]) {
        println!();
        if sources.is_empty() {
            println!(
                "  {}",
                style("No reference articles in use (none sent yet, references disabled, or budget exhausted).").dim()
            );
        }
        for (i, title) in sources.iter().enumerate() {
            println!("  {} {}", style(format!("{}.", i + 1)).dim(), title);
        }
        println!();
    }
}

/// One-line preview of a message: newlines flattened, long text cut with "...".
fn preview(content: &str) -> String {
    let flat = content.replace('\n', " ");
    if flat.chars().count() > PREVIEW_CHARS {
        let cut: String = flat.chars().take(PREVIEW_CHARS - 3).collect();
        format!("{cut}...")
    } else {
        flat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_short_text_unchanged() {
        assert_eq!(preview("hello"), "hello");
    }

    #[test]
    fn preview_flattens_newlines() {
        assert_eq!(preview("<<T>>\nbody"), "<<T>> body");
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        let long = "é".repeat(150);
        let p = preview(&long);
        assert!(p.ends_with("..."));
        assert_eq!(p.chars().count(), PREVIEW_CHARS);
    }
}
