//! Welcome banner display for chat sessions.

use console::style;

/// Session facts shown in the banner.
pub struct BannerInfo<'a> {
    pub model: &'a str,
    pub session_id: &'a str,
    pub articles: usize,
    pub budget_chars: usize,
    pub use_reference: bool,
}

/// Print the welcome banner at the start of a chat session.
pub fn print_welcome_banner(info: &BannerInfo<'_>) {
    println!();
    println!("  * {}", style("newschat").cyan().bold());
    println!("  {}", style("Ask questions about the embedded news articles").dim());
    println!();
    println!("  {}  {}", style("Model:").bold(), style(info.model).dim());
    println!(
        "  {}  {}",
        style("Corpus:").bold(),
        style(corpus_summary(info)).dim()
    );
    println!(
        "  {}  {}",
        style("Session:").bold(),
        style(short_id(info.session_id)).dim()
    );
    println!();
    println!("  {}", style("Type /help for commands, Ctrl+D to exit").dim());
    println!("  {}", style("---").dim());
    println!();
}

fn corpus_summary(info: &BannerInfo<'_>) -> String {
    if info.use_reference {
        format!(
            "{} articles, {} char reference budget",
            info.articles, info.budget_chars
        )
    } else {
        "references disabled".to_string()
    }
}

/// First 8 characters of a session ID.
fn short_id(id: &str) -> &str {
    id.char_indices().nth(8).map_or(id, |(i, _)| &id[..i])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_id_truncates() {
        assert_eq!(short_id("0190a1b2-c3d4-7e5f"), "0190a1b2");
        assert_eq!(short_id("abc"), "abc");
    }

    #[test]
    fn corpus_summary_modes() {
        let mut info = BannerInfo {
            model: "gpt-3.5-turbo",
            session_id: "x",
            articles: 42,
            budget_chars: 10_000,
            use_reference: true,
        };
        assert_eq!(corpus_summary(&info), "42 articles, 10000 char reference budget");
        info.use_reference = false;
        assert_eq!(corpus_summary(&info), "references disabled");
    }
}
