//! Budget-constrained reference block assembly.
//!
//! Walks ranked articles in order and accepts whole bodies while the running
//! character count stays within the budget. The first article that does not
//! fit ends the walk: later articles are never considered, even if one of
//! them alone would fit. Greedy, not optimal packing.
//!
//! Lengths are counted in characters (Unicode scalar values), not bytes, and
//! only article bodies count toward the budget.

use newschat_types::article::RankedArticle;
use newschat_types::config::OverflowPolicy;

/// Separator placed between accepted article blocks.
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Format one article as a reference block entry.
pub fn format_block(title: &str, body: &str) -> String {
    format!("<<{title}>>\n{body}")
}

/// Assemble a reference block with the default [`OverflowPolicy::Skip`].
pub fn assemble(ranked: &[RankedArticle<'_>], budget: usize) -> String {
    ContextAssembler::new(budget, OverflowPolicy::Skip)
        .assemble(ranked)
        .into_text()
}

/// Greedy reference block assembler.
#[derive(Debug, Clone, Copy)]
pub struct ContextAssembler {
    budget: usize,
    policy: OverflowPolicy,
}

/// Result of an assembly pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceBlock {
    text: String,
    included: usize,
    used_chars: usize,
    truncated: bool,
}

impl ReferenceBlock {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    /// Number of articles that made it into the block.
    pub fn included(&self) -> usize {
        self.included
    }

    /// Characters of article body counted against the budget.
    pub fn used_chars(&self) -> usize {
        self.used_chars
    }

    /// Whether the last included article was cut short.
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    pub fn is_empty(&self) -> bool {
        self.included == 0
    }
}

impl ContextAssembler {
    pub fn new(budget: usize, policy: OverflowPolicy) -> Self {
        Self { budget, policy }
    }

    pub fn budget(&self) -> usize {
        self.budget
    }

    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    pub fn assemble(&self, ranked: &[RankedArticle<'_>]) -> ReferenceBlock {
        let mut blocks = Vec::new();
        let mut used = 0usize;
        let mut truncated = false;

        for entry in ranked {
            let body = entry.item.body();
            let len = body.chars().count();

            if used + len <= self.budget {
                blocks.push(format_block(entry.item.title(), body));
                used += len;
                continue;
            }

            if self.policy == OverflowPolicy::Truncate {
                let remaining = self.budget - used;
                if remaining > 0 {
                    let cut: String = body.chars().take(remaining).collect();
                    blocks.push(format_block(entry.item.title(), &cut));
                    used += remaining;
                    truncated = true;
                }
            }
            tracing::debug!(
                title = entry.item.title(),
                body_chars = len,
                used,
                budget = self.budget,
                policy = %self.policy,
                "reference budget reached"
            );
            break;
        }

        ReferenceBlock {
            included: blocks.len(),
            text: blocks.join(BLOCK_SEPARATOR),
            used_chars: used,
            truncated,
        }
    }
}
