//! CLI command definitions and dispatch for the `newschat` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod chat;
pub mod corpus;
pub mod prompt;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use indicatif::{ProgressBar, ProgressStyle};

use newschat_types::llm::Temperature;

/// Chat about recent news, grounded in embedded articles.
#[derive(Parser)]
#[command(name = "newschat", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    /// Data directory (default: $NEWSCHAT_DATA_DIR, then ~/.newschat).
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat over the embedded corpus.
    Chat {
        /// Sampling temperature between 0 and 2 (default from config, 0.8).
        #[arg(long)]
        temperature: Option<Temperature>,

        /// Do not send reference articles; ask the model directly.
        #[arg(long)]
        no_reference: bool,
    },

    /// Fetch news for a keyword, embed the titles and save the corpus.
    BuildCorpus {
        /// Keyword used to search news articles.
        #[arg(long)]
        keyword: String,
    },

    /// Compose the reference prompt for a question and save it as JSON.
    Prompt {
        /// Question to build the prompt for.
        #[arg(long)]
        question: String,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Steady-ticking spinner with a message, cleared by the caller.
pub(crate) fn spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
