//! Filesystem adapters for newschat.
//!
//! JSON file implementations of the repository traits from `newschat-core`,
//! plus data directory resolution. Every artifact lives directly in the data
//! directory:
//!
//! ```text
//! {data_dir}/
//!   config.toml
//!   news_with_embeddings.json
//!   chat_log.json
//!   prompt_for_Q_<question>.json
//! ```

pub mod chat_log;
pub mod corpus;

use std::path::{Path, PathBuf};

use serde::Serialize;

use newschat_types::error::RepositoryError;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "NEWSCHAT_DATA_DIR";

/// Resolve the data directory.
///
/// Priority:
/// 1. An explicit path (the `--data-dir` flag)
/// 2. `NEWSCHAT_DATA_DIR` environment variable
/// 3. `~/.newschat`
/// 4. `./.newschat` when no home directory is known
pub fn resolve_data_dir(explicit: Option<&Path>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }

    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".newschat");
    }

    PathBuf::from(".newschat")
}

/// Serialize `value` as pretty JSON and write it to `path`, creating the
/// parent directory if needed. Overwrites any existing file.
pub(crate) async fn write_json<T: Serialize + ?Sized>(
    path: &Path,
    value: &T,
) -> Result<(), RepositoryError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| RepositoryError::Io(format!("{}: {e}", parent.display())))?;
    }

    tokio::fs::write(path, json)
        .await
        .map_err(|e| RepositoryError::Io(format!("{}: {e}", path.display())))
}
