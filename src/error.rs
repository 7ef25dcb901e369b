//! Error type shared by the collection, storage and command layers.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TodoError {
    #[error("invalid index {index} (collection has {len} task(s))")]
    InvalidIndex { index: i64, len: usize },

    #[error("title must not be empty")]
    EmptyTitle,

    #[error("invalid due date '{0}', please use DD.MM.YYYY")]
    InvalidDueDate(String),

    #[error("invalid priority '{0}', please enter 1 (High), 2 (Medium) or 3 (Low)")]
    InvalidPriority(String),

    #[error("invalid choice '{0}', no changes made")]
    InvalidChoice(String),

    #[error("invalid command, see --help")]
    InvalidCommand,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to parse todo store: {0}")]
    Json(#[from] serde_json::Error),
}

impl TodoError {
    /// Process exit status for this error.
    ///
    /// An out-of-range index is reported but leaves nothing half-done, so the
    /// invocation still ends normally.
    pub fn exit_code(&self) -> i32 {
        match self {
            TodoError::InvalidIndex { .. } => 0,
            _ => 1,
        }
    }
}
