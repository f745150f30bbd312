use thiserror::Error;

pub type Result<T> = std::result::Result<T, LogError>;

#[derive(Error, Debug)]
pub enum LogError {
    #[error("Unknown placeholder in log format: {{{0}}}")]
    UnknownPlaceholder(String),

    #[error("Unbalanced brace at byte {0} in log format")]
    UnbalancedBrace(usize),

    #[error("Timestamp formatting error: {0}")]
    Timestamp(#[from] time::error::Format),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
