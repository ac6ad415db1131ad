use thiserror::Error;

#[derive(Error, Debug)]
pub enum RevmarkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No changes to annotate")]
    NoChanges,

    #[error("No comments to export - skipping copy")]
    NoComments,

    #[error("Review session corrupted: {0}")]
    CorruptedSession(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Feedback API error: {0}")]
    Feedback(String),
}

pub type Result<T> = std::result::Result<T, RevmarkError>;
