use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("query parse error: {0}")]
    QueryParse(String),

    #[error("invalid document: {0}")]
    InvalidDocument(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ScanError>;
