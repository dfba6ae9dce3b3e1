use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unreadable document: {0}")]
    UnreadableDocument(String),
}

pub type Result<T> = std::result::Result<T, Error>;
