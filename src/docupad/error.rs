use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum DocupadError {
    #[error("Document not found: {0}")]
    DocumentNotFound(Uuid),

    #[error("Category not found: {0}")]
    CategoryNotFound(Uuid),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Api Error: {0}")]
    Api(String),

    /// The remote editing service is not configured; no network call was made.
    #[error("Editor not configured: {0}")]
    Configuration(String),

    /// The remote editing service could not be reached, timed out, or
    /// returned something unparseable.
    #[error("Editor service unreachable: {0}")]
    Connectivity(String),

    /// The remote editing service explicitly refused the call.
    #[error("Editor service rejected request: {0}")]
    ServiceRejection(String),
}

pub type Result<T> = std::result::Result<T, DocupadError>;
