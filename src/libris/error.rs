use crate::validation::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LibrisError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Book not found: {0}")]
    BookNotFound(String),

    #[error("Book not available for checkout: {0}")]
    NotAvailable(String),

    #[error("Book {isbn} not found in checkout list of {user_id}")]
    LoanNotFound { user_id: String, isbn: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl LibrisError {
    /// Errors the interactive menu reports and moves past, as opposed to
    /// storage failures that end the session.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            LibrisError::Validation(_)
                | LibrisError::BookNotFound(_)
                | LibrisError::NotAvailable(_)
                | LibrisError::LoanNotFound { .. }
                | LibrisError::Api(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, LibrisError>;
