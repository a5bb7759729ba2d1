use thiserror::Error;

pub type Result<T> = std::result::Result<T, WizardError>;

/// Errors produced by the wizard engine and its collaborators.
///
/// `CatalogFetch` and `AnswerFetch` are fatal to initialization: the wizard
/// stays in `Loading` and the caller may retry. `AnswerWrite` is recoverable,
/// the answer stays dirty and is retried on the next sync. `Validation` never
/// reaches the network layer and is surfaced inline by callers.
#[derive(Error, Debug)]
pub enum WizardError {
    #[error("failed to fetch question catalog: {0}")]
    CatalogFetch(String),

    #[error("failed to fetch answer snapshot: {0}")]
    AnswerFetch(String),

    #[error("failed to persist answer '{question}': {message}")]
    AnswerWrite { question: String, message: String },

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("question not found: {0}")]
    QuestionNotFound(String),

    #[error("session not found: {0}")]
    SessionNotFound(String),

    #[error("invalid transition: {0}")]
    InvalidTransition(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<sqlx::Error> for WizardError {
    fn from(err: sqlx::Error) -> Self {
        WizardError::Storage(err.to_string())
    }
}
