use thiserror::Error;

/// Failures of a single remote fetch. All of them are terminal for the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Transport failure or a non-success status code.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The body was not valid JSON.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The server answered with an `{"error": ...}` envelope.
    #[error("{0}")]
    Remote(String),

    #[error("Unexpected response format")]
    UnexpectedShape,
}

impl FetchError {
    /// Whether invoking the same fetch again could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FetchError::Http(_))
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<figment::Error> for AppError {
    fn from(err: figment::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
