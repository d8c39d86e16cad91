#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    APIKeyNotFound(#[from] std::env::VarError),
    #[error("Unable to extract a valid arXiv ID from the provided URL")]
    InvalidArxivId,
    #[error("Search query must not be empty")]
    EmptyQuery,
    #[error("No arXiv paper found for ID {0}")]
    PaperNotFound(String),
    #[error("Request failed: {0}")]
    RequestFailed(String),
    #[error("Failed to parse response: {0}")]
    ParseFailed(String),
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Error::RequestFailed(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
