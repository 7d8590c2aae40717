use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("invalid backend base url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("failed to build http client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    #[error("{operation} request failed: {source}")]
    Transport {
        operation: &'static str,
        source: reqwest::Error,
    },
    #[error("{operation} returned status {status}")]
    Status {
        operation: &'static str,
        status: StatusCode,
    },
    #[error("{operation} returned a malformed body: {source}")]
    Decode {
        operation: &'static str,
        source: reqwest::Error,
    },
}

impl BackendError {
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            BackendError::Transport { operation, .. }
            | BackendError::Status { operation, .. }
            | BackendError::Decode { operation, .. } => Some(operation),
            BackendError::InvalidBaseUrl { .. } | BackendError::ClientBuild(_) => None,
        }
    }
}
