// src/error.rs
use thiserror::Error;

/// Everything that can go wrong while turning the remote sheet into records.
///
/// Nothing past the ingestion boundary sees these: the refresher logs them and
/// turns them into a status message, keeping the previous snapshot.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    #[error("malformed payload: {0}")]
    Malformed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification used for logging and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    TransportFailure,
    MalformedPayload,
}

impl IngestError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            IngestError::Transport(_) | IngestError::Http { .. } | IngestError::Io(_) => {
                ErrorKind::TransportFailure
            }
            IngestError::Malformed(_) => ErrorKind::MalformedPayload,
        }
    }
}

impl From<reqwest::Error> for IngestError {
    fn from(e: reqwest::Error) -> Self {
        IngestError::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for IngestError {
    fn from(e: serde_json::Error) -> Self {
        IngestError::Malformed(e.to_string())
    }
}

pub type Result<T, E = IngestError> = std::result::Result<T, E>;
