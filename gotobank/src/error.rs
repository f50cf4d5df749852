use std::io;
use std::num::ParseIntError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Response body is not JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Account token is not a valid header value")]
    InvalidToken(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Expected a whole number, got `{input}`")]
    InvalidNumber {
        input: String,
        #[source]
        source: ParseIntError,
    },

    #[error("Input closed before the session ended")]
    InputClosed,

    #[error("Failed to start load generator #{index}: {source}")]
    Spawn {
        index: usize,
        #[source]
        source: io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Launcher task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
