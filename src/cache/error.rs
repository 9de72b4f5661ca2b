use thiserror::Error;

use crate::fetch::FetchError;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("envelope error: {0}")]
    Envelope(#[from] serde_json::Error),
    #[error("payload decode error: {0}")]
    Decode(String),
    #[error("refresh of section '{section}' failed: {source}")]
    Refresh {
        section: String,
        source: FetchError,
    },
}
