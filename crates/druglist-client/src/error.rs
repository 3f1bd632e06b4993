use std::time::Duration;
use thiserror::Error;

/// Failures talking to the druglist API.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    #[error("invalid URL {url}: {source}")]
    InvalidUri {
        url: String,
        #[source]
        source: http::uri::InvalidUri,
    },

    #[error("failed to build request: {0}")]
    Request(#[from] http::Error),

    #[error("request failed: {0}")]
    Transport(#[from] hyper_util::client::legacy::Error),

    #[error("request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    #[error("failed to read response body: {0}")]
    Body(#[from] hyper::Error),

    #[error("{url} returned {status}: {body}")]
    Status {
        url: String,
        status: http::StatusCode,
        body: String,
    },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    /// `true` when the server could not be reached at all (as opposed to
    /// answering with an error).
    pub fn is_unreachable(&self) -> bool {
        matches!(self, ClientError::Transport(_) | ClientError::Timeout { .. })
    }
}
