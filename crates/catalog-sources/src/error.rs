use thiserror::Error;

/// Failure talking to the catalog API or the watch-state store.
///
/// Every variant is non-fatal for a browsing session; callers degrade the
/// affected view and log.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status} from {endpoint}")]
    Status { status: u16, endpoint: String },

    #[error("unauthorized (check the configured API key)")]
    Unauthorized,

    #[error("rate limited by remote service")]
    RateLimited,

    #[error("failed to parse response: {0}")]
    Parse(String),

    #[error("store error: {0}")]
    Store(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SourceError {
    pub fn store(message: impl Into<String>) -> Self {
        SourceError::Store(message.into())
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            SourceError::Parse(e.to_string())
        } else {
            SourceError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(e: serde_json::Error) -> Self {
        SourceError::Parse(e.to_string())
    }
}

/// Map an HTTP status to an error, `None` for success codes
pub fn check_status(status: u16, endpoint: &str) -> Option<SourceError> {
    match status {
        401 => Some(SourceError::Unauthorized),
        429 => Some(SourceError::RateLimited),
        s if s >= 400 => Some(SourceError::Status { status: s, endpoint: endpoint.to_string() }),
        _ => None,
    }
}
