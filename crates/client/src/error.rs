use taskdeck_core::error::CoreError;

/// Errors from the request gateway.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// The API answered with a non-2xx status. `message` is the API's own
    /// message when the body carried one, else `HTTP error! status: <code>`.
    #[error("{message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Human-readable message.
        message: String,
    },

    /// The HTTP request itself failed (network, DNS, TLS, or an
    /// undecodable success body).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The request body could not be serialized.
    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    /// The configured base URL cannot carry endpoint paths.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
}

impl RequestError {
    /// HTTP status code, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Http { status, .. } => Some(*status),
            RequestError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the failure means the requested resource does not exist:
    /// a 404 status or a message mentioning 404.
    pub fn is_not_found(&self) -> bool {
        match self {
            RequestError::Http { status, message } => *status == 404 || message.contains("404"),
            _ => false,
        }
    }
}

/// Errors from reading or writing the persisted session.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backing store cannot be read or written.
    #[error("Session storage unavailable: {0}")]
    Unavailable(String),

    /// The backing store holds data that is not valid JSON.
    #[error("Session storage is corrupt: {0}")]
    Corrupt(String),
}

/// Top-level error for access-module operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Rejected locally before any request was sent.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Convenience alias for access-module return values.
pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Request(err) if err.is_not_found())
    }
}
