use thiserror::Error;

/// Top-level error type for the `airscope-api` crate.
///
/// Covers every failure mode of the snapshot endpoint: transport,
/// non-success HTTP statuses, and payload decoding. `airscope-core`
/// maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing or joining error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The endpoint answered with a non-success status.
    #[error("Endpoint error: HTTP {status}")]
    Endpoint { status: u16 },

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying on the
    /// next poll cycle.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Endpoint { status } => *status >= 500,
            _ => false,
        }
    }
}
