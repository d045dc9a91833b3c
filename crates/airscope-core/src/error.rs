// ── Core error types ──
//
// User-facing errors from airscope-core. Consumers never see raw reqwest
// errors or serde failures; the From<airscope_api::Error> impl translates
// transport-layer errors into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Cannot reach scanner at {url}: {reason}")]
    EndpointUnreachable { url: String, reason: String },

    #[error("Scanner returned a malformed payload: {message}")]
    BadPayload { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<airscope_api::Error> for CoreError {
    fn from(err: airscope_api::Error) -> Self {
        match err {
            airscope_api::Error::Transport(ref e) => Self::EndpointUnreachable {
                url: e
                    .url()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "<unknown>".into()),
                reason: e.to_string(),
            },
            airscope_api::Error::InvalidUrl(e) => Self::Config {
                message: format!("Invalid URL: {e}"),
            },
            airscope_api::Error::Endpoint { status } => Self::EndpointUnreachable {
                url: String::new(),
                reason: format!("HTTP {status}"),
            },
            airscope_api::Error::Deserialization { message, body: _ } => {
                Self::BadPayload { message }
            }
        }
    }
}
