// Shared transport configuration for building reqwest::Client instances.
//
// The scanner daemon normally runs on the local machine over plain HTTP,
// but a remote deployment behind a self-signed cert is supported.

use std::time::Duration;

/// Transport configuration for the snapshot client.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Per-request timeout. Must stay well under the poll interval so a
    /// hung upstream cannot stack requests.
    pub timeout: Duration,
    /// Accept self-signed certificates when the endpoint is HTTPS.
    pub danger_accept_invalid_certs: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            danger_accept_invalid_certs: false,
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, crate::error::Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("airscope/", env!("CARGO_PKG_VERSION")));

        if self.danger_accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        Ok(builder.build()?)
    }
}
