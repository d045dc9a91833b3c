// Snapshot endpoint HTTP client
//
// Wraps `reqwest::Client` with base-URL handling and payload decoding.
// The decode path keeps the raw body around so a malformed payload can be
// reported verbatim instead of as an opaque serde error.

use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;
use crate::types::DevicesResponse;

/// HTTP client for the scanner daemon's snapshot endpoint.
pub struct SnapshotClient {
    http: reqwest::Client,
    base_url: Url,
}

impl SnapshotClient {
    /// Create a client from a base URL (e.g. `http://127.0.0.1:5000`)
    /// and transport settings.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        Ok(Self {
            http,
            base_url: base_url.parse()?,
        })
    }

    /// The configured endpoint base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch the current device snapshot.
    ///
    /// `GET {base}/api/devices`
    pub async fn fetch_devices(&self) -> Result<DevicesResponse, Error> {
        let url = self.base_url.join("api/devices")?;
        debug!(%url, "fetching device snapshot");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Endpoint {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        trace!(bytes = body.len(), "snapshot body received");

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }
}
