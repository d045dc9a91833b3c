//! Wire-level client for the airscope scanner daemon.
//!
//! The scanner exposes a single read-only endpoint, `GET /api/devices`,
//! returning the full set of currently-visible wireless devices as one
//! JSON snapshot. This crate owns the HTTP transport and the wire types;
//! `airscope-core` converts them into the domain model.

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::SnapshotClient;
pub use error::Error;
pub use transport::TransportConfig;
pub use types::{DeviceRecord, DevicesResponse};
