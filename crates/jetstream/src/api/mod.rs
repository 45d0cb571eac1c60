//! Wire types for the JetStream JSON API.

mod consumer;
mod stream;

pub use consumer::{ConsumerConfig, ConsumerCreateRequest, ConsumerInfo};
pub use stream::{StreamConfig, StreamInfo, StreamInfoOptions, StreamState};

pub(crate) use stream::{ListRequest, StreamInfoPage, StreamInfoRequest, StreamListPage, StreamNamesPage};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// `err_code` the server reports when a consumer does not exist.
pub const CONSUMER_NOT_FOUND: u64 = 10014;

/// A structured error carried inside an API response.
#[derive(Clone, Debug, Deserialize, Error, Serialize)]
#[error("jetstream api error [{code}|{err_code}]: {description}")]
pub struct ApiError {
    /// HTTP-like status code.
    #[serde(default)]
    pub code: u16,
    /// JetStream-specific error code; 0 on servers predating error codes.
    #[serde(default)]
    pub err_code: u64,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
}

#[derive(Deserialize)]
struct ErrorProbe {
    error: Option<ApiError>,
}

/// Decodes an API response payload, surfacing a server-reported error
/// before any typed parsing. Nothing is ever built from an error
/// response.
pub(crate) fn decode<T: DeserializeOwned>(payload: &[u8]) -> Result<T, crate::Error> {
    let probe: ErrorProbe = serde_json::from_slice(payload)?;
    if let Some(error) = probe.error {
        return Err(crate::Error::Api(error));
    }
    Ok(serde_json::from_slice(payload)?)
}
