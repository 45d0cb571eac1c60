use thiserror::Error;

use crate::api::ApiError;

/// Errors surfaced by JetStream management operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The decoded response reported a structured server-side error.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Consumer configuration rejected before any request was sent.
    #[error("invalid consumer configuration: {0}")]
    Config(String),

    /// A request or response payload could not be (de)serialized.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Timeout or no response waiting for the JetStream server. An
    /// interrupted wait is reported the same way.
    #[error("timeout or no response waiting for JetStream server")]
    Timeout,

    /// The transport failed before a response could be correlated.
    #[error(transparent)]
    Transport(#[from] rill_transport::Error),

    /// Named (non-durable) consumer creation requires server 2.9.0 or
    /// later.
    #[error("named consumer creation requires server 2.9.0 or later")]
    VersionedCreateUnavailable,
}
