//! Transport error types.

use thiserror::Error;

/// Errors raised by a transport before a response could be correlated.
///
/// An absent response (timeout) is not an error at this level; transports
/// report it as `Ok(None)` so callers can apply their own semantics.
#[derive(Debug, Error)]
pub enum Error {
    /// The connection to the server is closed or unusable.
    #[error("connection closed: {0}")]
    ConnectionClosed(String),

    /// Nothing is listening on the requested subject.
    #[error("no responders for subject {0}")]
    NoResponders(String),

    /// The request could not be sent.
    #[error("request failed: {0}")]
    Request(String),
}
