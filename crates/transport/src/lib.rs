//! Transport abstraction for correlated request/response exchanges.
//!
//! This crate provides the narrow interface the management layers consume.
//! Specific transport implementations (NATS, in-memory, etc.) are provided
//! in separate crates.
//!
//! Transports handle:
//! - Sending a payload to a subject and waiting for a single correlated reply
//! - Enforcing the caller-supplied timeout on that wait
//! - Connection-level server version negotiation
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod error;

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

pub use error::Error;

/// Message headers: name to one or more values.
pub type Headers = HashMap<String, Vec<String>>;

/// A correlated response received from the server.
#[derive(Debug, Clone)]
pub struct Message {
    /// Subject the response was delivered on.
    pub subject: String,
    /// The response payload.
    pub payload: Bytes,
    /// Response headers, empty when none were sent.
    pub headers: Headers,
}

/// How a transport resolves an in-flight wait that its caller abandons.
///
/// Implementations whose pending waits are simply dropped with the future
/// may ignore this.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CancelPolicy {
    /// Abandon the wait; a late response is discarded.
    #[default]
    Cancel,
    /// Let the wait run to completion in the background.
    Complete,
}

/// Transport trait for single correlated request/response exchanges.
///
/// `Ok(None)` means no response arrived within `timeout`. Dropping the
/// returned future abandons the wait; at this layer that is
/// indistinguishable from a timeout. Transports never retry.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Sends `payload` to `subject` and waits up to `timeout` for a single
    /// correlated response.
    async fn request(
        &self,
        subject: &str,
        payload: Bytes,
        timeout: Duration,
    ) -> Result<Option<Message>, Error>;

    /// Like [`Transport::request`] but carries headers and a policy for
    /// abandoned waits.
    async fn request_with_headers(
        &self,
        subject: &str,
        headers: &Headers,
        payload: Bytes,
        timeout: Duration,
        cancel: CancelPolicy,
    ) -> Result<Option<Message>, Error>;

    /// Whether the connected server reports a version at or above
    /// `version`. Negotiated once at connection time; callers cache the
    /// answer.
    fn is_same_or_newer_than(&self, version: &str) -> bool;
}

/// Lenient server-version comparison.
///
/// Servers report versions like `2.10.14` or `2.11.0-preview.1`; some
/// report short forms like `2.9`. Unparseable versions compare as older.
#[must_use]
pub fn version_at_least(actual: &str, wanted: &str) -> bool {
    match (parse_lenient(actual), parse_lenient(wanted)) {
        (Some(actual), Some(wanted)) => actual >= wanted,
        _ => false,
    }
}

fn parse_lenient(version: &str) -> Option<semver::Version> {
    let version = version.trim().trim_start_matches(['v', 'V']);
    if let Ok(parsed) = semver::Version::parse(version) {
        return Some(parsed);
    }
    // pad short forms ("2.9") out to a full triple
    let (core, pre) = version.split_once('-').unwrap_or((version, ""));
    let mut parts: Vec<&str> = core.split('.').collect();
    while parts.len() < 3 {
        parts.push("0");
    }
    let padded = if pre.is_empty() {
        parts.join(".")
    } else {
        format!("{}-{pre}", parts.join("."))
    };
    semver::Version::parse(&padded).ok()
}
