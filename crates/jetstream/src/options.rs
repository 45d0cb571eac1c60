//! Construction-time configuration for the management façade.

use std::time::Duration;

/// Default API subject prefix.
pub const DEFAULT_API_PREFIX: &str = "$JS.API.";

/// Immutable configuration for a [`crate::JetStreamManager`], supplied at
/// construction.
#[derive(Clone, Debug)]
pub struct JetStreamOptions {
    /// Subject prefix for API requests; the multi-tenant namespace.
    pub prefix: String,

    /// How long each API exchange waits for its response.
    pub request_timeout: Duration,

    /// Timeout used for consumer-creation exchanges.
    pub connection_timeout: Duration,

    /// Forces legacy consumer creation even on servers that support the
    /// versioned API.
    pub opt_out_versioned_consumer_create: bool,
}

impl Default for JetStreamOptions {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_API_PREFIX.to_owned(),
            request_timeout: Duration::from_secs(5),
            connection_timeout: Duration::from_secs(5),
            opt_out_versioned_consumer_create: false,
        }
    }
}

impl JetStreamOptions {
    /// Options using a custom subject prefix, normalized to end with `.`.
    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        let mut prefix = prefix.into();
        if !prefix.ends_with('.') {
            prefix.push('.');
        }
        Self {
            prefix,
            ..Self::default()
        }
    }

    /// Options addressing a JetStream domain: `$JS.{domain}.API.`.
    #[must_use]
    pub fn with_domain(domain: &str) -> Self {
        Self::with_prefix(format!("$JS.{domain}.API"))
    }
}
