//! Server API subject construction.
//!
//! Deterministic template instantiation; subjects produced here are
//! prefixed by the request executor. Name legality is the caller's
//! concern before this layer.

use crate::Error;
use crate::api::ConsumerConfig;

/// Listing of all stream names.
pub(crate) const STREAM_NAMES: &str = "STREAM.NAMES";

/// Listing of full stream info objects.
pub(crate) const STREAM_LIST: &str = "STREAM.LIST";

pub(crate) fn stream_info(stream: &str) -> String {
    format!("STREAM.INFO.{stream}")
}

pub(crate) fn consumer_info(stream: &str, consumer: &str) -> String {
    format!("CONSUMER.INFO.{stream}.{consumer}")
}

/// Consumer-creation request shape, selected once per call from the
/// negotiated feature level and the configuration, separate from any I/O.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum CreatePlan {
    /// 2.9.0+ creation addressed by consumer name, optionally carrying
    /// the filter subject in the subject path.
    Versioned {
        /// Effective consumer name: explicit name, else durable, else
        /// freshly generated.
        name: String,
        /// Absent when the config has no filter or the catch-all `">"`.
        filter: Option<String>,
    },
    /// Legacy creation; the server assigns a transient identity.
    LegacyEphemeral,
    /// Legacy creation keyed by the durable name.
    LegacyDurable {
        /// The durable name.
        durable: String,
    },
}

impl CreatePlan {
    /// Applies the decision table: named consumers require the versioned
    /// API; versioned creation resolves an effective name and folds the
    /// catch-all filter away; legacy creation splits on durability.
    pub(crate) fn resolve(versioned_available: bool, config: &ConsumerConfig) -> Result<Self, Error> {
        if config.name.is_some() && !versioned_available {
            return Err(Error::VersionedCreateUnavailable);
        }

        if versioned_available {
            let name = config
                .name
                .clone()
                .or_else(|| config.durable_name.clone())
                .unwrap_or_else(generate_consumer_name);
            let filter = config
                .filter_subject
                .as_deref()
                .filter(|filter| *filter != ">")
                .map(str::to_owned);
            return Ok(Self::Versioned { name, filter });
        }

        Ok(config.durable_name.clone().map_or(Self::LegacyEphemeral, |durable| {
            Self::LegacyDurable { durable }
        }))
    }

    pub(crate) fn subject(&self, stream: &str) -> String {
        match self {
            Self::Versioned { name, filter: None } => {
                format!("CONSUMER.CREATE.{stream}.{name}")
            }
            Self::Versioned {
                name,
                filter: Some(filter),
            } => format!("CONSUMER.CREATE.{stream}.{name}.{filter}"),
            Self::LegacyEphemeral => format!("CONSUMER.CREATE.{stream}"),
            Self::LegacyDurable { durable } => {
                format!("CONSUMER.DURABLE.CREATE.{stream}.{durable}")
            }
        }
    }
}

fn generate_consumer_name() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
