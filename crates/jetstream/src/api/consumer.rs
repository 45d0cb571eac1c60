use serde::{Deserialize, Serialize};

/// Caller-supplied consumer descriptor, read-only once constructed.
///
/// Absent fields are omitted from the JSON payload.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ConsumerConfig {
    /// Explicit consumer name. Creating a named (non-durable) consumer
    /// requires the versioned creation API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Durable name; the consumer's identity and position survive
    /// disconnects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub durable_name: Option<String>,

    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Subject pattern restricting which stream messages the consumer
    /// receives. Absent or `">"` means all subjects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_subject: Option<String>,
}

impl ConsumerConfig {
    /// `name` and `durable_name` must agree when both are supplied.
    pub(crate) fn validate(&self) -> Result<(), crate::Error> {
        if let (Some(name), Some(durable)) = (&self.name, &self.durable_name) {
            if name != durable {
                return Err(crate::Error::Config(format!(
                    "name [{name}] must match durable name [{durable}] when both are supplied"
                )));
            }
        }
        Ok(())
    }
}

/// Payload of every consumer-creation request.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ConsumerCreateRequest {
    /// Stream the consumer is created against.
    pub stream_name: String,
    /// The requested configuration.
    pub config: ConsumerConfig,
}

/// Server-confirmed consumer state.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ConsumerInfo {
    /// Stream the consumer belongs to.
    pub stream_name: String,
    /// The resolved consumer name.
    pub name: String,
    /// Configuration as the server applied it.
    pub config: ConsumerConfig,
}
