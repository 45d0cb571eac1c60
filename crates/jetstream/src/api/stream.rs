use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The subset of stream configuration this client acts on.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct StreamConfig {
    /// Stream name.
    pub name: String,

    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Subjects retained by the stream.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subjects: Vec<String>,

    /// Whether the server allows direct message access for this stream.
    #[serde(default)]
    pub allow_direct: bool,
}

/// Server-reported stream state.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct StreamState {
    /// Number of messages currently held.
    #[serde(default)]
    pub messages: u64,

    /// Bytes currently held.
    #[serde(default)]
    pub bytes: u64,

    /// Sequence of the first retained message.
    #[serde(default)]
    pub first_seq: u64,

    /// Sequence of the most recent message.
    #[serde(default)]
    pub last_seq: u64,

    /// Number of consumers on the stream.
    #[serde(default)]
    pub consumer_count: u64,

    /// Total distinct subjects in the stream; may exceed the page of
    /// `subjects` carried by any one response.
    #[serde(default)]
    pub num_subjects: u64,

    /// Per-subject message counts. The server paginates this map; a full
    /// fetch may assemble it from several responses.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub subjects: BTreeMap<String, u64>,
}

/// Full server-reported stream configuration and state.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct StreamInfo {
    /// The stream's configuration.
    pub config: StreamConfig,

    /// The stream's current state.
    #[serde(default)]
    pub state: StreamState,
}

/// Options narrowing a stream-info fetch.
#[derive(Clone, Debug, Default)]
pub struct StreamInfoOptions {
    /// Restrict the reported `subjects` map to this pattern.
    pub subjects_filter: Option<String>,

    /// Also report details of deleted messages.
    pub deleted_details: bool,
}

// -- request/response page shapes ------------------------------------------

#[derive(Debug, Serialize)]
pub(crate) struct StreamInfoRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subjects_filter: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub deleted_details: bool,
    pub offset: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StreamInfoPage {
    #[serde(flatten)]
    pub info: StreamInfo,
    #[serde(default)]
    pub total: Option<u64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ListRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub offset: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StreamNamesPage {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub streams: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StreamListPage {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub streams: Option<Vec<StreamInfo>>,
}
