//! JetStream management façade for a pub/sub messaging client.
//!
//! Turns high-level operations — create a consumer, fetch stream
//! metadata, list streams — into request/response exchanges against the
//! server, reconciling server feature availability, single-page vs
//! multi-page responses, and ephemeral/durable/named consumer semantics
//! behind one uniform API. The underlying connection is consumed through
//! the narrow [`rill_transport::Transport`] interface; pair the manager
//! with `rill-transport-nats` against a real server or with
//! `rill-transport-memory` in tests.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod api;

mod cache;
mod error;
mod manager;
mod options;
mod paged;
mod subject;
mod subscription;

pub use cache::CachedStreamInfo;
pub use error::Error;
pub use manager::JetStreamManager;
pub use options::{DEFAULT_API_PREFIX, JetStreamOptions};
pub use subscription::SubscriptionHandle;
