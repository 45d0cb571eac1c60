//! In-memory transport implementation for testing
//!
//! Routes requests to handlers registered against subject prefixes within
//! the same process, recording every exchange, perfect for testing and
//! development scenarios. A handler that stays silent looks exactly like a
//! request that timed out.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use rill_transport::{CancelPolicy, Error, Headers, Message, Transport};
use tracing::debug;

/// What a registered handler produces for a request.
#[derive(Debug)]
pub enum Reply {
    /// Respond with this payload.
    Message(Bytes),
    /// Do not respond; the caller observes a timeout.
    Silence,
}

/// One request observed by the transport.
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    /// The subject the request was sent to.
    pub subject: String,
    /// The request payload.
    pub payload: Bytes,
    /// Headers carried by the request, empty for the plain entry point.
    pub headers: Headers,
}

type Handler = Box<dyn Fn(&RecordedRequest) -> Reply + Send + Sync>;

/// Memory transport implementation.
///
/// Handlers are matched by subject prefix in registration order; a subject
/// no handler matches yields silence.
pub struct MemoryTransport {
    server_version: String,
    handlers: RwLock<Vec<(String, Handler)>>,
    requests: Mutex<Vec<RecordedRequest>>,
    reply_seq: AtomicU64,
}

impl MemoryTransport {
    /// Creates a memory transport reporting server version 2.10.0.
    #[must_use]
    pub fn new() -> Self {
        Self::with_server_version("2.10.0")
    }

    /// Creates a memory transport reporting the given server version.
    #[must_use]
    pub fn with_server_version(version: impl Into<String>) -> Self {
        Self {
            server_version: version.into(),
            handlers: RwLock::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
            reply_seq: AtomicU64::new(0),
        }
    }

    /// Registers a handler for subjects starting with `subject_prefix`.
    pub fn handle<F>(&self, subject_prefix: impl Into<String>, handler: F)
    where
        F: Fn(&RecordedRequest) -> Reply + Send + Sync + 'static,
    {
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((subject_prefix.into(), Box::new(handler)));
    }

    /// Every request observed so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of requests observed so far.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn dispatch(&self, request: &RecordedRequest) -> Option<Message> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        let handlers = self.handlers.read().unwrap_or_else(PoisonError::into_inner);
        let matched = handlers
            .iter()
            .find(|(prefix, _)| request.subject.starts_with(prefix.as_str()));

        let Some((prefix, handler)) = matched else {
            debug!(subject = %request.subject, "no handler; staying silent");
            return None;
        };

        debug!(subject = %request.subject, %prefix, "routing request");
        match handler(request) {
            Reply::Message(payload) => Some(Message {
                subject: format!("_INBOX.{}", self.reply_seq.fetch_add(1, Ordering::Relaxed)),
                payload,
                headers: Headers::new(),
            }),
            Reply::Silence => None,
        }
    }
}

impl Default for MemoryTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn request(
        &self,
        subject: &str,
        payload: Bytes,
        _timeout: Duration,
    ) -> Result<Option<Message>, Error> {
        let request = RecordedRequest {
            subject: subject.to_owned(),
            payload,
            headers: Headers::new(),
        };
        Ok(self.dispatch(&request))
    }

    async fn request_with_headers(
        &self,
        subject: &str,
        headers: &Headers,
        payload: Bytes,
        _timeout: Duration,
        _cancel: CancelPolicy,
    ) -> Result<Option<Message>, Error> {
        let request = RecordedRequest {
            subject: subject.to_owned(),
            payload,
            headers: headers.clone(),
        };
        Ok(self.dispatch(&request))
    }

    fn is_same_or_newer_than(&self, version: &str) -> bool {
        rill_transport::version_at_least(&self.server_version, version)
    }
}
