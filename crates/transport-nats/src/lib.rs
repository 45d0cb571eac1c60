//! NATS implementation of the transport abstraction.
//!
//! Adapts an [`async_nats::Client`] to the [`Transport`] trait: the
//! caller-supplied timeout bounds each correlated wait, a timeout is
//! reported as an absent response, and feature negotiation answers from
//! the connected server's reported version.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

use std::time::Duration;

use async_nats::RequestErrorKind;
use async_nats::header::{HeaderMap, HeaderValue};
use async_trait::async_trait;
use bytes::Bytes;
use rill_transport::{CancelPolicy, Error, Headers, Message, Transport};
use tracing::debug;

/// NATS-backed transport.
#[derive(Clone, Debug)]
pub struct NatsTransport {
    client: async_nats::Client,
}

impl NatsTransport {
    /// Wraps an already-connected NATS client.
    #[must_use]
    pub const fn new(client: async_nats::Client) -> Self {
        Self { client }
    }

    fn convert_message(message: async_nats::Message) -> Message {
        let headers = message.headers.map_or_else(Headers::new, |headers| {
            headers
                .iter()
                .map(|(name, values)| {
                    (
                        name.to_string(),
                        values.iter().map(ToString::to_string).collect(),
                    )
                })
                .collect()
        });

        Message {
            subject: message.subject.to_string(),
            payload: message.payload,
            headers,
        }
    }

    fn convert_error(subject: &str, error: &async_nats::RequestError) -> Option<Error> {
        match error.kind() {
            // the client's own deadline fired before ours
            RequestErrorKind::TimedOut => None,
            RequestErrorKind::NoResponders => Some(Error::NoResponders(subject.to_owned())),
            RequestErrorKind::Other => Some(Error::Request(error.to_string())),
        }
    }
}

#[async_trait]
impl Transport for NatsTransport {
    async fn request(
        &self,
        subject: &str,
        payload: Bytes,
        timeout: Duration,
    ) -> Result<Option<Message>, Error> {
        debug!(%subject, ?timeout, "nats request");
        let request = self.client.request(subject.to_owned(), payload);
        match tokio::time::timeout(timeout, request).await {
            Ok(Ok(message)) => Ok(Some(Self::convert_message(message))),
            Ok(Err(error)) => Self::convert_error(subject, &error).map_or(Ok(None), Err),
            Err(_elapsed) => Ok(None),
        }
    }

    async fn request_with_headers(
        &self,
        subject: &str,
        headers: &Headers,
        payload: Bytes,
        timeout: Duration,
        _cancel: CancelPolicy,
    ) -> Result<Option<Message>, Error> {
        let mut header_map = HeaderMap::new();
        for (name, values) in headers {
            for value in values {
                header_map.append(name.as_str(), HeaderValue::from(value.as_str()));
            }
        }

        debug!(%subject, ?timeout, "nats request with headers");
        let request = self
            .client
            .request_with_headers(subject.to_owned(), header_map, payload);
        match tokio::time::timeout(timeout, request).await {
            Ok(Ok(message)) => Ok(Some(Self::convert_message(message))),
            Ok(Err(error)) => Self::convert_error(subject, &error).map_or(Ok(None), Err),
            Err(_elapsed) => Ok(None),
        }
    }

    fn is_same_or_newer_than(&self, version: &str) -> bool {
        rill_transport::version_at_least(&self.client.server_info().version, version)
    }
}
