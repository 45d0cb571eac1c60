//! The JetStream management façade.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use rill_transport::{CancelPolicy, Headers, Message, Transport};
use tracing::{debug, warn};

use crate::api::{
    self, ApiError, CONSUMER_NOT_FOUND, ConsumerConfig, ConsumerCreateRequest, ConsumerInfo,
    StreamInfo, StreamInfoOptions,
};
use crate::cache::{CachedStreamInfo, StreamInfoCache};
use crate::paged::{PageReader, StreamInfoReader, StreamListReader, StreamNamesReader};
use crate::subject::{self, CreatePlan};
use crate::subscription::SubscriptionHandle;
use crate::{Error, JetStreamOptions};

/// Management façade for JetStream streams and consumers.
///
/// Turns high-level operations into request/response exchanges against
/// the server, hiding server-version differences, paginated responses,
/// and the shared stream metadata cache. Safe to share across tasks;
/// cloning is cheap and clones share the cache.
pub struct JetStreamManager<T: Transport> {
    transport: Arc<T>,
    options: JetStreamOptions,
    versioned_create_available: bool,
    cache: Arc<StreamInfoCache>,
}

impl<T: Transport> Clone for JetStreamManager<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            options: self.options.clone(),
            versioned_create_available: self.versioned_create_available,
            cache: self.cache.clone(),
        }
    }
}

impl<T: Transport> JetStreamManager<T> {
    /// Creates a manager over `transport`.
    ///
    /// The versioned consumer-creation feature flag is fixed here, for
    /// the manager's lifetime, from the negotiated server version and
    /// the opt-out in `options`.
    #[must_use]
    pub fn new(transport: Arc<T>, options: JetStreamOptions) -> Self {
        let versioned_create_available = transport.is_same_or_newer_than("2.9.0")
            && !options.opt_out_versioned_consumer_create;
        Self {
            transport,
            options,
            versioned_create_available,
            cache: Arc::new(StreamInfoCache::default()),
        }
    }

    // ------------------------------------------------------------------
    // Request execution
    // ------------------------------------------------------------------

    fn prefixed_subject(&self, subject: &str) -> String {
        format!("{}{subject}", self.options.prefix)
    }

    /// Performs one prefixed API exchange; a response must exist.
    async fn execute(
        &self,
        subject: &str,
        payload: Bytes,
        timeout: Duration,
    ) -> Result<Message, Error> {
        let subject = self.prefixed_subject(subject);
        debug!(%subject, "jetstream api request");
        self.transport
            .request(&subject, payload, timeout)
            .await?
            .ok_or(Error::Timeout)
    }

    /// Raw-subject exchange carrying headers; a response must exist. The
    /// API prefix is not applied.
    ///
    /// # Errors
    ///
    /// [`Error::Timeout`] when no response arrives, [`Error::Transport`]
    /// when the exchange itself fails.
    pub async fn execute_internal(
        &self,
        subject: &str,
        headers: &Headers,
        payload: Bytes,
        timeout: Duration,
        cancel: CancelPolicy,
    ) -> Result<Message, Error> {
        self.transport
            .request_with_headers(subject, headers, payload, timeout, cancel)
            .await?
            .ok_or(Error::Timeout)
    }

    // ------------------------------------------------------------------
    // Consumers
    // ------------------------------------------------------------------

    /// Fetches server-confirmed info for a consumer.
    ///
    /// # Errors
    ///
    /// [`Error::Api`] for any server-reported error, including
    /// not-found; see [`Self::lookup_consumer_info`] for the optional
    /// variant.
    pub async fn get_consumer_info(
        &self,
        stream: &str,
        consumer: &str,
    ) -> Result<ConsumerInfo, Error> {
        let message = self
            .execute(
                &subject::consumer_info(stream, consumer),
                Bytes::new(),
                self.options.request_timeout,
            )
            .await?;
        api::decode(&message.payload)
    }

    /// Creates a consumer on `stream`.
    ///
    /// The request shape is selected from the negotiated feature level
    /// and the configuration: versioned creation addressed by the
    /// effective consumer name (explicit name, else durable, else a
    /// freshly generated unique name), legacy creation split on
    /// durability.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] when `name` and `durable_name` differ,
    /// [`Error::VersionedCreateUnavailable`] for a named consumer
    /// against a pre-2.9.0 server (no request is sent), [`Error::Api`]
    /// when the server rejects the creation.
    pub async fn create_consumer(
        &self,
        stream: &str,
        config: &ConsumerConfig,
    ) -> Result<ConsumerInfo, Error> {
        config.validate()?;
        let plan = CreatePlan::resolve(self.versioned_create_available, config)?;

        let request = ConsumerCreateRequest {
            stream_name: stream.to_owned(),
            config: config.clone(),
        };
        let payload = Bytes::from(serde_json::to_vec(&request)?);

        let message = self
            .execute(
                &plan.subject(stream),
                payload,
                self.options.connection_timeout,
            )
            .await?;
        api::decode(&message.payload)
    }

    /// Creates a consumer for a subscription that was opened before the
    /// consumer was confirmed.
    ///
    /// On success the resolved consumer name is recorded on the handle.
    /// On any failure the handle is unsubscribed exactly once before the
    /// original failure is returned, so no subscription is left dangling
    /// without a backing consumer.
    ///
    /// # Errors
    ///
    /// Whatever [`Self::create_consumer`] fails with; a failure of the
    /// compensating unsubscribe itself is logged, not raised.
    pub async fn create_consumer_or_unsubscribe<S: SubscriptionHandle>(
        &self,
        stream: &str,
        config: &ConsumerConfig,
        subscription: &mut S,
    ) -> Result<ConsumerInfo, Error> {
        match self.create_consumer(stream, config).await {
            Ok(info) => {
                subscription.set_consumer_name(&info.name);
                Ok(info)
            }
            Err(error) => {
                if let Err(unsubscribe_error) = subscription.unsubscribe().await {
                    warn!(
                        error = %unsubscribe_error,
                        "failed to unsubscribe after consumer creation failure"
                    );
                }
                Err(error)
            }
        }
    }

    /// Like [`Self::get_consumer_info`] but translates "consumer not
    /// found" into `None` instead of failing. The primary signal is the
    /// structured `err_code`; for servers predating error codes, a 404
    /// whose description mentions "consumer" is accepted too. This is
    /// the only place a not-found condition is swallowed.
    ///
    /// # Errors
    ///
    /// Every other failure propagates unchanged.
    pub async fn lookup_consumer_info(
        &self,
        stream: &str,
        consumer: &str,
    ) -> Result<Option<ConsumerInfo>, Error> {
        match self.get_consumer_info(stream, consumer).await {
            Ok(info) => Ok(Some(info)),
            Err(Error::Api(error)) if is_consumer_not_found(&error) => Ok(None),
            Err(error) => Err(error),
        }
    }

    // ------------------------------------------------------------------
    // Streams
    // ------------------------------------------------------------------

    /// Fetches full stream info, assembling the subject map from as many
    /// pages as the server needs. Every successful fetch refreshes the
    /// cache entry for `stream`.
    ///
    /// # Errors
    ///
    /// Any page failure aborts the whole fetch; nothing partial is
    /// cached or returned.
    pub async fn get_stream_info(
        &self,
        stream: &str,
        options: StreamInfoOptions,
    ) -> Result<StreamInfo, Error> {
        let info = self
            .read_paged(&subject::stream_info(stream), StreamInfoReader::new(options))
            .await?;
        self.cache.store(stream, &info);
        Ok(info)
    }

    /// Returns the cached projection for `stream`, fetching the full
    /// info (and thereby populating the cache) only on a miss.
    ///
    /// # Errors
    ///
    /// Fails only when the miss-path fetch fails.
    pub async fn cached_stream_info(&self, stream: &str) -> Result<CachedStreamInfo, Error> {
        if let Some(cached) = self.cache.get(stream) {
            return Ok(cached);
        }
        let info = self
            .get_stream_info(stream, StreamInfoOptions::default())
            .await?;
        Ok(CachedStreamInfo::from(&info))
    }

    /// Lists stream names, optionally filtered by subject, across as
    /// many pages as the server reports.
    ///
    /// # Errors
    ///
    /// Any page failure aborts the listing; partial accumulation is
    /// discarded.
    pub async fn get_stream_names(
        &self,
        subject_filter: Option<&str>,
    ) -> Result<Vec<String>, Error> {
        self.read_paged(subject::STREAM_NAMES, StreamNamesReader::new(subject_filter))
            .await
    }

    /// Lists full stream info objects, optionally filtered by subject,
    /// refreshing the cache entry of every stream returned.
    ///
    /// # Errors
    ///
    /// Any page failure aborts the listing; nothing partial is cached.
    pub async fn get_streams(
        &self,
        subject_filter: Option<&str>,
    ) -> Result<Vec<StreamInfo>, Error> {
        let infos = self
            .read_paged(subject::STREAM_LIST, StreamListReader::new(subject_filter))
            .await?;
        self.cache.store_all(&infos);
        Ok(infos)
    }

    /// Resolves the single stream listening on `subject`. Zero matches
    /// and multiple matches are both "no unambiguous answer", not
    /// errors.
    ///
    /// # Errors
    ///
    /// Fails only when the underlying listing fails.
    pub async fn lookup_stream_by_subject(
        &self,
        subject: &str,
    ) -> Result<Option<String>, Error> {
        let mut names = self.get_stream_names(Some(subject)).await?;
        if names.len() == 1 {
            Ok(names.pop())
        } else {
            Ok(None)
        }
    }

    async fn read_paged<R: PageReader>(
        &self,
        subject: &str,
        mut reader: R,
    ) -> Result<R::Output, Error> {
        while reader.has_more() {
            let payload = reader.next_request()?;
            let message = self
                .execute(subject, payload, self.options.request_timeout)
                .await?;
            reader.process(&message.payload)?;
        }
        Ok(reader.finish())
    }
}

fn is_consumer_not_found(error: &ApiError) -> bool {
    // the 404 text match keeps compatibility with servers that predate
    // structured error codes
    error.err_code == CONSUMER_NOT_FOUND
        || (error.code == 404 && error.description.contains("consumer"))
}
