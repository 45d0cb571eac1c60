//! Shared stream metadata cache.

use dashmap::DashMap;

use crate::api::StreamInfo;

/// Minimal projection of a stream's configuration, kept for fast-path
/// decisions without a network round trip.
///
/// Only ever derived from a [`StreamInfo`] that passed server-side error
/// checking.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CachedStreamInfo {
    /// Whether the stream allows direct message access.
    pub allow_direct: bool,
}

impl From<&StreamInfo> for CachedStreamInfo {
    fn from(info: &StreamInfo) -> Self {
        Self {
            allow_direct: info.config.allow_direct,
        }
    }
}

/// Mapping from stream name to its cached projection, shared by all
/// callers on one connection.
///
/// Writes are last-writer-wins per key. Entries are never expired or
/// invalidated; a stale entry persists until the next successful fetch
/// for that name overwrites it. Absence of a key says nothing about
/// whether the stream exists.
#[derive(Debug, Default)]
pub(crate) struct StreamInfoCache {
    entries: DashMap<String, CachedStreamInfo>,
}

impl StreamInfoCache {
    pub(crate) fn get(&self, stream: &str) -> Option<CachedStreamInfo> {
        self.entries.get(stream).map(|entry| *entry.value())
    }

    pub(crate) fn store(&self, stream: &str, info: &StreamInfo) {
        self.entries
            .insert(stream.to_owned(), CachedStreamInfo::from(info));
    }

    pub(crate) fn store_all(&self, infos: &[StreamInfo]) {
        for info in infos {
            self.entries
                .insert(info.config.name.clone(), CachedStreamInfo::from(info));
        }
    }
}
