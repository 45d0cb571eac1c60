//! Multi-round request/accumulate loops for paginated APIs.
//!
//! One logical call may span several request/response rounds: the first
//! request carries the caller's filter/options, later requests carry an
//! offset derived from the items received so far, and the loop ends when
//! the accumulated count reaches the server-reported total. Any page
//! failure abandons the accumulated state with the call.

use bytes::Bytes;

use crate::Error;
use crate::api::{
    self, ListRequest, StreamInfo, StreamInfoOptions, StreamInfoPage, StreamInfoRequest,
    StreamListPage, StreamNamesPage,
};

/// One logical listing call. Page N+1's request depends on page N's
/// result, so pages are requested strictly in sequence.
pub(crate) trait PageReader {
    /// The fully assembled result.
    type Output;

    fn has_more(&self) -> bool;

    fn next_request(&self) -> Result<Bytes, Error>;

    fn process(&mut self, payload: &[u8]) -> Result<(), Error>;

    fn finish(self) -> Self::Output;
}

/// Assembles one [`StreamInfo`] from possibly multiple subject-map pages.
pub(crate) struct StreamInfoReader {
    options: StreamInfoOptions,
    info: Option<StreamInfo>,
    received: u64,
    more: bool,
}

impl StreamInfoReader {
    pub(crate) fn new(options: StreamInfoOptions) -> Self {
        Self {
            options,
            info: None,
            received: 0,
            more: true,
        }
    }
}

impl PageReader for StreamInfoReader {
    type Output = StreamInfo;

    fn has_more(&self) -> bool {
        self.more
    }

    fn next_request(&self) -> Result<Bytes, Error> {
        let request = StreamInfoRequest {
            subjects_filter: self.options.subjects_filter.clone(),
            deleted_details: self.options.deleted_details,
            offset: self.received,
        };
        Ok(Bytes::from(serde_json::to_vec(&request)?))
    }

    fn process(&mut self, payload: &[u8]) -> Result<(), Error> {
        let page: StreamInfoPage = api::decode(payload)?;
        self.received += page.info.state.subjects.len() as u64;
        // a response without a total is a complete single page
        self.more = page.total.is_some_and(|total| self.received < total);

        match &mut self.info {
            None => self.info = Some(page.info),
            Some(assembled) => assembled.state.subjects.extend(page.info.state.subjects),
        }
        Ok(())
    }

    fn finish(self) -> StreamInfo {
        self.info.unwrap_or_default()
    }
}

/// Accumulates stream names across pages, order preserved.
pub(crate) struct StreamNamesReader {
    filter: Option<String>,
    names: Vec<String>,
    more: bool,
}

impl StreamNamesReader {
    pub(crate) fn new(filter: Option<&str>) -> Self {
        Self {
            filter: filter.map(str::to_owned),
            names: Vec::new(),
            more: true,
        }
    }
}

impl PageReader for StreamNamesReader {
    type Output = Vec<String>;

    fn has_more(&self) -> bool {
        self.more
    }

    fn next_request(&self) -> Result<Bytes, Error> {
        let request = ListRequest {
            subject: self.filter.clone(),
            offset: self.names.len() as u64,
        };
        Ok(Bytes::from(serde_json::to_vec(&request)?))
    }

    fn process(&mut self, payload: &[u8]) -> Result<(), Error> {
        let page: StreamNamesPage = api::decode(payload)?;
        self.names.extend(page.streams.unwrap_or_default());
        self.more = (self.names.len() as u64) < page.total;
        Ok(())
    }

    fn finish(self) -> Vec<String> {
        self.names
    }
}

/// Accumulates full stream info objects across pages.
pub(crate) struct StreamListReader {
    filter: Option<String>,
    infos: Vec<StreamInfo>,
    more: bool,
}

impl StreamListReader {
    pub(crate) fn new(filter: Option<&str>) -> Self {
        Self {
            filter: filter.map(str::to_owned),
            infos: Vec::new(),
            more: true,
        }
    }
}

impl PageReader for StreamListReader {
    type Output = Vec<StreamInfo>;

    fn has_more(&self) -> bool {
        self.more
    }

    fn next_request(&self) -> Result<Bytes, Error> {
        let request = ListRequest {
            subject: self.filter.clone(),
            offset: self.infos.len() as u64,
        };
        Ok(Bytes::from(serde_json::to_vec(&request)?))
    }

    fn process(&mut self, payload: &[u8]) -> Result<(), Error> {
        let page: StreamListPage = api::decode(payload)?;
        self.infos.extend(page.streams.unwrap_or_default());
        self.more = (self.infos.len() as u64) < page.total;
        Ok(())
    }

    fn finish(self) -> Vec<StreamInfo> {
        self.infos
    }
}
