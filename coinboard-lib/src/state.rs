//! Application state for the board.
//!
//! All changes go through the methods here. Each one returns an [`Update`]
//! telling the front end whether to repaint. Loads are tagged with a
//! monotonic [`RequestId`]; a response for anything but the latest request is
//! dropped, so a slow early search cannot overwrite a newer one.

use log::debug;
use log::error;
use log::warn;

use crate::error::FetchError;
use crate::filter::filter;
use crate::model::CryptoRecord;
use crate::sort::SortKey;
use crate::sort::sort_records;
use crate::table::Row;
use crate::table::TableBody;

/// Monotonic id of an issued load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    /// Returns the raw sequence number.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A load that has been issued but not yet answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Sequence number of this load.
    pub id: RequestId,
    /// The query the result will be filtered with.
    pub query: String,
}

/// Whether a state change needs a repaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Update {
    Unchanged,
    Redraw,
}

impl Update {
    /// Returns `true` for [`Update::Redraw`].
    pub fn needs_redraw(self) -> bool {
        self == Self::Redraw
    }
}

/// The board's state: records, query, sort and the rendered body.
#[derive(Debug, Default)]
pub struct BoardState {
    all: Vec<CryptoRecord>,
    query: String,
    applied_query: String,
    sort: Option<SortKey>,
    visible: Vec<CryptoRecord>,
    body: TableBody,
    latest: RequestId,
    loading: bool,
    last_error: Option<String>,
}

impl BoardState {
    /// Creates an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the live search text. Does not filter anything by itself.
    pub fn set_query(&mut self, query: impl Into<String>) -> Update {
        let query = query.into();
        if query == self.query {
            return Update::Unchanged;
        }
        self.query = query;
        Update::Redraw
    }

    /// Issues the next load for the current query.
    pub fn begin_request(&mut self) -> Request {
        self.latest = RequestId(self.latest.0 + 1);
        self.loading = true;
        debug!("Issued load {} for query {:?}", self.latest, self.query);
        Request {
            id: self.latest,
            query: self.query.clone(),
        }
    }

    /// Applies a successful load.
    ///
    /// Dropped unless `request` is the latest issued one.
    pub fn apply_loaded(&mut self, request: &Request, records: Vec<CryptoRecord>) -> Update {
        if request.id != self.latest {
            debug!(
                "Dropping stale response {} (latest is {})",
                request.id, self.latest
            );
            return Update::Unchanged;
        }

        self.loading = false;
        self.last_error = None;
        self.all = records;
        self.applied_query = request.query.clone();
        self.visible = filter(&self.all, &self.applied_query);
        if let Some(key) = self.sort {
            sort_records(&mut self.visible, key);
        }
        self.body.render(&self.visible);
        debug!(
            "Load {} rendered {} of {} records",
            request.id,
            self.visible.len(),
            self.all.len()
        );
        Update::Redraw
    }

    /// Applies a failed load. The rendered rows stay as they are.
    pub fn apply_failed(&mut self, request: &Request, err: &FetchError) -> Update {
        if request.id != self.latest {
            warn!("Ignoring failure of stale load {}: {}", request.id, err);
            return Update::Unchanged;
        }

        error!("Error fetching data: {}", err);
        self.loading = false;
        self.last_error = Some(err.to_string());
        Update::Redraw
    }

    /// Sorts the current view descending by `key` and re-renders it.
    ///
    /// The key is remembered and re-applied to later search results.
    pub fn sort_by(&mut self, key: SortKey) -> Update {
        self.sort = Some(key);
        sort_records(&mut self.visible, key);
        self.body.render(&self.visible);
        Update::Redraw
    }

    /// Sorts the current view by market cap, largest first.
    pub fn sort_by_market_cap_descending(&mut self) -> Update {
        self.sort_by(SortKey::MarketCap)
    }

    /// Sorts the current view by 24h percent change, largest first.
    pub fn sort_by_percent_change_descending(&mut self) -> Update {
        self.sort_by(SortKey::PriceChange)
    }

    /// Clears the last error message.
    pub fn dismiss_error(&mut self) -> Update {
        match self.last_error.take() {
            Some(_) => Update::Redraw,
            None => Update::Unchanged,
        }
    }

    /// Returns the rendered rows.
    pub fn rows(&self) -> &[Row] {
        self.body.rows()
    }

    /// Returns the rendered table body.
    pub fn body(&self) -> &TableBody {
        &self.body
    }

    /// Returns the records behind the rendered rows, in display order.
    pub fn visible(&self) -> &[CryptoRecord] {
        &self.visible
    }

    /// Returns the full list from the latest accepted load.
    pub fn all(&self) -> &[CryptoRecord] {
        &self.all
    }

    /// Returns the live search text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns the query the visible rows were filtered with.
    pub fn applied_query(&self) -> &str {
        &self.applied_query
    }

    /// Returns the active sort, if any.
    pub fn sort(&self) -> Option<SortKey> {
        self.sort
    }

    /// Returns `true` while the latest request is unanswered.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Returns the message of the latest failed load, if it has not been superseded.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Returns the id of the latest issued request.
    pub fn latest_request(&self) -> RequestId {
        self.latest
    }
}
