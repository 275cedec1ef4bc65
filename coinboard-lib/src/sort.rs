//! Descending sorts over the underlying record figures.

use std::cmp::Ordering;

use crate::model::CryptoRecord;

/// Column a view can be sorted by. Both sorts are descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Market capitalisation, largest first.
    MarketCap,
    /// 24h percent change, largest first. Missing values go last.
    PriceChange,
}

impl SortKey {
    /// Short label for status displays.
    pub fn label(&self) -> &'static str {
        match self {
            Self::MarketCap => "market cap",
            Self::PriceChange => "24h %",
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Sorts records in place, descending by `key`.
///
/// The sort is stable: records that compare equal keep their relative order.
pub fn sort_records(records: &mut [CryptoRecord], key: SortKey) {
    match key {
        SortKey::MarketCap => records.sort_by(|a, b| b.market_cap.total_cmp(&a.market_cap)),
        SortKey::PriceChange => records.sort_by(|a, b| descending(a.change(), b.change())),
    }
}

/// Descending order with missing values last.
fn descending(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
