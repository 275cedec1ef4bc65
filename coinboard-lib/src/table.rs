//! Table body built from records.
//!
//! The body is rebuilt from scratch on every render. Rows are never patched in
//! place; sorting re-renders from the re-ordered records.

use crate::format::Percent;
use crate::format::format_currency;
use crate::format::format_percent;
use crate::format::format_symbol;
use crate::model::CryptoRecord;

/// Label in front of the market cap cell.
pub const MARKET_CAP_LABEL: &str = "Mkt Cap: ";

/// Header titles, in column order.
pub const COLUMNS: [&str; 7] = ["", "Name", "Symbol", "Price", "Volume", "24h %", "Market Cap"];

/// The icon cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon {
    /// Image URL.
    pub src: String,
    /// Fallback text, the record's name.
    pub alt: String,
}

/// One displayed row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub icon: Icon,
    pub name: String,
    pub symbol: String,
    pub price: String,
    pub volume: String,
    pub change: Percent,
    pub market_cap: String,
}

impl Row {
    /// Builds the display row for a record.
    pub fn from_record(record: &CryptoRecord) -> Self {
        Self {
            icon: Icon {
                src: record.image.clone(),
                alt: record.name.clone(),
            },
            name: record.name.clone(),
            symbol: format_symbol(&record.symbol),
            price: format_currency(record.current_price),
            volume: format_currency(record.total_volume),
            change: format_percent(record.price_change_percentage_24h),
            market_cap: format!("{}{}", MARKET_CAP_LABEL, format_currency(record.market_cap)),
        }
    }

    /// Returns the display text of every cell, in column order.
    ///
    /// The icon cell carries its alt text since a terminal cannot paint the image.
    pub fn cells(&self) -> [&str; 7] {
        [
            self.icon.alt.as_str(),
            self.name.as_str(),
            self.symbol.as_str(),
            self.price.as_str(),
            self.volume.as_str(),
            self.change.text.as_str(),
            self.market_cap.as_str(),
        ]
    }
}

/// The rendered table body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableBody {
    rows: Vec<Row>,
}

impl TableBody {
    /// Creates an empty body.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every row with rows built from `records`, in order.
    pub fn render(&mut self, records: &[CryptoRecord]) {
        self.rows.clear();
        self.rows.extend(records.iter().map(Row::from_record));
    }

    /// Returns the rows.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
