//! Market record type

use serde::Deserialize;
use serde::Serialize;

use crate::error::FetchError;

/// One cryptocurrency's market snapshot.
///
/// Records are read-only snapshots of the resource file. Nothing here is
/// unique; two records may share a name or symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CryptoRecord {
    /// Display name, e.g. "Bitcoin".
    pub name: String,
    /// Ticker symbol as delivered, usually lowercase.
    pub symbol: String,
    /// Icon URL.
    #[serde(default)]
    pub image: String,
    /// Current price in dollars.
    #[serde(default, deserialize_with = "super::record_serde::number_or_zero")]
    pub current_price: f64,
    /// Traded volume over the last 24 hours.
    #[serde(default, deserialize_with = "super::record_serde::number_or_zero")]
    pub total_volume: f64,
    /// Market capitalisation.
    #[serde(default, deserialize_with = "super::record_serde::number_or_zero")]
    pub market_cap: f64,
    /// Price change over the last 24 hours, in percent.
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
}

impl CryptoRecord {
    /// Creates a record with the given name and symbol and zeroed figures.
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            image: String::new(),
            current_price: 0.0,
            total_volume: 0.0,
            market_cap: 0.0,
            price_change_percentage_24h: None,
        }
    }

    /// Sets the icon URL.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Sets the current price.
    pub fn with_price(mut self, price: f64) -> Self {
        self.current_price = price;
        self
    }

    /// Sets the 24h volume.
    pub fn with_volume(mut self, volume: f64) -> Self {
        self.total_volume = volume;
        self
    }

    /// Sets the market cap.
    pub fn with_market_cap(mut self, market_cap: f64) -> Self {
        self.market_cap = market_cap;
        self
    }

    /// Sets the 24h percent change.
    pub fn with_change(mut self, change: f64) -> Self {
        self.price_change_percentage_24h = Some(change);
        self
    }

    /// Returns the 24h percent change, treating NaN as absent.
    pub fn change(&self) -> Option<f64> {
        self.price_change_percentage_24h.filter(|v| !v.is_nan())
    }
}

/// Decodes a JSON array of records.
pub fn parse_records(bytes: &[u8]) -> Result<Vec<CryptoRecord>, FetchError> {
    Ok(serde_json::from_slice(bytes)?)
}
