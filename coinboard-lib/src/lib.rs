//! Crypto market board library
//!
//! Loads a static list of market records, formats them for display, and keeps
//! the filtered and sorted view that a front end paints.

pub mod config;
pub mod debounce;
pub mod error;
pub mod filter;
pub mod format;
pub mod model;
pub mod sort;
pub mod source;
pub mod state;
pub mod table;

pub use config::BoardConfig;
pub use error::FetchError;
pub use model::CryptoRecord;
pub use state::BoardState;
