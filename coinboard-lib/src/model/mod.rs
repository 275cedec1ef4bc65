//! Typed models

mod record;
mod record_serde;

pub use record::*;
