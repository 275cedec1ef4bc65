//! Lenient number decoding for market figures.
//!
//! Market feeds send `null` for figures they do not have yet. Those decode to
//! zero so a single incomplete record does not fail the whole payload.

use serde::Deserialize;
use serde::Deserializer;

pub(super) fn number_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}
