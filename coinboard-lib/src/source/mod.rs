//! Data sources for the record list.
//!
//! Every source loads the full list; there is no server-side filtering. The
//! [`CachedSource`] wrapper turns re-fetching into a one-time load.

mod cached;
mod file;
mod http;

pub use cached::*;
pub use file::*;
pub use http::*;

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use url::Url;

use crate::config::BoardConfig;
use crate::error::FetchError;
use crate::model::CryptoRecord;

/// Trait for anything that can produce the full record list.
///
/// # Example
///
/// ```ignore
/// use coinboard_lib::source::{DataSource, FileSource};
///
/// let source = FileSource::new("data.json");
/// let records = source.load_all().await?;
/// ```
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Loads and parses the full record list.
    async fn load_all(&self) -> Result<Vec<CryptoRecord>, FetchError>;

    /// Human-readable description of where records come from.
    fn describe(&self) -> String;
}

#[async_trait]
impl<T: DataSource + ?Sized> DataSource for Arc<T> {
    async fn load_all(&self) -> Result<Vec<CryptoRecord>, FetchError> {
        (**self).load_all().await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Builds the source named by `config.location`.
///
/// `http://` and `https://` locations are fetched over the network; anything
/// else is treated as a file path.
pub fn open_source(config: &BoardConfig) -> Result<Arc<dyn DataSource>, FetchError> {
    let location = config.location.trim();
    if location.is_empty() {
        return Err(FetchError::InvalidSource("empty location".to_string()));
    }

    let source: Arc<dyn DataSource> = match Url::parse(location) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            let mut builder = HttpSource::builder().url(url.as_str());
            if let Some(timeout) = config.request_timeout {
                builder = builder.timeout(timeout);
            }
            if let Some(timeout) = config.connect_timeout {
                builder = builder.connect_timeout(timeout);
            }
            Arc::new(builder.build()?)
        }
        Ok(url) if url.scheme() == "file" => {
            let path = url
                .to_file_path()
                .map_err(|_| FetchError::InvalidSource(location.to_string()))?;
            Arc::new(FileSource::new(path))
        }
        Ok(url) if url.scheme().len() > 1 => {
            return Err(FetchError::InvalidSource(format!(
                "unsupported scheme '{}'",
                url.scheme()
            )));
        }
        // Relative paths and Windows drive letters fail to parse or parse with
        // a one-letter scheme.
        _ => Arc::new(FileSource::new(location)),
    };

    debug!("Opened source {}", source.describe());

    if config.cache_initial_load {
        Ok(Arc::new(CachedSource::new(source)))
    } else {
        Ok(source)
    }
}
