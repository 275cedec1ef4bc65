//! HTTP-backed source

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use super::DataSource;
use crate::error::FetchError;
use crate::model::CryptoRecord;
use crate::model::parse_records;

/// Fetches the record list with a plain GET on every load.
///
/// Cheap to clone; the underlying `reqwest::Client` shares its connection pool.
///
/// # Example
///
/// ```ignore
/// use coinboard_lib::source::HttpSource;
///
/// let source = HttpSource::builder()
///     .url("https://example.com/markets.json")
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    http_client: Client,
    timeout: Option<Duration>,
}

impl HttpSource {
    /// Creates a new builder.
    pub fn builder() -> HttpSourceBuilder<Missing> {
        HttpSourceBuilder::new()
    }

    /// Returns the URL being fetched.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl DataSource for HttpSource {
    async fn load_all(&self) -> Result<Vec<CryptoRecord>, FetchError> {
        let mut request = self.http_client.get(&self.url);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::http(status.as_u16(), &self.url));
        }

        let bytes = response.bytes().await?;
        let records = parse_records(&bytes)?;
        debug!("Fetched {} records from {}", records.len(), self.url);
        Ok(records)
    }

    fn describe(&self) -> String {
        format!("GET {}", self.url)
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for a missing required builder field.
pub struct Missing;

/// Marker type for a set builder field.
pub struct Set<T>(T);

/// Builder for an [`HttpSource`].
///
/// The URL is required; `build` only exists once it is set.
pub struct HttpSourceBuilder<Url> {
    url: Url,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl HttpSourceBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }

    /// Sets the URL to fetch.
    pub fn url(self, url: impl Into<String>) -> HttpSourceBuilder<Set<String>> {
        HttpSourceBuilder {
            url: Set(url.into()),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl Default for HttpSourceBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> HttpSourceBuilder<U> {
    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// Ignored when a custom client is supplied.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl HttpSourceBuilder<Set<String>> {
    /// Builds the [`HttpSource`].
    pub fn build(self) -> Result<HttpSource, FetchError> {
        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build()?
            }
        };

        Ok(HttpSource {
            url: self.url.0,
            http_client,
            timeout: self.timeout,
        })
    }
}
