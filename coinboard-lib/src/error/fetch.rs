//! Data source error types

use std::path::PathBuf;

/// Errors that can occur while loading the record list.
///
/// A failed load never touches what is already on screen; callers log the
/// error and keep the previous table.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Transport failure during an HTTP request.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// The URL that was requested.
        url: String,
    },

    /// The resource file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        /// Path of the resource file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The payload is not a JSON array of records.
    #[error("Malformed payload: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configured location cannot be turned into a source.
    #[error("Invalid source: {0}")]
    InvalidSource(String),
}

impl FetchError {
    /// Creates a new I/O error for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a new HTTP status error.
    pub fn http(status: u16, url: impl Into<String>) -> Self {
        Self::Http {
            status,
            url: url.into(),
        }
    }

    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if the failure happened before a payload was received.
    ///
    /// Nothing retries on this; it only decides how loudly the failure is logged.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Http { .. } | Self::Io { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_display() {
        let err = FetchError::http(503, "https://example.com/data.json");
        assert_eq!(err.to_string(), "HTTP 503 from https://example.com/data.json");
        assert_eq!(err.status_code(), Some(503));
        assert!(err.is_transport());
    }

    #[test]
    fn test_parse_error_is_not_transport() {
        let json_err = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let err = FetchError::from(json_err);
        assert!(!err.is_transport());
        assert!(err.status_code().is_none());
        assert!(err.to_string().starts_with("Malformed payload"));
    }

    #[test]
    fn test_io_error_mentions_path() {
        let err = FetchError::io(
            "missing/data.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert!(err.to_string().contains("missing/data.json"));
    }
}
