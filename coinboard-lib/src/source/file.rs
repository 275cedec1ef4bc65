//! File-backed source

use std::path::Path;
use std::path::PathBuf;

use async_trait::async_trait;
use log::debug;

use super::DataSource;
use crate::error::FetchError;
use crate::model::CryptoRecord;
use crate::model::parse_records;

/// Reads the record list from a JSON file on every load.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Creates a source for the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DataSource for FileSource {
    async fn load_all(&self) -> Result<Vec<CryptoRecord>, FetchError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| FetchError::io(&self.path, e))?;
        let records = parse_records(&bytes)?;
        debug!("Read {} records from {}", records.len(), self.path.display());
        Ok(records)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}
