//! Source wrapper that keeps the first successful load.

use async_trait::async_trait;
use log::debug;
use tokio::sync::OnceCell;

use super::DataSource;
use crate::error::FetchError;
use crate::model::CryptoRecord;

/// Loads from the inner source once and serves that list from then on.
///
/// Failed loads are not cached; the next call tries the inner source again.
/// Concurrent first loads share a single fetch.
#[derive(Debug)]
pub struct CachedSource<S> {
    inner: S,
    records: OnceCell<Vec<CryptoRecord>>,
}

impl<S: DataSource> CachedSource<S> {
    /// Wraps a source.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            records: OnceCell::new(),
        }
    }

    /// Returns `true` once a load has succeeded.
    pub fn is_loaded(&self) -> bool {
        self.records.initialized()
    }

    /// Returns the wrapped source.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: DataSource> DataSource for CachedSource<S> {
    async fn load_all(&self) -> Result<Vec<CryptoRecord>, FetchError> {
        if let Some(records) = self.records.get() {
            debug!("Serving {} cached records", records.len());
            return Ok(records.clone());
        }

        let records = self
            .records
            .get_or_try_init(|| self.inner.load_all())
            .await?;
        Ok(records.clone())
    }

    fn describe(&self) -> String {
        format!("cached {}", self.inner.describe())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;

    use super::*;

    /// Fails on the first call, then serves one record per call count.
    struct FlakySource {
        calls: AtomicUsize,
        log: Mutex<Vec<usize>>,
    }

    #[async_trait]
    impl DataSource for FlakySource {
        async fn load_all(&self) -> Result<Vec<CryptoRecord>, FetchError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            self.log.lock().unwrap().push(call);
            if call == 0 {
                return Err(FetchError::InvalidSource("offline".to_string()));
            }
            Ok(vec![CryptoRecord::new(format!("call {call}"), "x")])
        }

        fn describe(&self) -> String {
            "flaky".to_string()
        }
    }

    #[tokio::test]
    async fn test_failure_is_not_cached_and_success_is() {
        let source = CachedSource::new(FlakySource {
            calls: AtomicUsize::new(0),
            log: Mutex::new(Vec::new()),
        });

        assert!(source.load_all().await.is_err());
        assert!(!source.is_loaded());

        let first = source.load_all().await.unwrap();
        let second = source.load_all().await.unwrap();
        assert_eq!(first[0].name, "call 1");
        assert_eq!(first, second);
        assert!(source.is_loaded());
        assert_eq!(*source.inner().log.lock().unwrap(), vec![0, 1]);
        assert_eq!(source.describe(), "cached flaky");
    }
}
