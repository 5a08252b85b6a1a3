// src/store.rs
//! Single-slot query cache. Holds the processed rows of the last query and
//! only goes back to the source when the query changed or a refresh is forced.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::data::Row;
use crate::error::Result;
use crate::filter::{CacheKey, FilterParams};
use crate::process::process;
use crate::source::DataSource;

#[derive(Clone, Debug)]
pub struct CacheEntry {
    pub key: CacheKey,
    pub rows: Arc<[Row]>,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct QueryCache {
    entry: Option<CacheEntry>,
    fetches: usize,
}

impl QueryCache {
    pub fn new() -> Self { Self::default() }

    /// Rows for `params`. Invalid params never reach the source. A failed
    /// fetch leaves the current entry as it was.
    pub fn get_rows(&mut self, source: &dyn DataSource, params: &FilterParams, force: bool) -> Result<Arc<[Row]>> {
        params.validate()?;
        let key = params.cache_key();

        if !force {
            if let Some(rows) = self.peek(&key) {
                logd!("Cache: hit ({} rows)", rows.len());
                return Ok(rows);
            }
        }

        self.fetches += 1;
        logf!("Cache: fetching from {} (force={force})", source.name());
        let raw = source.fetch_rows(&params.payload())?;
        let rows: Arc<[Row]> = process(raw, &params.selected_fields()).into();

        self.entry = Some(CacheEntry { key, rows: Arc::clone(&rows), fetched_at: Utc::now() });
        Ok(rows)
    }

    /// Cached rows if the live entry matches `key`.
    pub fn peek(&self, key: &CacheKey) -> Option<Arc<[Row]>> {
        self.entry.as_ref().filter(|e| &e.key == key).map(|e| Arc::clone(&e.rows))
    }

    pub fn entry(&self) -> Option<&CacheEntry> { self.entry.as_ref() }

    /// Whatever is live, regardless of key.
    pub fn rows(&self) -> Option<Arc<[Row]>> {
        self.entry.as_ref().map(|e| Arc::clone(&e.rows))
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }

    /// Source calls made so far (hits don't count).
    pub fn fetch_count(&self) -> usize { self.fetches }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ValidationError};
    use crate::source::MockSource;

    fn params(area: &str) -> FilterParams {
        FilterParams::default().with_area(area).with_fields(&["nama_sekolah", "npsn"]).unwrap()
    }

    #[test]
    fn hit_skips_source() {
        let src = MockSource::default();
        let mut cache = QueryCache::new();
        let a = cache.get_rows(&src, &params("Bawen"), false).unwrap();
        let b = cache.get_rows(&src, &params(" Bawen"), false).unwrap();
        assert_eq!(cache.fetch_count(), 1);
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn force_refetches() {
        let src = MockSource::default();
        let mut cache = QueryCache::new();
        let a = cache.get_rows(&src, &params("Bawen"), false).unwrap();
        let b = cache.get_rows(&src, &params("Bawen"), true).unwrap();
        assert_eq!(cache.fetch_count(), 2);
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(a, b);
    }

    #[test]
    fn invalid_params_never_fetch() {
        let src = MockSource::default();
        let mut cache = QueryCache::new();
        let err = cache.get_rows(&src, &params("  "), false).unwrap_err();
        assert_eq!(err, Error::Validation(ValidationError::MissingAreaName));
        assert_eq!(cache.fetch_count(), 0);
        assert!(cache.entry().is_none());
    }

    #[test]
    fn clear_drops_entry() {
        let src = MockSource::default();
        let mut cache = QueryCache::new();
        cache.get_rows(&src, &params("Bawen"), false).unwrap();
        cache.clear();
        assert!(cache.rows().is_none());
        cache.get_rows(&src, &params("Bawen"), false).unwrap();
        assert_eq!(cache.fetch_count(), 2);
    }
}
