//! Cached corruption-type lookups.
//!
//! The report form's type selector reads from a lookup endpoint whose
//! results are stable for minutes at a time. Responses cache per
//! locale for a fixed TTL; the server localizes names through the
//! `Accept-Language` header, so each locale holds its own entry.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use yeka_core::CorruptionType;
use yeka_i18n::Locale;

use crate::api::{ApiClient, RequestOptions};
use crate::error::ApiResult;

/// Lookup endpoint serving the corruption type list.
pub const CORRUPTION_TYPES_ENDPOINT: &str = "/lookup/corruption-types";

/// Cached lists stay fresh this long.
pub const LOOKUP_TTL: Duration = Duration::from_secs(5 * 60);

/// Where corruption types come from. The HTTP source is the real one;
/// tests substitute their own.
#[async_trait]
pub trait TypeSource: Send + Sync {
    async fn fetch_types(&self, locale: Locale) -> ApiResult<Vec<CorruptionType>>;
}

/// Fetches corruption types over the API.
pub struct HttpTypeSource {
    api: Arc<ApiClient>,
}

impl HttpTypeSource {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl TypeSource for HttpTypeSource {
    async fn fetch_types(&self, locale: Locale) -> ApiResult<Vec<CorruptionType>> {
        let options = RequestOptions::new().accept_language(locale.accept_language());
        self.api
            .resource::<CorruptionType>(CORRUPTION_TYPES_ENDPOINT)
            .get_all_non_paginated(&options)
            .await
    }
}

struct CacheEntry {
    fetched_at: Instant,
    values: Arc<Vec<CorruptionType>>,
}

impl CacheEntry {
    fn fresh(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() < ttl
    }
}

/// TTL cache over a [`TypeSource`], keyed by resource and locale.
pub struct CorruptionTypeLookup {
    source: Arc<dyn TypeSource>,
    resource: String,
    ttl: Duration,
    entries: RwLock<HashMap<(String, Locale), CacheEntry>>,
}

impl CorruptionTypeLookup {
    pub fn new(source: Arc<dyn TypeSource>) -> Self {
        Self::with_ttl(source, LOOKUP_TTL)
    }

    pub fn with_ttl(source: Arc<dyn TypeSource>, ttl: Duration) -> Self {
        Self {
            source,
            resource: "corruption-types".to_string(),
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Lookup backed by the live API.
    pub fn over_api(api: Arc<ApiClient>) -> Self {
        Self::new(Arc::new(HttpTypeSource::new(api)))
    }

    /// The corruption types for a locale, from cache when fresh.
    /// Failed fetches are never cached.
    pub async fn get(&self, locale: Locale) -> ApiResult<Arc<Vec<CorruptionType>>> {
        let key = (self.resource.clone(), locale);

        {
            let entries = self.entries.read().await;
            if let Some(entry) = entries.get(&key) {
                if entry.fresh(self.ttl) {
                    return Ok(entry.values.clone());
                }
            }
        }

        tracing::debug!(locale = %locale, "fetching corruption types");
        let values = Arc::new(self.source.fetch_types(locale).await?);

        let mut entries = self.entries.write().await;
        entries.insert(
            key,
            CacheEntry {
                fetched_at: Instant::now(),
                values: values.clone(),
            },
        );
        Ok(values)
    }

    /// Drop one locale's entry so the next read refetches.
    pub async fn invalidate(&self, locale: Locale) {
        let key = (self.resource.clone(), locale);
        self.entries.write().await.remove(&key);
    }

    pub async fn is_cached(&self, locale: Locale) -> bool {
        let key = (self.resource.clone(), locale);
        let entries = self.entries.read().await;
        entries.get(&key).map(|e| e.fresh(self.ttl)).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingSource {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail: false,
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail: true,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TypeSource for CountingSource {
        async fn fetch_types(&self, locale: Locale) -> ApiResult<Vec<CorruptionType>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ApiError::status(500, "lookup unavailable"));
            }
            Ok(vec![CorruptionType {
                id: 1,
                name: format!("Bribery ({})", locale),
            }])
        }
    }

    #[tokio::test]
    async fn test_second_read_within_ttl_hits_cache() {
        let source = CountingSource::new();
        let lookup = CorruptionTypeLookup::new(source.clone());

        let first = lookup.get(Locale::En).await.unwrap();
        let second = lookup.get(Locale::En).await.unwrap();

        assert_eq!(source.calls(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert!(lookup.is_cached(Locale::En).await);
    }

    #[tokio::test]
    async fn test_expired_entry_refetches() {
        let source = CountingSource::new();
        let lookup = CorruptionTypeLookup::with_ttl(source.clone(), Duration::ZERO);

        lookup.get(Locale::En).await.unwrap();
        lookup.get(Locale::En).await.unwrap();

        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_locales_cache_independently() {
        let source = CountingSource::new();
        let lookup = CorruptionTypeLookup::new(source.clone());

        let en = lookup.get(Locale::En).await.unwrap();
        let am = lookup.get(Locale::Am).await.unwrap();
        lookup.get(Locale::En).await.unwrap();

        assert_eq!(source.calls(), 2);
        assert_ne!(en[0].name, am[0].name);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let source = CountingSource::failing();
        let lookup = CorruptionTypeLookup::new(source.clone());

        assert!(lookup.get(Locale::En).await.is_err());
        assert!(lookup.get(Locale::En).await.is_err());

        assert_eq!(source.calls(), 2);
        assert!(!lookup.is_cached(Locale::En).await);
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let source = CountingSource::new();
        let lookup = CorruptionTypeLookup::new(source.clone());

        lookup.get(Locale::Am).await.unwrap();
        lookup.invalidate(Locale::Am).await;
        lookup.get(Locale::Am).await.unwrap();

        assert_eq!(source.calls(), 2);
    }
}
