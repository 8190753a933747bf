//! Client-side cache of remote-derived data.
//!
//! One entry per query. Mutations invalidate their own key; sign-out purges
//! everything so admin-only data never outlives the session.
//!
//! Entries are keyed by a generation that `invalidate_all` bumps, so a fetch
//! still running across a purge lands under a key nobody reads again.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::debug;

use models::booking::Booking;
use models::images::ImagePaths;
use models::rates::ServiceRate;
use models::slots::TimeSlotAvailability;

use crate::remote::RemoteError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    ServiceRates,
    TimeSlotAvailability,
    ImagePaths,
    Bookings,
}

#[derive(Debug, Clone)]
pub enum QueryValue {
    ServiceRates(ServiceRate),
    TimeSlotAvailability(TimeSlotAvailability),
    ImagePaths(ImagePaths),
    Bookings(Arc<Vec<Booking>>),
}

/// A value that lives under a fixed cache key.
pub trait Cached: Sized {
    const KEY: QueryKey;
    fn into_value(self) -> QueryValue;
    fn from_value(value: QueryValue) -> Option<Self>;
}

impl Cached for ServiceRate {
    const KEY: QueryKey = QueryKey::ServiceRates;
    fn into_value(self) -> QueryValue { QueryValue::ServiceRates(self) }
    fn from_value(value: QueryValue) -> Option<Self> {
        match value { QueryValue::ServiceRates(v) => Some(v), _ => None }
    }
}

impl Cached for TimeSlotAvailability {
    const KEY: QueryKey = QueryKey::TimeSlotAvailability;
    fn into_value(self) -> QueryValue { QueryValue::TimeSlotAvailability(self) }
    fn from_value(value: QueryValue) -> Option<Self> {
        match value { QueryValue::TimeSlotAvailability(v) => Some(v), _ => None }
    }
}

impl Cached for ImagePaths {
    const KEY: QueryKey = QueryKey::ImagePaths;
    fn into_value(self) -> QueryValue { QueryValue::ImagePaths(self) }
    fn from_value(value: QueryValue) -> Option<Self> {
        match value { QueryValue::ImagePaths(v) => Some(v), _ => None }
    }
}

impl Cached for Arc<Vec<Booking>> {
    const KEY: QueryKey = QueryKey::Bookings;
    fn into_value(self) -> QueryValue { QueryValue::Bookings(self) }
    fn from_value(value: QueryValue) -> Option<Self> {
        match value { QueryValue::Bookings(v) => Some(v), _ => None }
    }
}

#[derive(Clone)]
pub struct QueryCache {
    inner: Cache<(u64, QueryKey), QueryValue>,
    generation: Arc<AtomicU64>,
}

impl QueryCache {
    pub fn new(max_entries: u64, ttl: Duration) -> Self {
        let inner = Cache::builder().max_capacity(max_entries).time_to_live(ttl).build();
        Self { inner, generation: Arc::new(AtomicU64::new(0)) }
    }

    fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub fn from_config(cfg: &configs::CacheConfig) -> Self {
        Self::new(cfg.max_entries, cfg.ttl())
    }

    /// Cached value for `T`, or run `fetch` once and cache its success.
    /// Concurrent callers for the same key share one fetch; errors are not cached.
    ///
    /// A fetch that straddles `invalidate_all` answers `RemoteError::Stale`
    /// and its result is discarded.
    pub async fn get_or_fetch<T, Fut>(&self, fetch: Fut) -> Result<T, RemoteError>
    where
        T: Cached,
        Fut: Future<Output = Result<T, RemoteError>>,
    {
        let generation = self.generation();
        let key = (generation, T::KEY);
        let value = self
            .inner
            .try_get_with(key, async move { fetch.await.map(T::into_value) })
            .await
            .map_err(|e: Arc<RemoteError>| (*e).clone())?;
        if self.generation() != generation {
            debug!(key = ?T::KEY, generation, "discarding result fetched before purge");
            self.inner.invalidate(&key).await;
            return Err(RemoteError::Stale);
        }
        T::from_value(value).ok_or_else(|| RemoteError::Decode(format!("cache entry {:?} has the wrong type", T::KEY)))
    }

    pub async fn get<T: Cached>(&self) -> Option<T> {
        self.inner.get(&(self.generation(), T::KEY)).await.and_then(T::from_value)
    }

    pub async fn invalidate(&self, key: QueryKey) {
        debug!(?key, "invalidating cached query");
        self.inner.invalidate(&(self.generation(), key)).await;
    }

    /// Drop every cached query, including results of fetches still in flight.
    pub fn invalidate_all(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(generation, "purging query cache");
        self.inner.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn cache() -> QueryCache {
        QueryCache::new(16, Duration::from_secs(60))
    }

    #[tokio::test]
    async fn fetches_once_then_serves_cached() {
        let cache = cache();
        let fetches = AtomicUsize::new(0);
        for _ in 0..3 {
            let rates: ServiceRate = cache
                .get_or_fetch(async {
                    fetches.fetch_add(1, Ordering::SeqCst);
                    Ok(ServiceRate { pop_gypsum: 70, pvc: 115, wall_molding: 90 })
                })
                .await
                .unwrap();
            assert_eq!(rates.pop_gypsum, 70);
        }
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let cache = cache();
        let err = cache
            .get_or_fetch::<TimeSlotAvailability, _>(async { Err(RemoteError::Timeout) })
            .await
            .unwrap_err();
        assert_eq!(err, RemoteError::Timeout);
        assert!(cache.get::<TimeSlotAvailability>().await.is_none());

        let slots: TimeSlotAvailability = cache.get_or_fetch(async { Ok(TimeSlotAvailability::all_open()) }).await.unwrap();
        assert!(slots.slot7pm);
    }

    #[tokio::test]
    async fn invalidate_all_purges_every_key() {
        let cache = cache();
        let _: ServiceRate = cache.get_or_fetch(async { Ok(ServiceRate::catalog_defaults()) }).await.unwrap();
        let _: Arc<Vec<Booking>> = cache.get_or_fetch(async { Ok(Arc::new(Vec::new())) }).await.unwrap();
        assert!(cache.get::<ServiceRate>().await.is_some());

        cache.invalidate_all();
        assert!(cache.get::<ServiceRate>().await.is_none());
        assert!(cache.get::<Arc<Vec<Booking>>>().await.is_none());
    }

    #[tokio::test]
    async fn purge_discards_fetch_in_flight() {
        let cache = cache();
        let slow = {
            let cache = cache.clone();
            tokio::spawn(async move {
                cache
                    .get_or_fetch(async {
                        tokio::time::sleep(Duration::from_millis(100)).await;
                        Ok(Arc::new(Vec::<Booking>::new()))
                    })
                    .await
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        cache.invalidate_all();

        assert_eq!(slow.await.unwrap().unwrap_err(), RemoteError::Stale);
        assert!(cache.get::<Arc<Vec<Booking>>>().await.is_none());

        let fetches = AtomicUsize::new(0);
        let fresh: Arc<Vec<Booking>> = cache
            .get_or_fetch(async {
                fetches.fetch_add(1, Ordering::SeqCst);
                Ok(Arc::new(Vec::new()))
            })
            .await
            .unwrap();
        assert!(fresh.is_empty());
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invalidate_single_key() {
        let cache = cache();
        let _: ServiceRate = cache.get_or_fetch(async { Ok(ServiceRate::catalog_defaults()) }).await.unwrap();
        let _: ImagePaths = cache.get_or_fetch(async { Ok(ImagePaths::default()) }).await.unwrap();
        cache.invalidate(QueryKey::ServiceRates).await;
        assert!(cache.get::<ServiceRate>().await.is_none());
        assert!(cache.get::<ImagePaths>().await.is_some());
    }
}
