//! # Caching Module
//!
//! Candidate routes depend only on the traveler's origin, the destination and the trip
//! constraints, and the catalog is read-only for the length of a run. Every crossover
//! re-derives the candidates of a whole roster, so the same (origin, destination)
//! lookups repeat over and over. [`RouteCache`] memoizes them.
//!
//! Two flavours are available, picked through [`CacheType`]:
//!
//! - `Global`: one mutex-protected map shared by all threads.
//! - `ThreadLocal`: one map per thread, avoiding lock contention when candidates are
//!   generated in parallel.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use thread_local::ThreadLocal;

use crate::evolution::options::CacheType;
use crate::plan::CandidateRoutePair;

/// Cache key: (origin, destination).
pub type RouteKey = (String, String);

/// Shared, immutable candidate set for one traveler and destination.
pub type Candidates = Arc<[CandidateRoutePair]>;

type RouteMap = HashMap<RouteKey, Candidates>;

#[derive(Debug)]
enum Store {
    Disabled,
    Global(Mutex<RouteMap>),
    ThreadLocal(ThreadLocal<RefCell<RouteMap>>),
}

/// Memoizes candidate route sets per (origin, destination).
#[derive(Debug)]
pub struct RouteCache {
    store: Store,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl RouteCache {
    pub fn new(cache_type: CacheType) -> Self {
        let store = match cache_type {
            CacheType::None => Store::Disabled,
            CacheType::Global => Store::Global(Mutex::new(HashMap::new())),
            CacheType::ThreadLocal => Store::ThreadLocal(ThreadLocal::new()),
        };
        Self {
            store,
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    /// Returns the cached candidates for `(origin, destination)` or computes, stores and
    /// returns them with `compute`. Errors from `compute` are returned and nothing is
    /// stored.
    pub fn get_or_try_insert<E, F>(
        &self,
        origin: &str,
        destination: &str,
        compute: F,
    ) -> Result<Candidates, E>
    where
        F: FnOnce() -> Result<Vec<CandidateRoutePair>, E>,
    {
        let key = (origin.to_string(), destination.to_string());

        if let Some(found) = self.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(found);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let candidates: Candidates = compute()?.into();
        self.insert(key, Arc::clone(&candidates));
        Ok(candidates)
    }

    fn get(&self, key: &RouteKey) -> Option<Candidates> {
        match &self.store {
            Store::Disabled => None,
            Store::Global(map) => {
                let map = map.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                map.get(key).cloned()
            }
            Store::ThreadLocal(local) => local
                .get()
                .and_then(|cell| cell.try_borrow().ok())
                .and_then(|map| map.get(key).cloned()),
        }
    }

    fn insert(&self, key: RouteKey, candidates: Candidates) {
        match &self.store {
            Store::Disabled => {}
            Store::Global(map) => {
                let mut map = map.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                map.insert(key, candidates);
            }
            Store::ThreadLocal(local) => {
                let cell = local.get_or(|| RefCell::new(HashMap::new()));
                if let Ok(mut map) = cell.try_borrow_mut() {
                    map.insert(key, candidates);
                }
            }
        }
    }

    /// Number of lookups answered from the cache.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    /// Number of lookups that had to compute candidates.
    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    /// Number of cached entries visible from the current thread.
    pub fn len(&self) -> usize {
        match &self.store {
            Store::Disabled => 0,
            Store::Global(map) => map
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .len(),
            Store::ThreadLocal(local) => local
                .get()
                .and_then(|cell| cell.try_borrow().ok())
                .map_or(0, |map| map.len()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every cached entry visible from the current thread.
    pub fn clear(&self) {
        match &self.store {
            Store::Disabled => {}
            Store::Global(map) => map
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .clear(),
            Store::ThreadLocal(local) => {
                if let Some(Ok(mut map)) = local.get().map(|cell| cell.try_borrow_mut()) {
                    map.clear();
                }
            }
        }
    }
}

impl Default for RouteCache {
    fn default() -> Self {
        Self::new(CacheType::Global)
    }
}
