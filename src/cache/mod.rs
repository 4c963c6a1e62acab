use crate::route_table::RouteTable;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Holds the most recently built route table.
///
/// There is no TTL: a stored table stays valid until [`invalidate`] is
/// called. When disabled, lookups always miss and stores are dropped.
///
/// [`invalidate`]: RouteTableCache::invalidate
#[derive(Debug)]
pub struct RouteTableCache {
    cache: RwLock<Option<Arc<RouteTable>>>,
    enabled: bool,
}

impl RouteTableCache {
    pub fn new(enabled: bool) -> Self {
        Self {
            cache: RwLock::new(None),
            enabled,
        }
    }

    /// Get the cached table, if caching is on and one was stored
    pub fn get(&self) -> Option<Arc<RouteTable>> {
        if !self.enabled {
            return None;
        }
        // A poisoned lock only means a writer panicked; the stored value is still whole.
        let cached = match self.cache.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        if cached.is_some() {
            debug!("Route table cache hit");
        } else {
            debug!("Route table cache miss");
        }
        cached
    }

    /// Store a freshly built table; the last writer wins
    pub fn set(&self, table: Arc<RouteTable>) {
        if !self.enabled {
            return;
        }
        debug!("Caching route table with {} routes", table.len());
        match self.cache.write() {
            Ok(mut guard) => *guard = Some(table),
            Err(poisoned) => *poisoned.into_inner() = Some(table),
        }
    }

    /// Drop the stored table so the next build walks the router again
    pub fn invalidate(&self) {
        debug!("Invalidating route table cache");
        match self.cache.write() {
            Ok(mut guard) => *guard = None,
            Err(poisoned) => *poisoned.into_inner() = None,
        }
    }
}
