use super::{RouteTable, traverse};
use crate::cache::RouteTableCache;
use crate::error::RouteDocError;
use crate::routing::Router;
use crate::routing::responders::DEFAULT_RESPONDER_MODULE;
use std::sync::Arc;
use tracing::debug;

/// Builds route tables and optionally memoizes the last one
#[derive(Debug)]
pub struct RouteTableBuilder {
    cache: RouteTableCache,
    responder_module: String,
}

impl RouteTableBuilder {
    pub fn new(cache_enabled: bool) -> Self {
        debug!("cache_enabled={} for the parsing of the router", cache_enabled);
        Self {
            cache: RouteTableCache::new(cache_enabled),
            responder_module: DEFAULT_RESPONDER_MODULE.to_string(),
        }
    }

    /// Treat responders declared in `module` as framework defaults
    pub fn with_responder_module(mut self, module: &str) -> Self {
        self.responder_module = module.to_string();
        self
    }

    /// Return the cached table when there is one, otherwise walk `router`
    pub fn build(&self, router: &Router) -> Result<Arc<RouteTable>, RouteDocError> {
        if let Some(table) = self.cache.get() {
            return Ok(table);
        }
        let table = Arc::new(traverse(router, &self.responder_module)?);
        self.cache.set(Arc::clone(&table));
        Ok(table)
    }

    pub fn get_cached(&self) -> Option<Arc<RouteTable>> {
        self.cache.get()
    }

    pub fn invalidate(&self) {
        self.cache.invalidate();
    }
}

impl Default for RouteTableBuilder {
    fn default() -> Self {
        Self::new(true)
    }
}

/// One-shot build of the route table for `router`
pub fn build_route_table(
    router: &Router,
    cache_enabled: bool,
) -> Result<Arc<RouteTable>, RouteDocError> {
    RouteTableBuilder::new(cache_enabled).build(router)
}
