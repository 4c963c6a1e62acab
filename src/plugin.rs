//! # Router Plugin
//!
//! Connects a [`Router`] to an [`ApiSpec`]. The plugin owns the route table
//! builder, so the router is walked once and the table reused for every path
//! registered afterwards (unless caching is turned off).

use crate::error::RouteDocError;
use crate::open_api::SpecSink;
use crate::resolver::{BuildReport, OperationResolver};
use crate::route_table::{RouteTable, RouteTableBuilder};
use crate::routing::Router;
use std::sync::Arc;
use tracing::info;

/// Registers a router's routes into a specification document
#[derive(Debug)]
pub struct RouterPlugin {
    router: Arc<Router>,
    builder: RouteTableBuilder,
    resolver: OperationResolver,
}

impl RouterPlugin {
    pub fn new(router: Arc<Router>, cache_enabled: bool) -> Self {
        Self::with_builder(router, RouteTableBuilder::new(cache_enabled))
    }

    pub fn with_builder(router: Arc<Router>, builder: RouteTableBuilder) -> Self {
        Self {
            router,
            builder,
            resolver: OperationResolver::new(),
        }
    }

    /// The current route table, built on first use
    pub fn route_table(&self) -> Result<Arc<RouteTable>, RouteDocError> {
        self.builder.build(&self.router)
    }

    /// Register one path; fails with `UnknownRoute` before touching `spec`
    pub fn path<S: SpecSink + ?Sized>(&self, spec: &mut S, uri: &str) -> Result<(), RouteDocError> {
        let table = self.route_table()?;
        self.resolver.register(uri, &table, spec)
    }

    /// Register every route the router knows about
    pub fn auto_build_spec<S: SpecSink + ?Sized>(&self, spec: &mut S) -> Result<BuildReport, RouteDocError> {
        let table = self.route_table()?;
        info!("Scanning and adding all the routes known by the router");
        Ok(self.resolver.resolve_all(&table, spec))
    }

    /// Forget the cached table, e.g. after the router changed
    pub fn invalidate(&self) {
        self.builder.invalidate();
    }
}
