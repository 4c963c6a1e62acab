//! # routedoc
//!
//! Builds OpenAPI path specifications from a router and the docstrings of
//! the resources bound to it.
//!
//! ## Flow
//!
//! 1. [`route_table`] walks the router's node tree into a [`RouteTable`]:
//!    URI template → resource and author-written responders.
//! 2. [`resolver`] merges, for one URI, the resource-level annotation and
//!    one operation per responder into [`ResolvedOperations`].
//! 3. The result is written into a [`SpecSink`], normally an [`ApiSpec`].
//!
//! [`plugin::RouterPlugin`] ties the three together and keeps the route table
//! cached between lookups.
//!
//! ## Example
//!
//! ```rust
//! use routedoc::open_api::ApiSpec;
//! use routedoc::plugin::RouterPlugin;
//! use routedoc::routing::{Resource, Router};
//! use std::sync::Arc;
//!
//! let hello = Resource::new("HelloResource").with_responder(
//!     "on_get",
//!     Some("A greeting endpoint.\n---\ndescription: get a greeting\n"),
//! );
//! let mut router = Router::new();
//! router.add_route("/hi", Arc::new(hello), None).unwrap();
//!
//! let plugin = RouterPlugin::new(Arc::new(router), true);
//! let mut spec = ApiSpec::new("Greetings", "1.0.0", "3.0.2");
//! plugin.path(&mut spec, "/hi").unwrap();
//!
//! assert_eq!(spec.path("/hi").unwrap()["get"]["description"], "get a greeting");
//! ```

pub mod cache;
pub mod cli;
pub mod docstring;
pub mod env;
pub mod error;
pub mod manifest;
pub mod open_api;
pub mod plugin;
pub mod resolver;
pub mod route_table;
pub mod routing;

#[cfg(test)]
mod tests;

pub use docstring::{AnnotationParser, Metadata, YamlDocParser};
pub use error::{RouteDocError, SpecError};
pub use open_api::{ApiSpec, SpecSink};
pub use resolver::{
    BuildReport, OperationResolver, ResolvedOperations, resolve_all_operations, resolve_operation,
};
pub use route_table::{RouteEntry, RouteTable, RouteTableBuilder, build_route_table};
