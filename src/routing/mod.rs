//! # Routing Module
//!
//! A compiled, segment-tree router in the shape the route table builder
//! consumes. Routes are registered with [`Router::add_route`], which binds a
//! [`Resource`] to a URI template and resolves one [`Responder`] per HTTP
//! method, falling back to framework responders for methods the resource
//! does not implement.
//!
//! ## Node shape
//!
//! Every [`RawNode`] holds one path segment. Nodes created only to reach a
//! deeper route carry no `uri_template`, `resource` or `method_map`; nodes a
//! route is bound to carry all three. Children are shared through `Arc`, so
//! a snapshot of the roots can be walked while the router keeps its own copy.

use indexmap::IndexMap;
use std::sync::Arc;

pub mod responders;
pub mod router;

pub use router::{Router, RouterError};

/// HTTP methods a resource may respond to, in the order they are mapped
pub const HTTP_METHODS: [&str; 9] = [
    "CONNECT", "DELETE", "GET", "HEAD", "OPTIONS", "PATCH", "POST", "PUT", "TRACE",
];

/// Module identity given to resources that do not name one
pub const DEFAULT_RESOURCE_MODULE: &str = "app";

/// Maps an upper-case HTTP method to the callable handling it
pub type MethodMap = IndexMap<String, Arc<Responder>>;

///////////////////////////////////////////////////////////////////////////////
//****                         Public Structs                            ****//
///////////////////////////////////////////////////////////////////////////////

/// A callable handling one HTTP method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Responder {
    pub name: String,
    /// Module the callable was declared in
    pub module: String,
    pub doc: Option<String>,
}

/// A handler object bound to one or more routes
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Resource {
    pub name: String,
    pub module: String,
    pub doc: Option<String>,
    /// Responders keyed by name, e.g. `on_get` or `on_get_hello`
    pub responders: IndexMap<String, Responder>,
}

impl Resource {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            module: DEFAULT_RESOURCE_MODULE.to_string(),
            doc: None,
            responders: IndexMap::new(),
        }
    }

    pub fn with_module(mut self, module: &str) -> Self {
        self.module = module.to_string();
        for responder in self.responders.values_mut() {
            responder.module = module.to_string();
        }
        self
    }

    pub fn with_doc(mut self, doc: &str) -> Self {
        self.doc = Some(doc.to_string());
        self
    }

    /// Add a responder declared in this resource's module
    pub fn with_responder(mut self, name: &str, doc: Option<&str>) -> Self {
        self.responders.insert(
            name.to_string(),
            Responder {
                name: name.to_string(),
                module: self.module.clone(),
                doc: doc.map(|d| d.to_string()),
            },
        );
        self
    }

    pub fn responder(&self, name: &str) -> Option<&Responder> {
        self.responders.get(name)
    }
}

/// A node of the router tree as the router stores it
#[derive(Debug, Clone, Default)]
pub struct RawNode {
    pub raw_segment: String,
    pub uri_template: Option<String>,
    pub resource: Option<Arc<Resource>>,
    pub method_map: Option<MethodMap>,
    pub children: Vec<Arc<RawNode>>,
}

impl RawNode {
    /// A node that only leads to deeper routes
    pub fn segment(raw_segment: &str) -> Self {
        Self {
            raw_segment: raw_segment.to_string(),
            ..Default::default()
        }
    }

    pub fn with_child(mut self, child: RawNode) -> Self {
        self.children.push(Arc::new(child));
        self
    }
}
