//! # Route Table
//!
//! Walks a router's node tree once and records, for every URI template a
//! route is bound to, the resource and the author-written responders per
//! HTTP method.
//!
//! ## Traversal
//!
//! Nodes are classified on ingestion into [`RouterNode::Structural`] (a path
//! prefix leading to deeper routes) or [`RouterNode::Route`]. A node missing
//! any of its template, resource or method map is structural, even when it
//! carries the other two. Both kinds have their children queued.
//!
//! Responders declared in the framework's responder module are fallbacks
//! rather than operations and are left out of each entry.
//!
//! ## Duplicate URIs
//!
//! When two nodes carry the same template the node visited last owns the
//! entry. A resource reachable under several templates is unaffected; only
//! distinct nodes sharing one template collide.

use crate::error::RouteDocError;
use crate::routing::{MethodMap, RawNode, Resource, Responder, Router};
use indexmap::IndexMap;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, info, warn};

mod builder;

pub use builder::{RouteTableBuilder, build_route_table};

///////////////////////////////////////////////////////////////////////////////
//****                         Public Structs                            ****//
///////////////////////////////////////////////////////////////////////////////

/// The resource bound to a URI and its responders keyed by lower-case method
#[derive(Debug, Clone, PartialEq)]
pub struct RouteEntry {
    pub resource: Arc<Resource>,
    pub methods: IndexMap<String, Arc<Responder>>,
}

/// Every route of one router snapshot, keyed by URI template
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RouteTable {
    entries: IndexMap<String, RouteEntry>,
}

impl RouteTable {
    pub fn get(&self, uri: &str) -> Option<&RouteEntry> {
        self.entries.get(uri)
    }

    pub fn contains(&self, uri: &str) -> bool {
        self.entries.contains_key(uri)
    }

    pub fn uris(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RouteEntry)> {
        self.entries.iter().map(|(uri, entry)| (uri.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

///////////////////////////////////////////////////////////////////////////////
//****                         Public Types                              ****//
///////////////////////////////////////////////////////////////////////////////

/// A router node after classification
#[derive(Debug, Clone)]
pub enum RouterNode {
    Structural {
        children: Vec<Arc<RawNode>>,
    },
    Route {
        uri_template: String,
        resource: Arc<Resource>,
        methods: MethodMap,
        children: Vec<Arc<RawNode>>,
    },
}

impl From<&RawNode> for RouterNode {
    fn from(node: &RawNode) -> Self {
        let children = node.children.clone();
        match (&node.uri_template, &node.resource, &node.method_map) {
            (Some(uri_template), Some(resource), Some(methods)) => RouterNode::Route {
                uri_template: uri_template.clone(),
                resource: Arc::clone(resource),
                methods: methods.clone(),
                children,
            },
            _ => RouterNode::Structural { children },
        }
    }
}

///////////////////////////////////////////////////////////////////////////////
//****                       Public Functions                            ****//
///////////////////////////////////////////////////////////////////////////////

/// Walk every node of `router` and build a fresh table.
///
/// Responders whose module equals `responder_module` are skipped. Fails only
/// when a route node carries an empty method map.
pub fn traverse(router: &Router, responder_module: &str) -> Result<RouteTable, RouteDocError> {
    info!("Processing the router's tree");
    let mut queue: VecDeque<Arc<RawNode>> = router.roots().into();
    let mut table = RouteTable::default();
    let mut processed = 0usize;

    while let Some(raw) = queue.pop_front() {
        processed += 1;
        let (uri_template, resource, methods) = match RouterNode::from(raw.as_ref()) {
            RouterNode::Structural { children } => {
                debug!(
                    "Node '{}' has no route, queueing {} children",
                    raw.raw_segment,
                    children.len()
                );
                queue.extend(children);
                continue;
            }
            RouterNode::Route {
                uri_template,
                resource,
                methods,
                children,
            } => {
                queue.extend(children);
                (uri_template, resource, methods)
            }
        };

        debug!("Found URI='{}' to process", uri_template);
        if methods.is_empty() {
            return Err(RouteDocError::InternalConsistency(format!(
                "route node for '{}' has an empty method map",
                uri_template
            )));
        }

        let methods = methods
            .into_iter()
            .filter(|(_, responder)| responder.module != responder_module)
            .map(|(method, responder)| (method.to_lowercase(), responder))
            .collect();

        let entry = RouteEntry { resource, methods };
        if let Some(previous) = table.entries.insert(uri_template.clone(), entry) {
            warn!(
                "URI '{}' is bound by more than one node, replacing resource '{}'",
                uri_template, previous.resource.name
            );
        }
    }

    debug!("Processed count={} router nodes", processed);
    Ok(table)
}

///////////////////////////////////////////////////////////////////////////////
//****                              Tests                                ****//
///////////////////////////////////////////////////////////////////////////////
