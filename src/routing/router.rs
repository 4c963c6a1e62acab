//! # Router
//!
//! Builds the node tree routes are registered into. Each `/`-separated
//! segment of a URI template becomes one node; the last node of the template
//! receives the resource and its method map.

use super::{HTTP_METHODS, MethodMap, RawNode, Resource, responders};
use std::error::Error;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Errors raised while registering a route
#[derive(Debug, Clone, PartialEq)]
pub enum RouterError {
    InvalidUriTemplate(String),
    SuffixedMethodNotFound { resource: String, suffix: String },
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterError::InvalidUriTemplate(template) => {
                write!(f, "URI template '{}' must start with '/'", template)
            }
            RouterError::SuffixedMethodNotFound { resource, suffix } => write!(
                f,
                "No responders found on resource '{}' for suffix '{}'",
                resource, suffix
            ),
        }
    }
}

impl Error for RouterError {}

///////////////////////////////////////////////////////////////////////////////
//****                         Public Structs                            ****//
///////////////////////////////////////////////////////////////////////////////

/// Segment-tree router holding every registered route
#[derive(Debug, Clone, Default)]
pub struct Router {
    roots: Vec<Arc<RawNode>>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already built node tree
    pub fn from_roots(roots: Vec<RawNode>) -> Self {
        Self {
            roots: roots.into_iter().map(Arc::new).collect(),
        }
    }

    /// Snapshot of the root nodes
    pub fn roots(&self) -> Vec<Arc<RawNode>> {
        self.roots.clone()
    }

    /// Bind `resource` to `uri_template`.
    ///
    /// With a `suffix`, responders named `on_<method>_<suffix>` are used
    /// instead of `on_<method>`. Registering the same template twice replaces
    /// the earlier binding.
    pub fn add_route(
        &mut self,
        uri_template: &str,
        resource: Arc<Resource>,
        suffix: Option<&str>,
    ) -> Result<(), RouterError> {
        let Some(path) = uri_template.strip_prefix('/') else {
            return Err(RouterError::InvalidUriTemplate(uri_template.to_string()));
        };

        let method_map = map_http_methods(&resource, suffix)?;
        let segments: Vec<&str> = path.split('/').collect();
        debug!(
            "Adding route '{}' for resource '{}' ({} segments)",
            uri_template,
            resource.name,
            segments.len()
        );
        insert(&mut self.roots, &segments, uri_template, resource, method_map);
        Ok(())
    }
}

///////////////////////////////////////////////////////////////////////////////
//****                       Private Functions                           ****//
///////////////////////////////////////////////////////////////////////////////

fn insert(
    nodes: &mut Vec<Arc<RawNode>>,
    segments: &[&str],
    uri_template: &str,
    resource: Arc<Resource>,
    method_map: MethodMap,
) {
    let Some((segment, rest)) = segments.split_first() else {
        return;
    };

    let index = match nodes.iter().position(|n| n.raw_segment == *segment) {
        Some(index) => index,
        None => {
            nodes.push(Arc::new(RawNode::segment(segment)));
            nodes.len() - 1
        }
    };

    let node = Arc::make_mut(&mut nodes[index]);
    if rest.is_empty() {
        node.uri_template = Some(uri_template.to_string());
        node.resource = Some(resource);
        node.method_map = Some(method_map);
    } else {
        insert(&mut node.children, rest, uri_template, resource, method_map);
    }
}

/// Resolve one responder per HTTP method, filling gaps with defaults
fn map_http_methods(resource: &Resource, suffix: Option<&str>) -> Result<MethodMap, RouterError> {
    let mut method_map = MethodMap::new();
    let mut found = 0;

    for method in HTTP_METHODS {
        let mut name = format!("on_{}", method.to_lowercase());
        if let Some(suffix) = suffix {
            name.push('_');
            name.push_str(suffix);
        }

        let responder = match resource.responder(&name) {
            Some(responder) => {
                found += 1;
                responder.clone()
            }
            None if method == "OPTIONS" => responders::default_options(),
            None => responders::method_not_allowed(),
        };
        method_map.insert(method.to_string(), Arc::new(responder));
    }

    if let Some(suffix) = suffix {
        if found == 0 {
            return Err(RouterError::SuffixedMethodNotFound {
                resource: resource.name.clone(),
                suffix: suffix.to_string(),
            });
        }
    }

    Ok(method_map)
}

///////////////////////////////////////////////////////////////////////////////
//****                              Tests                                ****//
///////////////////////////////////////////////////////////////////////////////
