//! # Manifest Module
//!
//! Describes an application's resources and routes in a YAML (or JSON) file
//! so the command line can build a [`Router`] without linking the
//! application itself.
//!
//! ```yaml
//! resources:
//!   HelloResource:
//!     doc: |
//!       Greeting API.
//!       ---
//!       x-extension: global metadata
//!     responders:
//!       on_get: |
//!         A greeting endpoint.
//!         ---
//!         description: get a greeting
//!       on_get_hello: null
//! routes:
//!   - uri: /hi
//!     resource: HelloResource
//!   - uri: /hello
//!     resource: HelloResource
//!     suffix: hello
//! ```

use crate::routing::{Resource, Router, RouterError};
use indexmap::IndexMap;
use serde::Deserialize;
use std::error::Error;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Errors raised while loading a manifest
#[derive(Debug)]
pub enum ManifestError {
    Io(std::io::Error),
    Parse(String),
    UnknownResource(String),
    Router(RouterError),
}

impl fmt::Display for ManifestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestError::Io(e) => write!(f, "Failed to read manifest: {}", e),
            ManifestError::Parse(msg) => write!(f, "Invalid manifest: {}", msg),
            ManifestError::UnknownResource(name) => {
                write!(f, "Route refers to unknown resource '{}'", name)
            }
            ManifestError::Router(e) => write!(f, "Invalid route: {}", e),
        }
    }
}

impl Error for ManifestError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ManifestError::Io(e) => Some(e),
            ManifestError::Router(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ManifestError {
    fn from(e: std::io::Error) -> Self {
        ManifestError::Io(e)
    }
}

impl From<RouterError> for ManifestError {
    fn from(e: RouterError) -> Self {
        ManifestError::Router(e)
    }
}

///////////////////////////////////////////////////////////////////////////////
//****                         Public Structs                            ****//
///////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub resources: IndexMap<String, ResourceManifest>,
    #[serde(default)]
    pub routes: Vec<RouteManifest>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ResourceManifest {
    pub module: Option<String>,
    pub doc: Option<String>,
    /// Responder name to its docstring
    #[serde(default)]
    pub responders: IndexMap<String, Option<String>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteManifest {
    pub uri: String,
    pub resource: String,
    pub suffix: Option<String>,
}

impl Manifest {
    pub fn parse(content: &str) -> Result<Self, ManifestError> {
        serde_yaml::from_str(content).map_err(|e| ManifestError::Parse(e.to_string()))
    }

    /// Bind every route, sharing one resource instance per resource name
    pub fn into_router(self) -> Result<Router, ManifestError> {
        let resources: IndexMap<String, Arc<Resource>> = self
            .resources
            .into_iter()
            .map(|(name, manifest)| {
                let resource = manifest.into_resource(&name);
                (name, Arc::new(resource))
            })
            .collect();

        let mut router = Router::new();
        for route in &self.routes {
            let resource = resources
                .get(&route.resource)
                .ok_or_else(|| ManifestError::UnknownResource(route.resource.clone()))?;
            router.add_route(&route.uri, Arc::clone(resource), route.suffix.as_deref())?;
        }

        info!(
            "Loaded manifest with {} resources and {} routes",
            resources.len(),
            self.routes.len()
        );
        Ok(router)
    }
}

impl ResourceManifest {
    fn into_resource(self, name: &str) -> Resource {
        let mut resource = Resource::new(name);
        if let Some(module) = &self.module {
            resource = resource.with_module(module);
        }
        if let Some(doc) = &self.doc {
            resource = resource.with_doc(doc);
        }
        for (responder, doc) in &self.responders {
            resource = resource.with_responder(responder, doc.as_deref());
        }
        resource
    }
}

///////////////////////////////////////////////////////////////////////////////
//****                       Public Functions                            ****//
///////////////////////////////////////////////////////////////////////////////

/// Read a manifest file and build its router
pub fn load(path: &Path) -> Result<Router, ManifestError> {
    let content = std::fs::read_to_string(path)?;
    Manifest::parse(&content)?.into_router()
}

///////////////////////////////////////////////////////////////////////////////
//****                              Tests                                ****//
///////////////////////////////////////////////////////////////////////////////
