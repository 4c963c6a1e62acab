//! # Resolver Module
//!
//! Combines the annotations of a route into the path item written to the
//! specification document.
//!
//! For one URI the resource docstring provides the path-level keys
//! (`x-` extensions and whole operations), and every author-written
//! responder provides the operation for its own method. A responder without
//! an annotation still yields an operation, an empty one. Each method's
//! operation depends only on its own responder's docstring.
//!
//! A path item is resolved completely and then committed with a single
//! [`SpecSink::set_path`], so a route that cannot be resolved or written
//! leaves the document without that path.

use crate::docstring::{AnnotationParser, Metadata, YamlDocParser};
use crate::error::{RouteDocError, SpecError};
use crate::open_api::SpecSink;
use crate::route_table::RouteTable;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

///////////////////////////////////////////////////////////////////////////////
//****                         Public Structs                            ****//
///////////////////////////////////////////////////////////////////////////////

/// The merged annotations of one URI
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ResolvedOperations {
    /// Path-level keys taken from the resource docstring
    pub top_level: Metadata,
    /// Operation per lower-case HTTP method
    pub per_method: IndexMap<String, Metadata>,
}

impl ResolvedOperations {
    /// The complete path item for this URI.
    ///
    /// Operations from `per_method` replace any the resource docstring
    /// defined for the same method.
    pub fn into_path_item(self) -> Metadata {
        let mut path_item = self.top_level;
        for (method, operation) in self.per_method {
            path_item.insert(method, Value::Object(operation));
        }
        path_item
    }

    /// Write these operations to `sink` as one path item
    pub fn write_into<S: SpecSink + ?Sized>(self, uri: &str, sink: &mut S) -> Result<(), SpecError> {
        sink.set_path(uri, self.into_path_item())
    }
}

/// Outcome of registering a whole route table
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BuildReport {
    pub registered: Vec<String>,
    pub failures: Vec<(String, RouteDocError)>,
}

impl BuildReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Resolves route annotations through an [`AnnotationParser`]
#[derive(Debug, Clone, Default)]
pub struct OperationResolver<P = YamlDocParser> {
    parser: P,
}

impl OperationResolver<YamlDocParser> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: AnnotationParser> OperationResolver<P> {
    pub fn with_parser(parser: P) -> Self {
        Self { parser }
    }

    /// Merge the annotations bound to `uri`
    pub fn resolve(&self, uri: &str, table: &RouteTable) -> Result<ResolvedOperations, RouteDocError> {
        let entry = table
            .get(uri)
            .ok_or_else(|| RouteDocError::UnknownRoute(uri.to_string()))?;

        let top_level = self.parser.parse_path(entry.resource.doc.as_deref());
        let per_method = entry
            .methods
            .iter()
            .map(|(method, responder)| {
                let operation = self.parser.parse(responder.doc.as_deref());
                if operation.is_empty() {
                    debug!("No annotation on '{}' for {} {}", responder.name, method, uri);
                }
                (method.clone(), operation)
            })
            .collect();

        Ok(ResolvedOperations {
            top_level,
            per_method,
        })
    }

    /// Resolve `uri` and write it into `sink`
    pub fn register<S: SpecSink + ?Sized>(
        &self,
        uri: &str,
        table: &RouteTable,
        sink: &mut S,
    ) -> Result<(), RouteDocError> {
        let resolved = self.resolve(uri, table)?;
        resolved.write_into(uri, sink)?;
        Ok(())
    }

    /// Register every route of `table`; a failing route does not stop the others
    pub fn resolve_all<S: SpecSink + ?Sized>(&self, table: &RouteTable, sink: &mut S) -> BuildReport {
        info!("Registering {} routes into the spec", table.len());
        let mut report = BuildReport::default();

        for uri in table.uris() {
            match self.register(uri, table, sink) {
                Ok(()) => report.registered.push(uri.to_string()),
                Err(e) => {
                    warn!("Could not register path '{}': {}", uri, e);
                    report.failures.push((uri.to_string(), e));
                }
            }
        }
        report
    }
}

///////////////////////////////////////////////////////////////////////////////
//****                       Public Functions                            ****//
///////////////////////////////////////////////////////////////////////////////

/// Resolve `uri` with the YAML docstring parser
pub fn resolve_operation(uri: &str, table: &RouteTable) -> Result<ResolvedOperations, RouteDocError> {
    OperationResolver::new().resolve(uri, table)
}

/// Register every route of `table` with the YAML docstring parser
pub fn resolve_all_operations<S: SpecSink + ?Sized>(table: &RouteTable, sink: &mut S) -> BuildReport {
    OperationResolver::new().resolve_all(table, sink)
}

///////////////////////////////////////////////////////////////////////////////
//****                              Tests                                ****//
///////////////////////////////////////////////////////////////////////////////
