//! # Error Types
//!
//! Errors raised while walking the router tree, resolving operations and
//! writing them into a specification document.
//!
//! Annotation problems are deliberately absent from this list: a missing or
//! malformed docstring degrades to empty metadata and never fails a build.

use std::error::Error;
use std::fmt;

///////////////////////////////////////////////////////////////////////////////
//****                         Public Types                              ****//
///////////////////////////////////////////////////////////////////////////////

/// Errors produced by the route table builder and the operation resolver
#[derive(Debug, Clone, PartialEq)]
pub enum RouteDocError {
    /// A route-bearing node carried no methods; the router's invariant is broken
    InternalConsistency(String),
    /// The requested URI is not part of the route table
    UnknownRoute(String),
    /// The specification document rejected a write
    Sink(SpecError),
}

impl fmt::Display for RouteDocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteDocError::InternalConsistency(msg) => {
                write!(f, "Internal consistency error: {}", msg)
            }
            RouteDocError::UnknownRoute(uri) => {
                write!(f, "Could not find handlers for path='{}'", uri)
            }
            RouteDocError::Sink(err) => write!(f, "Spec sink error: {}", err),
        }
    }
}

impl Error for RouteDocError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RouteDocError::Sink(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SpecError> for RouteDocError {
    fn from(err: SpecError) -> Self {
        RouteDocError::Sink(err)
    }
}

/// Errors raised by the specification document
#[derive(Debug, Clone, PartialEq)]
pub enum SpecError {
    DuplicatePath(String),
    UndefinedPath(String),
    Serialization(String),
    Validation(String),
}

impl fmt::Display for SpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecError::DuplicatePath(path) => write!(f, "Path '{}' is already defined", path),
            SpecError::UndefinedPath(path) => write!(f, "Path '{}' has not been defined", path),
            SpecError::Serialization(msg) => write!(f, "Serialization Error: {}", msg),
            SpecError::Validation(msg) => write!(f, "OpenAPI Validation Error: {}", msg),
        }
    }
}

impl Error for SpecError {}

///////////////////////////////////////////////////////////////////////////////
//****                              Tests                                ****//
///////////////////////////////////////////////////////////////////////////////
