//! # OpenAPI Document Module
//!
//! The specification document routes are registered into. [`ApiSpec`] keeps
//! path items as free-form metadata while a build is running and exports to
//! JSON, YAML or a typed [`openapiv3::OpenAPI`] once it is complete.
//!
//! Writers only see the [`SpecSink`] trait: a path must be defined once
//! before operations or extensions can be attached to it.

use crate::docstring::{Metadata, is_operation_key};
use crate::error::SpecError;
use indexmap::IndexMap;
use openapiv3::OpenAPI;
use serde_json::{Value, json};
use tracing::debug;

///////////////////////////////////////////////////////////////////////////////
//****                         Public Traits                             ****//
///////////////////////////////////////////////////////////////////////////////

/// Write side of a specification document
pub trait SpecSink {
    /// Register `uri` as a path of the document
    fn define_path(&mut self, uri: &str) -> Result<(), SpecError>;

    /// Set the operation for `method` on an already defined path
    fn set_operation(&mut self, uri: &str, method: &str, operation: Metadata) -> Result<(), SpecError>;

    /// Set a path-level key, such as an `x-` extension, on an already defined path
    fn set_path_extension(&mut self, uri: &str, key: &str, value: Value) -> Result<(), SpecError>;

    /// Drop `uri` and everything attached to it
    fn remove_path(&mut self, uri: &str);

    /// Define `uri` with a complete path item, or leave the sink without it.
    ///
    /// Object values under HTTP method keys become operations; every other
    /// key is a path extension. A rejected write removes the path again.
    fn set_path(&mut self, uri: &str, path_item: Metadata) -> Result<(), SpecError> {
        self.define_path(uri)?;

        for (key, value) in path_item {
            let written = match value {
                Value::Object(operation) if is_operation_key(&key) => {
                    self.set_operation(uri, &key, operation)
                }
                value => self.set_path_extension(uri, &key, value),
            };
            if let Err(e) = written {
                debug!("Rolling back path '{}' after a rejected write", uri);
                self.remove_path(uri);
                return Err(e);
            }
        }
        Ok(())
    }
}

///////////////////////////////////////////////////////////////////////////////
//****                         Public Structs                            ****//
///////////////////////////////////////////////////////////////////////////////

/// An OpenAPI 3 document under construction
#[derive(Debug, Clone, PartialEq)]
pub struct ApiSpec {
    pub title: String,
    pub version: String,
    pub openapi_version: String,
    info: Metadata,
    paths: IndexMap<String, Metadata>,
}

impl ApiSpec {
    pub fn new(title: &str, version: &str, openapi_version: &str) -> Self {
        Self {
            title: title.to_string(),
            version: version.to_string(),
            openapi_version: openapi_version.to_string(),
            info: Metadata::new(),
            paths: IndexMap::new(),
        }
    }

    /// Add an extra `info` field, e.g. `description`
    pub fn with_info(mut self, key: &str, value: Value) -> Self {
        self.info.insert(key.to_string(), value);
        self
    }

    pub fn paths(&self) -> &IndexMap<String, Metadata> {
        &self.paths
    }

    pub fn path(&self, uri: &str) -> Option<&Metadata> {
        self.paths.get(uri)
    }

    /// The whole document as a JSON value
    pub fn to_value(&self) -> Value {
        let mut info = self.info.clone();
        info.insert("title".to_string(), json!(self.title));
        info.insert("version".to_string(), json!(self.version));

        json!({
            "openapi": self.openapi_version,
            "info": info,
            "paths": self.paths,
        })
    }

    pub fn to_json(&self) -> Result<String, SpecError> {
        serde_json::to_string_pretty(&self.to_value())
            .map_err(|e| SpecError::Serialization(format!("Failed to write JSON: {}", e)))
    }

    pub fn to_yaml(&self) -> Result<String, SpecError> {
        serde_yaml::to_string(&self.to_value())
            .map_err(|e| SpecError::Serialization(format!("Failed to write YAML: {}", e)))
    }

    /// Convert into a typed OpenAPI document, checking the basic requirements
    pub fn to_openapi(&self) -> Result<OpenAPI, SpecError> {
        parse_openapi_spec_from_value(self.to_value())
    }

    fn path_mut(&mut self, uri: &str) -> Result<&mut Metadata, SpecError> {
        self.paths
            .get_mut(uri)
            .ok_or_else(|| SpecError::UndefinedPath(uri.to_string()))
    }
}

impl SpecSink for ApiSpec {
    fn define_path(&mut self, uri: &str) -> Result<(), SpecError> {
        if self.paths.contains_key(uri) {
            return Err(SpecError::DuplicatePath(uri.to_string()));
        }
        debug!("Defining path '{}'", uri);
        self.paths.insert(uri.to_string(), Metadata::new());
        Ok(())
    }

    fn set_operation(&mut self, uri: &str, method: &str, operation: Metadata) -> Result<(), SpecError> {
        let path = self.path_mut(uri)?;
        path.insert(method.to_string(), Value::Object(operation));
        Ok(())
    }

    fn set_path_extension(&mut self, uri: &str, key: &str, value: Value) -> Result<(), SpecError> {
        let path = self.path_mut(uri)?;
        path.insert(key.to_string(), value);
        Ok(())
    }

    fn remove_path(&mut self, uri: &str) {
        self.paths.shift_remove(uri);
    }

    fn set_path(&mut self, uri: &str, path_item: Metadata) -> Result<(), SpecError> {
        if self.paths.contains_key(uri) {
            return Err(SpecError::DuplicatePath(uri.to_string()));
        }
        debug!("Defining path '{}' with {} keys", uri, path_item.len());
        self.paths.insert(uri.to_string(), path_item);
        Ok(())
    }
}

///////////////////////////////////////////////////////////////////////////////
//****                       Public Functions                            ****//
///////////////////////////////////////////////////////////////////////////////

/// Parses an OpenAPI specification document from a serde_json::Value
///
/// # Arguments
/// * `spec_value` - A serde_json::Value containing the OpenAPI specification
///
/// # Returns
/// * `Ok(OpenAPI)` - Successfully parsed OpenAPI specification
/// * `Err(SpecError)` - The value is not a valid OpenAPI 3 document
pub fn parse_openapi_spec_from_value(spec_value: Value) -> Result<OpenAPI, SpecError> {
    let openapi_spec: OpenAPI = serde_json::from_value(spec_value)
        .map_err(|e| SpecError::Validation(format!("Invalid OpenAPI specification: {}", e)))?;

    validate_openapi_spec(&openapi_spec)?;

    Ok(openapi_spec)
}

///////////////////////////////////////////////////////////////////////////////
//****                       Private Functions                           ****//
///////////////////////////////////////////////////////////////////////////////

/// Validates basic requirements of an OpenAPI specification
fn validate_openapi_spec(spec: &OpenAPI) -> Result<(), SpecError> {
    if !spec.openapi.starts_with("3.") {
        return Err(SpecError::Validation(format!(
            "Unsupported OpenAPI version: {}. Only version 3.x is supported.",
            spec.openapi
        )));
    }

    if spec.info.title.is_empty() {
        return Err(SpecError::Validation(
            "OpenAPI specification must have a non-empty title".to_string(),
        ));
    }

    if spec.info.version.is_empty() {
        return Err(SpecError::Validation(
            "OpenAPI specification must have a non-empty version".to_string(),
        ));
    }

    Ok(())
}

///////////////////////////////////////////////////////////////////////////////
//****                              Tests                                ****//
///////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    fn operation(value: Value) -> Metadata {
        match value {
            Value::Object(map) => map,
            _ => panic!("operation must be an object"),
        }
    }

    fn petstore() -> ApiSpec {
        ApiSpec::new("Swagger Petstore", "1.0.0", "3.0.2")
            .with_info("description", json!("This is a sample Petstore server."))
    }

    #[test]
    fn test_define_path_twice_is_rejected() {
        let mut spec = petstore();
        spec.define_path("/hi").unwrap();
        assert_eq!(
            spec.define_path("/hi"),
            Err(SpecError::DuplicatePath("/hi".to_string()))
        );
    }

    #[test]
    fn test_writes_to_undefined_path_are_rejected() {
        let mut spec = petstore();
        let result = spec.set_operation("/hi", "get", Metadata::new());
        assert_eq!(result, Err(SpecError::UndefinedPath("/hi".to_string())));

        let result = spec.set_path_extension("/hi", "x-extension", json!("value"));
        assert_eq!(result, Err(SpecError::UndefinedPath("/hi".to_string())));
        assert!(spec.paths().is_empty());
    }

    #[test]
    fn test_operations_and_extensions_land_on_path() {
        let mut spec = petstore();
        spec.define_path("/hi").unwrap();
        spec.set_operation("/hi", "get", operation(json!({"summary": "greeting"})))
            .unwrap();
        spec.set_path_extension("/hi", "x-extension", json!("global metadata"))
            .unwrap();

        let path = spec.path("/hi").unwrap();
        assert_eq!(path["get"], json!({"summary": "greeting"}));
        assert_eq!(path["x-extension"], json!("global metadata"));
    }

    #[test]
    fn test_set_path_commits_whole_item() {
        let mut spec = petstore();
        let item = operation(json!({"x-extension": "global metadata", "get": {"summary": "greeting"}}));

        spec.set_path("/hi", item.clone()).unwrap();
        assert_eq!(spec.path("/hi"), Some(&item));
    }

    #[test]
    fn test_set_path_on_existing_path_keeps_old_item() {
        let mut spec = petstore();
        spec.set_path("/hi", operation(json!({"get": {"summary": "first"}})))
            .unwrap();

        let result = spec.set_path("/hi", operation(json!({"post": {"summary": "second"}})));
        assert_eq!(result, Err(SpecError::DuplicatePath("/hi".to_string())));
        assert_eq!(spec.path("/hi").unwrap()["get"], json!({"summary": "first"}));
        assert!(spec.path("/hi").unwrap().get("post").is_none());
    }

    #[test]
    fn test_remove_path_drops_it() {
        let mut spec = petstore();
        spec.define_path("/a").unwrap();
        spec.define_path("/b").unwrap();

        spec.remove_path("/a");
        assert!(spec.path("/a").is_none());
        assert_eq!(spec.paths().keys().collect::<Vec<_>>(), vec!["/b"]);
    }

    #[test]
    fn test_to_value_contains_info_and_paths() {
        let mut spec = petstore();
        spec.define_path("/hi").unwrap();

        let value = spec.to_value();
        assert_eq!(value["openapi"], json!("3.0.2"));
        assert_eq!(value["info"]["title"], json!("Swagger Petstore"));
        assert_eq!(value["info"]["version"], json!("1.0.0"));
        assert_eq!(value["info"]["description"], json!("This is a sample Petstore server."));
        assert_eq!(value["paths"]["/hi"], json!({}));
    }

    #[test]
    fn test_to_yaml_and_json_render_paths() {
        let mut spec = petstore();
        spec.define_path("/hi").unwrap();

        assert!(spec.to_yaml().unwrap().contains("/hi"));
        let reparsed: Value = serde_json::from_str(&spec.to_json().unwrap()).unwrap();
        assert_eq!(reparsed, spec.to_value());
    }

    #[test]
    fn test_to_openapi_converts_documented_paths() {
        let mut spec = petstore();
        spec.define_path("/hi").unwrap();
        spec.set_operation(
            "/hi",
            "get",
            operation(json!({
                "description": "get a greeting",
                "responses": {"200": {"description": "said hi"}}
            })),
        )
        .unwrap();
        spec.set_path_extension("/hi", "x-extension", json!("global metadata"))
            .unwrap();

        let openapi = spec.to_openapi().unwrap();
        assert_eq!(openapi.info.title, "Swagger Petstore");
        assert_eq!(openapi.paths.paths.len(), 1);
    }

    #[test]
    fn test_to_openapi_rejects_old_version() {
        let spec = ApiSpec::new("Old API", "1.0.0", "2.0");
        match spec.to_openapi() {
            Err(SpecError::Validation(msg)) => assert!(msg.contains("Unsupported OpenAPI version")),
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_to_openapi_rejects_empty_title() {
        let spec = ApiSpec::new("", "1.0.0", "3.0.2");
        match spec.to_openapi() {
            Err(SpecError::Validation(msg)) => assert!(msg.contains("non-empty title")),
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }
}
