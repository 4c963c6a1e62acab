//! Tests for registering router paths into a spec document
use crate::open_api::ApiSpec;
use crate::plugin::RouterPlugin;
use crate::routing::{Resource, Router};
use std::sync::Arc;

mod path_helper_tests;

pub(crate) const GET_GREETING: &str = "A greeting endpoint.
                ---
                description: get a greeting
                responses:
                    200:
                        description: said hi
                ";

pub(crate) const INVALID_GET: &str = "An invalid method.
                ---
                description: this should not pass
                responses:
                    200:
                        description: said hi
                ";

pub(crate) const POST_SOMETHING: &str = "A greeting endpoint.
                ---
                description: get a greeting
                responses:
                    201:
                        description: posted something
                ";

pub(crate) fn build_spec() -> ApiSpec {
    ApiSpec::new("Swagger Petstore", "1.0.0", "3.0.2").with_info(
        "description",
        serde_json::json!("This is a sample Petstore server."),
    )
}

pub(crate) fn plugin_for(routes: &[(&str, &Arc<Resource>, Option<&str>)]) -> RouterPlugin {
    let mut router = Router::new();
    for (uri, resource, suffix) in routes {
        router
            .add_route(uri, Arc::clone(resource), *suffix)
            .unwrap();
    }
    RouterPlugin::new(Arc::new(router), true)
}

/// Resource answering both `on_get_hello` and `on_get`
pub(crate) fn suffixed_hello() -> Arc<Resource> {
    Arc::new(
        Resource::new("HelloResource")
            .with_responder("on_get_hello", Some(GET_GREETING))
            .with_responder("on_get", Some(INVALID_GET)),
    )
}
