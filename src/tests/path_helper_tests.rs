use super::*;
use crate::error::RouteDocError;
use serde_json::json;

#[test]
fn gettable_resource() {
    let hello = Arc::new(Resource::new("HelloResource").with_responder("on_get", Some(GET_GREETING)));
    let plugin = plugin_for(&[("/hi", &hello, None)]);
    let mut spec = build_spec();

    plugin.path(&mut spec, "/hi").unwrap();

    assert_eq!(
        spec.path("/hi").unwrap()["get"],
        json!({
            "description": "get a greeting",
            "responses": {"200": {"description": "said hi"}}
        })
    );
}

#[test]
fn posttable_resource() {
    let hello = Arc::new(Resource::new("HelloResource").with_responder("on_post", Some(POST_SOMETHING)));
    let plugin = plugin_for(&[("/hi", &hello, None)]);
    let mut spec = build_spec();

    plugin.path(&mut spec, "/hi").unwrap();

    assert_eq!(
        spec.path("/hi").unwrap()["post"],
        json!({
            "description": "get a greeting",
            "responses": {"201": {"description": "posted something"}}
        })
    );
}

#[test]
fn resource_with_metadata() {
    let hello = Arc::new(Resource::new("HelloResource").with_doc(
        "Greeting API.
            ---
            x-extension: global metadata
            ",
    ));
    let plugin = plugin_for(&[("/hi", &hello, None)]);
    let mut spec = build_spec();

    plugin.path(&mut spec, "/hi").unwrap();

    let path = spec.path("/hi").unwrap();
    assert_eq!(path["x-extension"], json!("global metadata"));
    assert_eq!(path.len(), 1);
}

#[test]
fn path_with_suffix() {
    let hello = suffixed_hello();
    let plugin = plugin_for(&[("/hi", &hello, Some("hello"))]);
    let mut spec = build_spec();

    plugin.path(&mut spec, "/hi").unwrap();

    assert_eq!(
        spec.path("/hi").unwrap()["get"],
        json!({
            "description": "get a greeting",
            "responses": {"200": {"description": "said hi"}}
        })
    );
}

#[test]
fn path_with_suffix_multiple_route() {
    let hello = suffixed_hello();
    let plugin = plugin_for(&[("/", &hello, None), ("/hello", &hello, Some("hello"))]);
    let mut spec = build_spec();

    plugin.path(&mut spec, "/hello").unwrap();
    plugin.path(&mut spec, "/").unwrap();

    assert_eq!(
        spec.path("/").unwrap()["get"]["description"],
        json!("this should not pass")
    );
    assert_eq!(
        spec.path("/hello").unwrap()["get"]["description"],
        json!("get a greeting")
    );
}

#[test]
fn resource_without_endpoint() {
    let plugin = plugin_for(&[]);
    let mut spec = build_spec();

    assert_eq!(
        plugin.path(&mut spec, "/hi"),
        Err(RouteDocError::UnknownRoute("/hi".to_string()))
    );
    assert_eq!(
        plugin.path(&mut spec, ""),
        Err(RouteDocError::UnknownRoute(String::new()))
    );
    assert!(spec.paths().is_empty());
}

#[test]
fn same_path_twice_is_rejected_by_the_spec() {
    let hello = Arc::new(Resource::new("HelloResource").with_responder("on_get", Some(GET_GREETING)));
    let plugin = plugin_for(&[("/hi", &hello, None)]);
    let mut spec = build_spec();

    plugin.path(&mut spec, "/hi").unwrap();
    assert!(matches!(
        plugin.path(&mut spec, "/hi"),
        Err(RouteDocError::Sink(_))
    ));
}

#[test]
fn route_table_is_reused_between_paths() {
    let hello = Arc::new(Resource::new("HelloResource").with_responder("on_get", Some(GET_GREETING)));
    let plugin = plugin_for(&[("/a", &hello, None), ("/b", &hello, None)]);

    let first = plugin.route_table().unwrap();
    let mut spec = build_spec();
    plugin.path(&mut spec, "/a").unwrap();
    let second = plugin.route_table().unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    plugin.invalidate();
    let rebuilt = plugin.route_table().unwrap();
    assert!(!Arc::ptr_eq(&first, &rebuilt));
    assert_eq!(*first, *rebuilt);
}
