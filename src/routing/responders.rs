//! Fallback responders the router installs for methods a resource does not implement.

use super::Responder;

/// Module identity shared by every framework-supplied responder
pub const DEFAULT_RESPONDER_MODULE: &str = "routedoc::responders";

/// Responder installed for `OPTIONS` when the resource has none
pub fn default_options() -> Responder {
    Responder {
        name: "default_options".to_string(),
        module: DEFAULT_RESPONDER_MODULE.to_string(),
        doc: Some("Answer OPTIONS with the allowed methods.".to_string()),
    }
}

/// Responder installed for any other unimplemented method
pub fn method_not_allowed() -> Responder {
    Responder {
        name: "method_not_allowed".to_string(),
        module: DEFAULT_RESPONDER_MODULE.to_string(),
        doc: Some("Respond with 405 Method Not Allowed.".to_string()),
    }
}
