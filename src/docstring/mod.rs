//! # Docstring Module
//!
//! Extracts structured annotations from documentation strings. An annotation
//! is the YAML block that starts at the first line beginning with `---`:
//!
//! ```text
//! A greeting endpoint.
//! ---
//! description: get a greeting
//! responses:
//!     200:
//!         description: said hi
//! ```
//!
//! Parsing never fails. A missing docstring, a docstring without a marker or
//! a block that is not a YAML mapping all produce empty metadata; malformed
//! YAML is logged and dropped the same way.

use serde_json::{Map, Number, Value};
use serde_yaml::Value as YamlValue;
use tracing::warn;

/// Structured annotation data, as it is written into the spec
pub type Metadata = Map<String, Value>;

/// Path-item keys a resource docstring may define besides `x-` extensions
pub const PATH_KEYS: [&str; 7] = ["get", "put", "post", "delete", "options", "head", "patch"];

const TAB_WIDTH: usize = 8;

///////////////////////////////////////////////////////////////////////////////
//****                         Public Traits                             ****//
///////////////////////////////////////////////////////////////////////////////

/// Turns documentation strings into metadata
pub trait AnnotationParser {
    /// Full annotation of a docstring
    fn parse(&self, doc: Option<&str>) -> Metadata;

    /// Annotation of a resource docstring, restricted to path-item keys
    fn parse_path(&self, doc: Option<&str>) -> Metadata {
        path_keys_only(self.parse(doc))
    }
}

/// The YAML-after-`---` parser
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlDocParser;

impl AnnotationParser for YamlDocParser {
    fn parse(&self, doc: Option<&str>) -> Metadata {
        doc.map(load_yaml_from_docstring).unwrap_or_default()
    }

    fn parse_path(&self, doc: Option<&str>) -> Metadata {
        doc.map(load_operations_from_docstring).unwrap_or_default()
    }
}

///////////////////////////////////////////////////////////////////////////////
//****                       Public Functions                            ****//
///////////////////////////////////////////////////////////////////////////////

/// Normalize docstring indentation.
///
/// The first line is stripped, the remaining lines lose their common
/// indentation, and blank lines at either end are removed.
pub fn trim_docstring(docstring: &str) -> String {
    if docstring.trim().is_empty() {
        return String::new();
    }

    let lines: Vec<String> = docstring.lines().map(expand_tabs).collect();
    let indent = lines
        .iter()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(|line| leading_spaces(line))
        .min()
        .unwrap_or(0);

    let mut trimmed: Vec<&str> = Vec::with_capacity(lines.len());
    trimmed.push(lines[0].trim());
    for line in lines.iter().skip(1) {
        if line.trim().is_empty() {
            trimmed.push("");
        } else {
            trimmed.push(line[indent..].trim_end());
        }
    }

    while trimmed.last().is_some_and(|line| line.is_empty()) {
        trimmed.pop();
    }
    let start = trimmed.iter().position(|line| !line.is_empty()).unwrap_or(0);
    trimmed[start..].join("\n")
}

/// Load the YAML annotation of a docstring as metadata
pub fn load_yaml_from_docstring(docstring: &str) -> Metadata {
    let trimmed = trim_docstring(docstring);
    let lines: Vec<&str> = trimmed.split('\n').collect();

    let Some(cut_from) = lines
        .iter()
        .position(|line| line.trim().starts_with("---"))
    else {
        return Metadata::new();
    };

    let yaml = dedent(&lines[cut_from..]);
    match serde_yaml::from_str::<YamlValue>(&yaml) {
        Ok(value) => match yaml_to_json(value) {
            Value::Object(map) => map,
            Value::Null => Metadata::new(),
            other => {
                warn!("Ignoring docstring annotation that is not a mapping: {}", other);
                Metadata::new()
            }
        },
        Err(e) => {
            warn!("Ignoring malformed docstring annotation: {}", e);
            Metadata::new()
        }
    }
}

/// Load the path-level annotation of a resource docstring
pub fn load_operations_from_docstring(docstring: &str) -> Metadata {
    path_keys_only(load_yaml_from_docstring(docstring))
}

/// Whether `key` names an HTTP method operation of a path item
pub fn is_operation_key(key: &str) -> bool {
    PATH_KEYS.contains(&key)
}

///////////////////////////////////////////////////////////////////////////////
//****                       Private Functions                           ****//
///////////////////////////////////////////////////////////////////////////////

fn path_keys_only(metadata: Metadata) -> Metadata {
    metadata
        .into_iter()
        .filter(|(key, _)| is_operation_key(key) || key.starts_with("x-"))
        .collect()
}

fn expand_tabs(line: &str) -> String {
    let mut expanded = String::with_capacity(line.len());
    let mut column = 0;
    for c in line.chars() {
        if c == '\t' {
            let spaces = TAB_WIDTH - column % TAB_WIDTH;
            expanded.extend(std::iter::repeat_n(' ', spaces));
            column += spaces;
        } else {
            expanded.push(c);
            column += 1;
        }
    }
    expanded
}

fn leading_spaces(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

fn dedent(lines: &[&str]) -> String {
    let indent = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| leading_spaces(line))
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|line| if line.trim().is_empty() { "" } else { &line[indent..] })
        .collect::<Vec<_>>()
        .join("\n")
}

fn yaml_to_json(value: YamlValue) -> Value {
    match value {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(b),
        YamlValue::Number(n) => {
            if let Some(u) = n.as_u64() {
                Value::from(u)
            } else if let Some(i) = n.as_i64() {
                Value::from(i)
            } else {
                n.as_f64()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or(Value::Null)
            }
        }
        YamlValue::String(s) => Value::String(s),
        YamlValue::Sequence(seq) => Value::Array(seq.into_iter().map(yaml_to_json).collect()),
        YamlValue::Mapping(mapping) => Value::Object(
            mapping
                .into_iter()
                .map(|(key, value)| (yaml_key(key), yaml_to_json(value)))
                .collect(),
        ),
        YamlValue::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

/// Response codes and other scalar keys become strings, `200` -> `"200"`
fn yaml_key(key: YamlValue) -> String {
    match key {
        YamlValue::String(s) => s,
        YamlValue::Number(n) => n.to_string(),
        YamlValue::Bool(b) => b.to_string(),
        YamlValue::Null => "null".to_string(),
        other => yaml_to_json(other).to_string(),
    }
}

///////////////////////////////////////////////////////////////////////////////
//****                              Tests                                ****//
///////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const GREETING: &str = "A greeting endpoint.
                ---
                description: get a greeting
                summary: greeting
                responses:
                    200:
                        description: said hi
                ";

    #[test]
    fn test_trim_docstring_dedents_body() {
        let doc = "Summary line.\n\n        Body line.\n            Nested.\n        ";
        assert_eq!(trim_docstring(doc), "Summary line.\n\nBody line.\n    Nested.");
    }

    #[test]
    fn test_trim_docstring_drops_leading_blank_lines() {
        assert_eq!(trim_docstring("\n\n    text\n"), "text");
        assert_eq!(trim_docstring("   \n  "), "");
    }

    #[test]
    fn test_trim_docstring_expands_tabs() {
        assert_eq!(trim_docstring("Head\n\tbody\n\t  more"), "Head\nbody\n  more");
    }

    #[test]
    fn test_load_yaml_from_docstring() {
        let metadata = load_yaml_from_docstring(GREETING);
        assert_eq!(
            Value::Object(metadata),
            json!({
                "description": "get a greeting",
                "summary": "greeting",
                "responses": {"200": {"description": "said hi"}}
            })
        );
    }

    #[test]
    fn test_docstring_without_marker_is_empty() {
        assert!(load_yaml_from_docstring("Just prose.\n    No annotation here.").is_empty());
    }

    #[test]
    fn test_marker_with_nothing_after_is_empty() {
        assert!(load_yaml_from_docstring("Summary.\n    ---\n    ").is_empty());
    }

    #[test]
    fn test_malformed_yaml_is_empty() {
        let doc = "Broken.\n    ---\n    description: [unterminated\n    ";
        assert!(load_yaml_from_docstring(doc).is_empty());
    }

    #[test]
    fn test_non_mapping_yaml_is_empty() {
        let doc = "List.\n    ---\n    - one\n    - two\n    ";
        assert!(load_yaml_from_docstring(doc).is_empty());
    }

    #[test]
    fn test_scalar_keys_become_strings() {
        let doc = "Keys.\n---\n404: missing\ntrue: yes\n1.5: ratio\n";
        let metadata = load_yaml_from_docstring(doc);
        assert_eq!(metadata["404"], json!("missing"));
        assert_eq!(metadata["true"], json!("yes"));
        assert_eq!(metadata["1.5"], json!("ratio"));
    }

    #[test]
    fn test_load_operations_keeps_path_keys() {
        let doc = "Greeting API.
            ---
            x-extension: global metadata
            description: not a path key
            get:
                summary: from the resource
            ";
        let metadata = load_operations_from_docstring(doc);
        assert_eq!(
            Value::Object(metadata),
            json!({
                "x-extension": "global metadata",
                "get": {"summary": "from the resource"}
            })
        );
    }

    #[test]
    fn test_yaml_doc_parser_path_scope_drops_non_path_keys() {
        let doc = "Greeting API.\n---\nx-owner: team\nsummary: not a path key\n";
        let parser = YamlDocParser;
        assert_eq!(Value::Object(parser.parse_path(Some(doc))), json!({"x-owner": "team"}));
        assert!(parser.parse_path(None).is_empty());
    }

    #[test]
    fn test_yaml_doc_parser_handles_absent_doc() {
        let parser = YamlDocParser;
        assert!(parser.parse(None).is_empty());
        assert!(parser.parse_path(None).is_empty());
        assert_eq!(parser.parse(Some(GREETING))["summary"], json!("greeting"));
    }
}
