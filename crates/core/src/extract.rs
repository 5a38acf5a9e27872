//! Single-pass discovery of schema definitions in an API description.

use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use tracing::debug;

use crate::info::ApiInfo;
use crate::shape::Shape;
use crate::walk::{Edge, Flow, Visitor, walk};

/// Top-level key of the operations container.
pub const OPERATIONS_KEY: &str = "paths";
/// Key of an operation's responses container.
pub const RESPONSES_KEY: &str = "responses";
/// Key holding a single schema definition.
pub const SCHEMA_KEY: &str = "schema";
/// Top-level key of the metadata record.
pub const INFO_KEY: &str = "info";

/// Separator used when a path key is displayed.
pub const PATH_SEPARATOR: char = ':';

/// Location of a definition in the document, as record keys and
/// stringified sequence indices from the root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathKey(Vec<String>);

impl PathKey {
    /// Build a key from its segments.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// The path segments, root first.
    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "{PATH_SEPARATOR}")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

/// Everything the extraction pass found, in discovery order.
#[derive(Debug, Default)]
pub struct Extraction<'a> {
    /// Every `schema` node, keyed by its location.
    pub definitions: IndexMap<PathKey, Shape>,
    /// Direct children of the top-level `paths` record, by path template.
    pub operations: IndexMap<String, &'a Value>,
    /// Top-level `info` metadata.
    pub info: Option<ApiInfo>,
}

impl Extraction<'_> {
    /// Definitions describing objects; only these become standalone declarations.
    pub fn object_definitions(&self) -> impl Iterator<Item = (&PathKey, &Shape)> {
        self.definitions.iter().filter(|(_, shape)| shape.is_object())
    }
}

/// Scan `document` once, collecting schema definitions, operations and metadata.
pub fn extract(document: &Value) -> Extraction<'_> {
    let mut extractor = Extractor::default();
    walk(document, &mut extractor);

    let extraction = extractor.result;
    debug!(
        definitions = extraction.definitions.len(),
        operations = extraction.operations.len(),
        has_info = extraction.info.is_some(),
        "Extraction finished."
    );
    extraction
}

#[derive(Default)]
struct Extractor<'a> {
    segments: Vec<String>,
    operations_node: Option<&'a Value>,
    result: Extraction<'a>,
}

impl Extractor<'_> {
    /// Whether the node just entered is a direct child of the root.
    fn at_top_level(&self, edge: Edge<'_>) -> bool {
        matches!(edge, Edge::Key(_)) && self.segments.len() == 1
    }
}

impl<'a> Visitor<'a> for Extractor<'a> {
    fn enter(&mut self, node: &'a Value, parent: Option<&'a Value>, edge: Edge<'a>) -> Flow {
        if let Some(segment) = edge.segment() {
            self.segments.push(segment);
        }
        let key = edge.key();
        let top_level = self.at_top_level(edge);

        if top_level && key == Some(OPERATIONS_KEY) && node.is_object() {
            self.operations_node = Some(node);
        }

        if let (Some(operations), Some(parent), Some(key)) = (self.operations_node, parent, key)
            && std::ptr::eq(operations, parent)
        {
            self.result.operations.insert(key.to_string(), node);
        }

        if key == Some(SCHEMA_KEY) {
            let path = PathKey(self.segments.clone());
            debug!(path = %path, "Found schema definition.");
            self.result.definitions.insert(path, Shape::from_value(node));
            return Flow::Skip;
        }

        if top_level && key == Some(INFO_KEY) && self.result.info.is_none() {
            self.result.info = ApiInfo::from_value(node);
        }

        Flow::Continue
    }

    fn leave(&mut self, node: &'a Value, _parent: Option<&'a Value>, edge: Edge<'a>) {
        if self
            .operations_node
            .is_some_and(|operations| std::ptr::eq(operations, node))
        {
            self.operations_node = None;
        }
        if edge.segment().is_some() {
            self.segments.pop();
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn keys(extraction: &Extraction<'_>) -> Vec<String> {
        extraction
            .definitions
            .keys()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn test_collects_schemas_in_discovery_order() {
        let doc = json!({
            "swagger": "2.0",
            "paths": {
                "/pets": {
                    "get": {
                        "parameters": [
                            { "in": "body", "name": "filter", "schema": { "type": "object" } }
                        ],
                        "responses": {
                            "200": { "schema": { "type": "array", "items": { "type": "string" } } },
                            "default": { "schema": { "type": "object" } }
                        }
                    }
                }
            }
        });

        let extraction = extract(&doc);
        assert_eq!(
            keys(&extraction),
            vec![
                "paths:/pets:get:parameters:0:schema",
                "paths:/pets:get:responses:200:schema",
                "paths:/pets:get:responses:default:schema",
            ]
        );

        let objects: Vec<String> = extraction
            .object_definitions()
            .map(|(path, _)| path.to_string())
            .collect();
        assert_eq!(
            objects,
            vec![
                "paths:/pets:get:parameters:0:schema",
                "paths:/pets:get:responses:default:schema",
            ]
        );
    }

    #[test]
    fn test_schema_nodes_are_not_descended() {
        let doc = json!({
            "paths": {
                "/a": {
                    "schema": {
                        "type": "object",
                        "properties": { "schema": { "type": "object" } }
                    }
                }
            }
        });

        let extraction = extract(&doc);
        assert_eq!(keys(&extraction), vec!["paths:/a:schema"]);
    }

    #[test]
    fn test_operations_are_direct_children_of_paths() {
        let doc = json!({
            "paths": {
                "/pets": { "get": {} },
                "/pets/{id}": { "delete": { "responses": {} } }
            },
            "definitions": { "paths": { "/nested": {} } }
        });

        let extraction = extract(&doc);
        let operations: Vec<&str> = extraction.operations.keys().map(String::as_str).collect();
        assert_eq!(operations, vec!["/pets", "/pets/{id}"]);
        assert_eq!(extraction.operations["/pets"], &json!({ "get": {} }));
    }

    #[test]
    fn test_only_top_level_info_is_captured() {
        let doc = json!({
            "info": { "title": "Top", "version": "1" },
            "x-extra": { "info": { "title": "Nested" } }
        });

        let info = extract(&doc).info.unwrap();
        assert_eq!(info.title.as_deref(), Some("Top"));

        let nested_only = json!({ "x-extra": { "info": { "title": "Nested" } } });
        assert!(extract(&nested_only).info.is_none());
    }

    #[test]
    fn test_path_key_display() {
        let key = PathKey::new(["paths", "/pets", "get"]);
        assert_eq!(key.to_string(), "paths:/pets:get");
        assert_eq!(key.segments().len(), 3);
        assert_eq!(PathKey::new(Vec::<String>::new()).to_string(), "");
    }

    #[test]
    fn test_two_runs_agree() {
        let doc = json!({
            "paths": { "/a": { "get": { "responses": { "200": { "schema": { "type": "object" } } } } } }
        });
        assert_eq!(keys(&extract(&doc)), keys(&extract(&doc)));
    }
}
