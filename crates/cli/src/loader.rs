//! Reading Swagger/OpenAPI documents from disk.
//!
//! JSON and YAML inputs load into the same `serde_json::Value` model. Local
//! `$ref` pointers are inlined so schema definitions reach the extraction pass
//! complete.

use serde_json::{Map, Number, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

const REF_KEY: &str = "$ref";
const LOCAL_REF_PREFIX: char = '#';
const VERSION_KEYS: [&str; 2] = ["swagger", "openapi"];

/// Errors raised while loading an input document.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Unreadable {
        /// Input path.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The file is not valid JSON.
    #[error("Failed to parse {} as JSON: {source}", path.display())]
    Json {
        /// Input path.
        path: PathBuf,
        /// Parser error.
        source: serde_json::Error,
    },

    /// The file is not valid YAML.
    #[error("Failed to parse {} as YAML: {source}", path.display())]
    Yaml {
        /// Input path.
        path: PathBuf,
        /// Parser error.
        source: serde_yaml::Error,
    },

    /// The document parsed but does not look like an API description.
    #[error("{} is not a Swagger/OpenAPI document: {reason}", path.display())]
    NotAnApiDescription {
        /// Input path.
        path: PathBuf,
        /// What is missing.
        reason: String,
    },
}

/// Input syntax, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Yaml,
    /// Unknown extension: JSON first, then YAML.
    Guess,
}

impl Format {
    fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("json") => Self::Json,
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Guess,
        }
    }
}

/// Read, parse, validate and dereference the document at `path`.
pub fn load_document(path: &Path) -> Result<Value, LoadError> {
    let contents = fs::read_to_string(path).map_err(|source| LoadError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let mut document = parse_document(&contents, path)?;
    validate(&document, path)?;
    inline_local_refs(&mut document);
    Ok(document)
}

/// Parse `contents` according to the extension of `path`.
pub fn parse_document(contents: &str, path: &Path) -> Result<Value, LoadError> {
    let format = Format::from_path(path);
    debug!(path = %path.display(), ?format, "Parsing input document.");

    match format {
        Format::Json => parse_json(contents, path),
        Format::Yaml => parse_yaml(contents, path),
        Format::Guess => parse_json(contents, path).or_else(|_| parse_yaml(contents, path)),
    }
}

fn parse_json(contents: &str, path: &Path) -> Result<Value, LoadError> {
    serde_json::from_str(contents).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_yaml(contents: &str, path: &Path) -> Result<Value, LoadError> {
    serde_yaml::from_str::<serde_yaml::Value>(contents)
        .map(yaml_to_json)
        .map_err(|source| LoadError::Yaml {
            path: path.to_path_buf(),
            source,
        })
}

/// YAML mappings may use non-string keys (`200:` response codes); they are
/// stringified.
fn yaml_to_json(value: serde_yaml::Value) -> Value {
    match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => yaml_number(&n),
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => {
            Value::Array(items.into_iter().map(yaml_to_json).collect())
        }
        serde_yaml::Value::Mapping(mapping) => {
            let mut object = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                object.insert(yaml_key(key), yaml_to_json(value));
            }
            Value::Object(object)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn yaml_number(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Number(i.into())
    } else if let Some(u) = n.as_u64() {
        Value::Number(u.into())
    } else {
        n.as_f64()
            .and_then(Number::from_f64)
            .map_or(Value::Null, Value::Number)
    }
}

fn yaml_key(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Null => "null".to_string(),
        serde_yaml::Value::Tagged(tagged) => yaml_key(tagged.value),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

/// The root must be a record with a string `swagger` or `openapi` field and a
/// `paths` record.
fn validate(document: &Value, path: &Path) -> Result<(), LoadError> {
    let reject = |reason: &str| LoadError::NotAnApiDescription {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    let Some(root) = document.as_object() else {
        return Err(reject("the root is not a record"));
    };
    if !VERSION_KEYS
        .iter()
        .any(|key| root.get(*key).is_some_and(Value::is_string))
    {
        return Err(reject("missing a `swagger` or `openapi` version field"));
    }
    if !root.get("paths").is_some_and(Value::is_object) {
        return Err(reject("missing a `paths` record"));
    }
    Ok(())
}

/// Replace every `{"$ref": "#/..."}` that resolves inside `document` with a
/// copy of its target.
///
/// Remote and dangling references are left in place. A reference reached
/// again while its own target is being expanded is left in place too.
pub fn inline_local_refs(document: &mut Value) {
    let root = document.clone();
    let mut expanding = Vec::new();
    inline(document, &root, &mut expanding);
}

fn inline(node: &mut Value, root: &Value, expanding: &mut Vec<String>) {
    if let Some(reference) = local_ref(node) {
        if expanding.contains(&reference) {
            debug!(reference = %reference, "Leaving recursive reference in place.");
            return;
        }
        let Some(target) = root.pointer(&reference[1..]) else {
            warn!(reference = %reference, "Unresolvable local reference.");
            return;
        };

        let mut replacement = target.clone();
        expanding.push(reference);
        inline(&mut replacement, root, expanding);
        expanding.pop();
        *node = replacement;
        return;
    }

    match node {
        Value::Object(map) => {
            for child in map.values_mut() {
                inline(child, root, expanding);
            }
        }
        Value::Array(items) => {
            for child in items {
                inline(child, root, expanding);
            }
        }
        _ => {}
    }
}

fn local_ref(node: &Value) -> Option<String> {
    node.get(REF_KEY)
        .and_then(Value::as_str)
        .filter(|reference| reference.starts_with(LOCAL_REF_PREFIX))
        .map(str::to_string)
}
