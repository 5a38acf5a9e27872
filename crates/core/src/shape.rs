//! Data-shape definitions read from `schema` nodes.
//!
//! Schema nodes are deserialized leniently into a raw form and then folded
//! into the closed [`ShapeKind`] enum. Anything the compiler cannot interpret
//! becomes [`ShapeKind::Unspecified`] instead of an error.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

/// A typed value description.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    /// What kind of value this is.
    pub kind: ShapeKind,
    /// Human-authored documentation.
    pub docs: ShapeDocs,
}

/// Closed set of shape kinds the compiler understands.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    /// `string`, `number`/`integer` or `boolean`.
    Primitive(Primitive),
    /// A `string` restricted to the listed literals.
    Enum(Vec<String>),
    /// An `array` and its item description.
    Array(ArrayItems),
    /// An `object` with named properties.
    Object(ObjectShape),
    /// Missing or unsupported `type`.
    Unspecified,
}

/// Scalar kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// `string`
    String,
    /// `number` or `integer`
    Number,
    /// `boolean`
    Boolean,
}

/// Item description of an array shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayItems {
    /// No `items` declared.
    Missing,
    /// A single item shape.
    Single(Box<Shape>),
    /// A list of alternative item shapes.
    Tuple(Vec<Shape>),
}

/// Properties of an object shape, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectShape {
    /// Named properties.
    pub properties: IndexMap<String, Shape>,
    /// Names listed under `required`.
    pub required: Vec<String>,
    /// Whether `additionalProperties` allows free-form members.
    pub additional_properties: bool,
}

impl ObjectShape {
    /// Whether `name` is listed as required.
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }
}

/// Documentation fields of a shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShapeDocs {
    /// `description`
    pub description: Option<String>,
    /// `title`
    pub title: Option<String>,
    /// `externalDocs.url`
    pub external_docs: Option<String>,
}

impl ShapeDocs {
    /// Whether no documentation field is set.
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.title.is_none() && self.external_docs.is_none()
    }
}

/// Schema node fields the compiler reads. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawShape {
    #[serde(rename = "type")]
    kind: Option<Value>,
    title: Option<String>,
    description: Option<String>,
    external_docs: Option<ExternalDocs>,
    properties: IndexMap<String, Value>,
    required: Vec<String>,
    items: Option<Value>,
    #[serde(rename = "enum")]
    enum_values: Option<Vec<Value>>,
    additional_properties: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ExternalDocs {
    url: Option<String>,
}

impl Shape {
    /// An untyped shape without documentation.
    pub fn unspecified() -> Self {
        Self {
            kind: ShapeKind::Unspecified,
            docs: ShapeDocs::default(),
        }
    }

    /// Interpret a schema node.
    pub fn from_value(value: &Value) -> Self {
        if !value.is_object() {
            return Self::unspecified();
        }
        match RawShape::deserialize(value) {
            Ok(raw) => raw.into_shape(),
            Err(err) => {
                warn!(error = %err, "Unreadable schema node, falling back to an untyped shape.");
                Self::unspecified()
            }
        }
    }

    /// Whether this shape describes an object.
    pub fn is_object(&self) -> bool {
        matches!(self.kind, ShapeKind::Object(_))
    }

    /// The `title`, if any.
    pub fn title(&self) -> Option<&str> {
        self.docs.title.as_deref()
    }
}

impl RawShape {
    fn into_shape(self) -> Shape {
        let docs = ShapeDocs {
            description: self.description,
            title: self.title,
            external_docs: self.external_docs.and_then(|d| d.url),
        };

        let kind = match self.kind.as_ref().and_then(type_name) {
            Some("array") => ShapeKind::Array(array_items(self.items.as_ref())),
            Some("boolean") => ShapeKind::Primitive(Primitive::Boolean),
            Some("integer" | "number") => ShapeKind::Primitive(Primitive::Number),
            Some("object") => ShapeKind::Object(ObjectShape {
                properties: self
                    .properties
                    .iter()
                    .map(|(name, value)| (name.clone(), Shape::from_value(value)))
                    .collect(),
                required: self.required,
                additional_properties: allows_additional(self.additional_properties.as_ref()),
            }),
            Some("string") => string_kind(self.enum_values.as_deref()),
            _ => ShapeKind::Unspecified,
        };

        Shape { kind, docs }
    }
}

/// Resolve `type`, accepting a list with a single non-null entry.
fn type_name(kind: &Value) -> Option<&str> {
    match kind {
        Value::String(name) => Some(name.as_str()),
        Value::Array(names) => {
            let mut non_null = names
                .iter()
                .filter_map(Value::as_str)
                .filter(|name| *name != "null");
            match (non_null.next(), non_null.next()) {
                (Some(name), None) => Some(name),
                _ => None,
            }
        }
        _ => None,
    }
}

fn array_items(items: Option<&Value>) -> ArrayItems {
    match items {
        Some(Value::Array(list)) if !list.is_empty() => {
            ArrayItems::Tuple(list.iter().map(Shape::from_value).collect())
        }
        Some(item @ Value::Object(_)) => ArrayItems::Single(Box::new(Shape::from_value(item))),
        _ => ArrayItems::Missing,
    }
}

fn allows_additional(additional: Option<&Value>) -> bool {
    match additional {
        Some(Value::Bool(allowed)) => *allowed,
        Some(Value::Object(_)) => true,
        _ => false,
    }
}

/// Non-string enum entries are dropped; an enum left empty is a plain string.
fn string_kind(enum_values: Option<&[Value]>) -> ShapeKind {
    let literals: Vec<String> = enum_values
        .unwrap_or_default()
        .iter()
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect();

    if literals.is_empty() {
        ShapeKind::Primitive(Primitive::String)
    } else {
        ShapeKind::Enum(literals)
    }
}
