//! TypeScript declaration IR.
//!
//! - TsType: member type expressions (primitives, arrays, unions, literals, refs)
//! - Declaration: one exported interface and its members
//! - OutputDocument: header block plus every declaration of a run

use crate::shape::ShapeDocs;

/// TypeScript type representation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsType {
    /// Primitive types: string, number, boolean, any
    Primitive(TsPrimitive),
    /// Array type: T[]
    Array(Box<TsType>),
    /// Union type: A | B | C
    Union(Vec<TsType>),
    /// String literal type: 'foo'
    Literal(String),
    /// Named type reference: an interface emitted in the same document
    Ref(String),
}

/// TypeScript primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsPrimitive {
    /// `string`
    String,
    /// `number`
    Number,
    /// `boolean`
    Boolean,
    /// `any`, the fallback for shapes without a usable type
    Any,
}

/// Lines of a `/** ... */` comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocBlock {
    lines: Vec<String>,
}

impl DocBlock {
    /// Doc block with the given lines; `None` if there are none.
    pub fn new<I, S>(lines: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<String> = lines
            .into_iter()
            .flat_map(|line| {
                let line: String = line.into();
                line.lines().map(str::to_string).collect::<Vec<_>>()
            })
            .collect();
        if lines.is_empty() {
            None
        } else {
            Some(Self { lines })
        }
    }

    /// Description, `Title: …` and `External docs: …`, absent fields omitted.
    pub fn from_docs(docs: &ShapeDocs) -> Option<Self> {
        Self::new(
            [
                docs.description.clone(),
                docs.title.as_ref().map(|title| format!("Title: {title}")),
                docs.external_docs
                    .as_ref()
                    .map(|url| format!("External docs: {url}")),
            ]
            .into_iter()
            .flatten(),
        )
    }

    /// The comment lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// Physical lines of `text`, split the way doc blocks split their entries.
///
/// Unlike `str::lines`, an empty string yields one empty line.
pub(crate) fn text_lines(text: &str) -> impl Iterator<Item = &str> {
    text.is_empty().then_some("").into_iter().chain(text.lines())
}

/// Interface member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Property name as written in the schema.
    pub name: String,
    /// Compiled type expression.
    pub ty: TsType,
    /// Rendered with `?` when true.
    pub optional: bool,
    /// Attached documentation.
    pub docs: Option<DocBlock>,
}

/// `[key: string]: value` member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSignature {
    /// Key parameter name.
    pub key_name: String,
    /// Value type.
    pub value: TsType,
    /// Attached documentation.
    pub docs: Option<DocBlock>,
}

impl IndexSignature {
    /// `[prop: string]: any`, as produced by `additionalProperties`.
    pub fn additional_properties() -> Self {
        Self {
            key_name: "prop".to_string(),
            value: TsType::Primitive(TsPrimitive::Any),
            docs: DocBlock::new(["schema.additionalProperties: true"]),
        }
    }
}

/// `export interface Name { ... }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Unique interface name.
    pub name: String,
    /// Attached documentation.
    pub docs: Option<DocBlock>,
    /// Free-form members, emitted before the named ones.
    pub index_signature: Option<IndexSignature>,
    /// Named members in schema order.
    pub members: Vec<Member>,
}

impl Declaration {
    /// Member by name.
    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.name == name)
    }
}

/// Complete declaration file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputDocument {
    /// Lines of the leading `/* ... */` block; empty for none.
    pub header: Vec<String>,
    /// Declarations in emission order.
    pub declarations: Vec<Declaration>,
}

impl OutputDocument {
    /// Declaration by name.
    pub fn declaration(&self, name: &str) -> Option<&Declaration> {
        self.declarations.iter().find(|d| d.name == name)
    }

    /// Declaration names in emission order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.declarations.iter().map(|d| d.name.as_str())
    }
}
