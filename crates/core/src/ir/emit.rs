//! TypeScript declaration emission via the Emit trait.
//!
//! Each IR node renders itself; containers indent their children with four
//! spaces per level.

use std::fmt::Write as _;

use super::types::{
    DocBlock, Declaration, IndexSignature, Member, OutputDocument, TsPrimitive, TsType,
    text_lines,
};
use super::utils::{escape_single_quoted, quote_if_needed};

const INDENT: &str = "    ";

/// Trait for emitting TypeScript code from IR nodes.
pub trait Emit {
    /// Convert the node to its TypeScript string representation.
    fn emit(&self) -> String;
}

// =============================================================================
// Types
// =============================================================================

impl Emit for TsPrimitive {
    fn emit(&self) -> String {
        match self {
            Self::String => "string".to_string(),
            Self::Number => "number".to_string(),
            Self::Boolean => "boolean".to_string(),
            Self::Any => "any".to_string(),
        }
    }
}

impl Emit for TsType {
    fn emit(&self) -> String {
        match self {
            Self::Primitive(p) => p.emit(),
            Self::Array(inner) => {
                let inner_str = inner.emit();
                if matches!(**inner, Self::Union(_)) {
                    format!("({inner_str})[]")
                } else {
                    format!("{inner_str}[]")
                }
            }
            Self::Union(types) if types.is_empty() => TsPrimitive::Any.emit(),
            Self::Union(types) => types.iter().map(Emit::emit).collect::<Vec<_>>().join(" | "),
            Self::Literal(value) => format!("'{}'", escape_single_quoted(value)),
            Self::Ref(name) => name.clone(),
        }
    }
}

// =============================================================================
// Members
// =============================================================================

impl DocBlock {
    /// Render as a `/** ... */` block with every line prefixed by `indent`.
    pub fn emit_indented(&self, indent: &str) -> String {
        let mut output = format!("{indent}/**\n");
        for line in self.lines() {
            // A literal terminator would end the comment early.
            let line = line.replace("*/", "*\\/");
            if line.trim().is_empty() {
                let _ = writeln!(output, "{indent} *");
            } else {
                let _ = writeln!(output, "{indent} * {}", line.trim_end());
            }
        }
        let _ = writeln!(output, "{indent} */");
        output
    }
}

impl Emit for DocBlock {
    fn emit(&self) -> String {
        self.emit_indented("")
    }
}

impl Emit for Member {
    fn emit(&self) -> String {
        let key = quote_if_needed(&self.name);
        let opt = if self.optional { "?" } else { "" };
        format!("{key}{opt}: {};", self.ty.emit())
    }
}

impl Emit for IndexSignature {
    fn emit(&self) -> String {
        format!("[{}: string]: {};", self.key_name, self.value.emit())
    }
}

// =============================================================================
// Declarations
// =============================================================================

impl Emit for Declaration {
    fn emit(&self) -> String {
        let mut output = String::new();
        if let Some(docs) = &self.docs {
            output.push_str(&docs.emit());
        }
        let _ = writeln!(output, "export interface {} {{", self.name);

        if let Some(signature) = &self.index_signature {
            if let Some(docs) = &signature.docs {
                output.push_str(&docs.emit_indented(INDENT));
            }
            let _ = writeln!(output, "{INDENT}{}", signature.emit());
        }
        for member in &self.members {
            if let Some(docs) = &member.docs {
                output.push_str(&docs.emit_indented(INDENT));
            }
            let _ = writeln!(output, "{INDENT}{}", member.emit());
        }

        output.push_str("}\n");
        output
    }
}

impl Emit for OutputDocument {
    fn emit(&self) -> String {
        let mut sections = Vec::with_capacity(self.declarations.len() + 1);

        if !self.header.is_empty() {
            let mut header = String::from("/*\n");
            for line in self.header.iter().flat_map(|entry| text_lines(entry)) {
                let line = line.replace("*/", "*\\/");
                let line = line.trim_end();
                if line.is_empty() {
                    header.push_str(" *\n");
                } else {
                    let _ = writeln!(header, " * {line}");
                }
            }
            header.push_str(" */\n");
            sections.push(header);
        }
        sections.extend(self.declarations.iter().map(Emit::emit));

        sections.join("\n")
    }
}
