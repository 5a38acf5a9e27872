//! Shape to declaration compilation.
//!
//! Each object shape becomes one interface. Nested object shapes are lifted
//! into interfaces of their own and referenced by name; every other kind is
//! inlined as a type expression. A declaration is always emitted before the
//! declarations nested inside it.

use tracing::debug;

use crate::extract::{Extraction, PathKey};
use crate::shape::{ArrayItems, ObjectShape, Primitive, Shape, ShapeKind};

use super::registry::NameRegistry;
use super::types::{
    DocBlock, Declaration, IndexSignature, Member, OutputDocument, TsPrimitive, TsType,
};
use super::utils::{name_from_path, name_from_property, name_from_title};

/// One compilation run: owns the name registry and the emitted declarations.
#[derive(Debug, Default)]
pub struct Compiler {
    registry: NameRegistry,
    declarations: Vec<Declaration>,
}

impl Compiler {
    /// Fresh run with an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile every object definition of `extraction`, in discovery order.
    ///
    /// Returns the names given to the top-level definitions.
    pub fn compile_extraction(&mut self, extraction: &Extraction<'_>) -> Vec<String> {
        extraction
            .object_definitions()
            .filter_map(|(path, shape)| self.compile_definition(path, shape))
            .collect()
    }

    /// Compile one top-level definition found at `path`.
    ///
    /// Non-object shapes produce nothing and return `None`.
    pub fn compile_definition(&mut self, path: &PathKey, shape: &Shape) -> Option<String> {
        let ShapeKind::Object(object) = &shape.kind else {
            debug!(path = %path, "Skipping non-object definition.");
            return None;
        };

        let base = shape
            .title()
            .map_or_else(|| name_from_path(path), name_from_title);

        let mut emitted = Vec::new();
        let name = self.declare(&base, shape, object, &mut emitted);
        self.declarations.extend(emitted);
        Some(name)
    }

    /// Names claimed so far.
    pub fn registry(&self) -> &NameRegistry {
        &self.registry
    }

    /// Declarations emitted so far.
    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    /// End the run, prefixing the declarations with `header`.
    pub fn finish(self, header: Vec<String>) -> OutputDocument {
        OutputDocument {
            header,
            declarations: self.declarations,
        }
    }

    /// Claim a name for `object` and push its declaration, then the
    /// declarations nested inside it, onto `out`.
    fn declare(
        &mut self,
        base: &str,
        shape: &Shape,
        object: &ObjectShape,
        out: &mut Vec<Declaration>,
    ) -> String {
        // Claimed before members compile so nested shapes cannot take it.
        let name = self.registry.claim(base);
        debug!(declaration = %name, "Added interface.");

        let mut nested = Vec::new();
        let mut members = Vec::with_capacity(object.properties.len());
        for (property, property_shape) in &object.properties {
            let ty = self.type_of(property_shape, &name, property, &mut nested);
            members.push(Member {
                name: property.clone(),
                ty,
                optional: !object.is_required(property),
                docs: DocBlock::from_docs(&property_shape.docs),
            });
        }

        out.push(Declaration {
            name: name.clone(),
            docs: DocBlock::from_docs(&shape.docs),
            index_signature: object
                .additional_properties
                .then(IndexSignature::additional_properties),
            members,
        });
        out.extend(nested);
        name
    }

    /// Type expression for `shape`, found under `property` of interface `outer`.
    fn type_of(
        &mut self,
        shape: &Shape,
        outer: &str,
        property: &str,
        nested: &mut Vec<Declaration>,
    ) -> TsType {
        match &shape.kind {
            ShapeKind::Primitive(Primitive::String) => TsType::Primitive(TsPrimitive::String),
            ShapeKind::Primitive(Primitive::Number) => TsType::Primitive(TsPrimitive::Number),
            ShapeKind::Primitive(Primitive::Boolean) => TsType::Primitive(TsPrimitive::Boolean),
            ShapeKind::Enum(values) => {
                TsType::Union(values.iter().cloned().map(TsType::Literal).collect())
            }
            ShapeKind::Array(items) => {
                let item_type = match items {
                    ArrayItems::Missing => TsType::Primitive(TsPrimitive::Any),
                    ArrayItems::Single(item) => self.type_of(item, outer, property, nested),
                    ArrayItems::Tuple(alternatives) => TsType::Union(
                        alternatives
                            .iter()
                            .map(|item| self.type_of(item, outer, property, nested))
                            .collect(),
                    ),
                };
                TsType::Array(Box::new(item_type))
            }
            ShapeKind::Object(object) => {
                let base = shape
                    .title()
                    .map_or_else(|| name_from_property(outer, property), name_from_title);
                TsType::Ref(self.declare(&base, shape, object, nested))
            }
            ShapeKind::Unspecified => TsType::Primitive(TsPrimitive::Any),
        }
    }
}

/// Compile every object definition of `extraction` in a fresh run.
pub fn compile(extraction: &Extraction<'_>, header: Vec<String>) -> OutputDocument {
    let mut compiler = Compiler::new();
    compiler.compile_extraction(extraction);
    compiler.finish(header)
}
