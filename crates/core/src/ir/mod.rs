//! Intermediate representation for schema to TypeScript declaration generation.
//!
//! Two layers:
//! 1. Compilation: object shapes become named declarations (`compile`)
//! 2. Emission: declarations become code strings via the `Emit` trait
//!
//! ## Module Structure
//!
//! - `types`: TypeScript IR (TsType, Member, Declaration, OutputDocument)
//! - `registry`: run-scoped set of claimed declaration names
//! - `compile`: Shape -> Declaration conversion
//! - `emit`: IR -> code strings
//! - `utils`: naming and quoting helpers

mod compile;
mod emit;
mod registry;
mod types;
pub mod utils;

pub use compile::{Compiler, compile};
pub use emit::Emit;
pub use registry::NameRegistry;
pub use types::{
    Declaration, DocBlock, IndexSignature, Member, OutputDocument, TsPrimitive, TsType,
};
