//! Schema extraction and TypeScript declaration generation for Swagger/OpenAPI
//! documents.
//!
//! The pipeline is:
//! 1. Walk: depth-first traversal of the loaded document (`walk`)
//! 2. Extract: every `schema` node keyed by its location (`extract`)
//! 3. Compile: object shapes -> named declarations (`ir::compile`)
//! 4. Emit: declarations -> TypeScript text, delivered to a sink

pub mod extract;
pub mod info;
pub mod ir;
pub mod shape;
pub mod sink;
pub mod walk;

pub use extract::{Extraction, PathKey, extract};
pub use info::ApiInfo;
pub use ir::{Compiler, Emit, NameRegistry, OutputDocument};
pub use shape::Shape;
pub use sink::{EmissionSink, EmitError, FileSink, MemorySink};

use serde_json::Value;

/// Extract and compile `document`, prefixing the result with `header`.
pub fn generate(document: &Value, header: Vec<String>) -> OutputDocument {
    ir::compile(&extract(document), header)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_generate_petstore_response() {
        let doc = json!({
            "swagger": "2.0",
            "paths": {
                "/pets": {
                    "get": {
                        "responses": {
                            "200": {
                                "schema": {
                                    "type": "object",
                                    "required": ["id"],
                                    "properties": {
                                        "id": { "type": "integer" },
                                        "tags": { "type": "array", "items": { "type": "string" } }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        });

        let output = generate(&doc, Vec::new()).emit();
        assert_eq!(
            output,
            "export interface PetsGet200 {\n    id: number;\n    tags?: string[];\n}\n"
        );
    }
}
