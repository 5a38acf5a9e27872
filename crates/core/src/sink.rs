//! Destinations for rendered declaration files.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::ir::{Emit, OutputDocument};

/// Errors raised while delivering a rendered document.
#[derive(Debug, Error)]
pub enum EmitError {
    /// The output directory could not be created.
    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The declaration file could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// File that could not be written.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
}

/// Receives the finished document of a run.
pub trait EmissionSink {
    /// Render and deliver `document`.
    fn write(&mut self, document: &OutputDocument) -> Result<(), EmitError>;
}

/// Writes the rendered document to a file, creating parent directories.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Sink writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Destination file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EmissionSink for FileSink {
    fn write(&mut self, document: &OutputDocument) -> Result<(), EmitError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| EmitError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(&self.path, document.emit()).map_err(|source| EmitError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), "Wrote declaration file.");
        Ok(())
    }
}

/// Keeps the rendered document in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    contents: String,
}

impl MemorySink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of the last document written; empty before the first write.
    pub fn contents(&self) -> &str {
        &self.contents
    }
}

impl EmissionSink for MemorySink {
    fn write(&mut self, document: &OutputDocument) -> Result<(), EmitError> {
        self.contents = document.emit();
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::ir::Declaration;
    use tempfile::TempDir;

    fn document() -> OutputDocument {
        OutputDocument {
            header: vec!["Generated".into()],
            declarations: vec![Declaration {
                name: "Pet".into(),
                docs: None,
                index_signature: None,
                members: vec![],
            }],
        }
    }

    #[test]
    fn test_memory_sink_keeps_rendered_text() {
        let mut sink = MemorySink::new();
        assert_eq!(sink.contents(), "");
        sink.write(&document()).unwrap();
        assert_eq!(sink.contents(), document().emit());
        assert!(sink.contents().contains("export interface Pet {"));
    }

    #[test]
    fn test_file_sink_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("petstore").join("1.0.0").join("schemas.d.ts");

        let mut sink = FileSink::new(&path);
        sink.write(&document()).unwrap();

        assert_eq!(sink.path(), path);
        assert_eq!(fs::read_to_string(&path).unwrap(), document().emit());
    }

    #[test]
    fn test_file_sink_reports_write_failure() {
        let temp_dir = TempDir::new().unwrap();
        // The destination is an existing directory.
        let mut sink = FileSink::new(temp_dir.path());

        let err = sink.write(&document()).unwrap_err();
        assert!(matches!(err, EmitError::Write { .. }));
        assert!(err.to_string().starts_with("Failed to write"));
    }
}
