//! `oasdecl.toml` configuration file.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config filename looked up in the working directory
pub const CONFIG_FILENAME: &str = "oasdecl.toml";

const DEFAULT_OUTPUT_DIR: &str = "output";
const DEFAULT_FILE_NAME: &str = "schemas.d.ts";

/// Errors raised while reading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The file is not valid TOML or has unexpected keys.
    #[error("Failed to parse config file {}: {source}", path.display())]
    Parse {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },
}

/// Generator configuration.
///
/// Every key is optional; CLI flags take precedence over file values.
///
/// ```toml
/// output-dir = "types"
/// file-name = "api.d.ts"
/// banner = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Root directory declaration files are written under.
    pub output_dir: PathBuf,
    /// Name of the generated declaration file.
    pub file_name: String,
    /// Print the tool banner before generating.
    pub banner: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            file_name: DEFAULT_FILE_NAME.to_string(),
            banner: true,
        }
    }
}

impl Config {
    /// Parse a config from TOML source. `path` is only used for error messages.
    pub fn from_toml_str(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read and parse the config file at `path`.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents, path)
    }

    /// Resolve the effective config.
    ///
    /// An explicit path must exist. Without one, `oasdecl.toml` in `dir` is
    /// used when present and defaults otherwise.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::read(path);
        }

        let default_path = dir.join(CONFIG_FILENAME);
        if default_path.is_file() {
            Self::read(&default_path)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_no_file() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(None, dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.file_name, "schemas.d.ts");
        assert!(config.banner);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config =
            Config::from_toml_str("file-name = \"api.d.ts\"\n", Path::new("x.toml")).unwrap();
        assert_eq!(config.file_name, "api.d.ts");
        assert_eq!(config.output_dir, PathBuf::from("output"));
    }

    #[test]
    fn test_discovers_file_in_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            "output-dir = \"types\"\nbanner = false\n",
        )
        .unwrap();

        let config = Config::load(None, dir.path()).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("types"));
        assert!(!config.banner);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = Config::load(Some(&missing), dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_unknown_key_is_error() {
        let err = Config::from_toml_str("outdir = \"x\"\n", Path::new("x.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("x.toml"));
    }
}
