//! Repository-level configuration.
//!
//! A repository opts in by placing a `prdoc.toml` (or `.prdoc.toml`) at its
//! root. Every key is optional; a missing or absent config means built-in
//! defaults: the embedded schema, the `prdoc/` folder and `github.com` as the
//! forge host.

use crate::github::DEFAULT_HOST;
use crate::schema::{Schema, SchemaError, PRDOC_DEFAULT_DIR};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Conventional config file names, tried in order.
pub const CONFIG_NAMES: &[&str] = &["prdoc.toml", ".prdoc.toml"];

/// Environment variables honored by the CLI.
pub mod env {
    /// Points at a config file outside the conventional locations.
    pub const PRDOC_CONFIG: &str = "PRDOC_CONFIG";
}

/// Errors that can occur while loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the config file.
    #[error("Failed to read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the config file.
    #[error("Failed to parse config '{path}': {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// No config file was found anywhere.
    #[error("No config file found")]
    Missing,
}

/// Parsed `prdoc.toml` content.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ForgeConfig {
    /// Schema file used for validation. Unset means the embedded schema.
    pub schema: Option<PathBuf>,

    /// Folders searched by check, scan and load.
    pub prdoc_folders: Vec<PathBuf>,

    /// Where generate writes new files.
    pub output_dir: PathBuf,

    /// Skeleton template used by generate. Unset means the embedded one.
    pub template: Option<PathBuf>,

    /// Forge host submission URLs point at.
    pub host: String,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            schema: None,
            prdoc_folders: vec![PathBuf::from(PRDOC_DEFAULT_DIR)],
            output_dir: PathBuf::from(PRDOC_DEFAULT_DIR),
            template: None,
            host: DEFAULT_HOST.to_string(),
        }
    }
}

impl ForgeConfig {
    /// Finds the config file: an explicit path wins, then the conventional
    /// names at the project root.
    #[must_use]
    pub fn find_file(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            if path.exists() {
                debug!(path = %path.display(), "Found config");
                return Some(path.to_path_buf());
            }
            warn!(path = %path.display(), "Config path does not exist, trying conventional names");
        }

        let root = project_root();
        for name in CONFIG_NAMES {
            let candidate = root.join(name);
            if candidate.exists() {
                debug!(path = %candidate.display(), "Found config");
                return Some(candidate);
            }
        }

        None
    }

    /// Loads the config, searching the conventional locations.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when no file is found, or a read or
    /// parse error for a file that exists but does not load.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = Self::find_file(explicit).ok_or(ConfigError::Missing)?;
        Self::from_file(&path)
    }

    /// Loads the config, falling back to the defaults when none is found.
    /// A file that exists but fails to load is reported and also falls back.
    #[must_use]
    pub fn load_or_default(explicit: Option<&Path>) -> Self {
        match Self::load(explicit) {
            Ok(config) => config,
            Err(ConfigError::Missing) => {
                debug!("No config file, using defaults");
                Self::default()
            }
            Err(e) => {
                warn!(error = %e, "Invalid config, using defaults");
                Self::default()
            }
        }
    }

    /// Parses one specific config file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        toml::from_str(&text).map_err(|e| ConfigError::Toml {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Loads the schema the config points at, or the embedded one.
    ///
    /// # Errors
    ///
    /// Returns an error when the configured schema file does not load.
    pub fn schema(&self) -> Result<Schema, SchemaError> {
        match &self.schema {
            Some(path) => Schema::from_path(path),
            None => Schema::embedded(),
        }
    }
}

/// Finds the repository root by walking up from the current directory until a
/// `.git` entry appears. Falls back to the current directory when there is
/// none.
#[must_use]
pub fn project_root() -> PathBuf {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let mut dir = cwd.clone();
    loop {
        if dir.join(".git").exists() {
            return dir;
        }
        if !dir.pop() {
            return cwd;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_point_at_the_conventional_folder() {
        let config = ForgeConfig::default();

        assert_eq!(config.prdoc_folders, vec![PathBuf::from("prdoc")]);
        assert_eq!(config.output_dir, PathBuf::from("prdoc"));
        assert_eq!(config.host, "github.com");
        assert!(config.schema.is_none());
        assert!(config.template.is_none());
    }

    #[test]
    fn parses_a_full_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("prdoc.toml");
        fs::write(
            &path,
            r#"
schema = "docs/schema.json"
prdoc_folders = ["prdoc", "changelog"]
output_dir = "changelog"
template = "docs/template.prdoc.hbs"
host = "git.example.org"
"#,
        )
        .unwrap();

        let config = ForgeConfig::from_file(&path).unwrap();

        assert_eq!(config.schema, Some(PathBuf::from("docs/schema.json")));
        assert_eq!(config.prdoc_folders.len(), 2);
        assert_eq!(config.host, "git.example.org");
    }

    #[test]
    fn partial_configs_keep_defaults_for_the_rest() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("prdoc.toml");
        fs::write(&path, "host = \"git.example.org\"\n").unwrap();

        let config = ForgeConfig::from_file(&path).unwrap();

        assert_eq!(config.host, "git.example.org");
        assert_eq!(config.prdoc_folders, vec![PathBuf::from("prdoc")]);
    }

    #[test]
    fn broken_toml_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("prdoc.toml");
        fs::write(&path, "host = [not toml").unwrap();

        let result = ForgeConfig::from_file(&path);
        assert!(matches!(result, Err(ConfigError::Toml { .. })));
    }

    #[test]
    fn explicit_path_wins_in_find_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.toml");
        fs::write(&path, "").unwrap();

        let found = ForgeConfig::find_file(Some(&path));
        assert_eq!(found, Some(path));
    }

    #[test]
    fn default_schema_is_the_embedded_one() {
        let config = ForgeConfig::default();
        let schema = config.schema().unwrap();
        assert_eq!(schema.source(), "<embedded>");
    }

    #[test]
    fn configured_schema_is_loaded_from_disk() {
        let temp = TempDir::new().unwrap();
        let schema_path = temp.path().join("schema.json");
        fs::write(&schema_path, "{\"type\": \"object\"}").unwrap();

        let config = ForgeConfig {
            schema: Some(schema_path),
            ..ForgeConfig::default()
        };

        let schema = config.schema().unwrap();
        assert_eq!(schema.document()["type"], "object");
    }
}
