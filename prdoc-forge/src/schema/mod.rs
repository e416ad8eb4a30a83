//! The JSON Schema driving validation and form derivation.
//!
//! The schema is data, not code: it ships embedded in the crate for
//! convenience, can be swapped for a file on disk through the configuration,
//! and can be adjusted without touching the code that consumes it. Schema
//! files may carry `//` comment lines, which are stripped before parsing.

mod defaults;
mod error;
mod validator;

pub use defaults::apply_defaults;
pub use error::SchemaError;
pub use validator::{SchemaValidator, ValidationReport, Violation};

use regex::Regex;
use serde_json::Value;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

/// File extension of prdoc files.
pub const EXTENSION: &str = "prdoc";

/// Conventional directory where prdoc files are stored.
pub const PRDOC_DEFAULT_DIR: &str = "prdoc";

/// The schema shipped with this crate.
pub const PRDOC_DEFAULT_SCHEMA: &str = include_str!("../assets/prdoc_schema_user.json");

fn comment_line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?m)^//(.*)$").expect("pattern is valid"))
}

/// A parsed schema document.
#[derive(Debug, Clone)]
pub struct Schema {
    source: String,
    document: Value,
}

impl Schema {
    /// Parses the schema embedded in this crate.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded asset is not valid JSON, which only
    /// happens when the asset itself is broken.
    pub fn embedded() -> Result<Self, SchemaError> {
        Self::parse(PRDOC_DEFAULT_SCHEMA, "<embedded>")
    }

    /// Reads and parses a schema file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not contain valid
    /// JSON once comments are stripped.
    pub fn from_path(path: &Path) -> Result<Self, SchemaError> {
        debug!(path = %path.display(), "Loading schema file");

        let text = std::fs::read_to_string(path).map_err(|e| SchemaError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::parse(&text, &path.display().to_string())
    }

    /// Wraps an already-parsed schema document.
    #[must_use]
    pub fn from_value(document: Value) -> Self {
        Self {
            source: "<inline>".to_string(),
            document,
        }
    }

    /// Strips `//` comment lines so that annotated schema files deserialize
    /// as plain JSON. Only comments starting at the beginning of a line are
    /// recognized; `//` inside strings is left alone.
    #[must_use]
    pub fn strip_comments(text: &str) -> String {
        comment_line_pattern()
            .replace_all(text, "")
            .trim()
            .to_string()
    }

    fn parse(text: &str, source: &str) -> Result<Self, SchemaError> {
        let stripped = Self::strip_comments(text);
        let document = serde_json::from_str(&stripped).map_err(|e| SchemaError::Parse {
            path: source.to_string(),
            source: e,
        })?;

        Ok(Self {
            source: source.to_string(),
            document,
        })
    }

    /// The schema as a JSON document.
    #[must_use]
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Where the schema came from, for error messages.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Compiles the schema into a reusable validator.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Compile`] if the document is not a valid JSON
    /// Schema.
    pub fn compile(&self) -> Result<SchemaValidator, SchemaError> {
        let validator =
            jsonschema::validator_for(&self.document).map_err(|e| SchemaError::Compile {
                path: self.source.clone(),
                message: e.to_string(),
            })?;

        Ok(SchemaValidator::new(validator))
    }
}
