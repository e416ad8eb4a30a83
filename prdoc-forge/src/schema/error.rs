//! Schema error types.

use thiserror::Error;

/// Errors that can occur while loading or compiling a schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Failed to read a schema file.
    #[error("Failed to read schema '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The schema text is not valid JSON after comment stripping.
    #[error("Failed to parse schema '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The document parsed but is not a usable JSON Schema.
    #[error("Schema '{path}' is not a valid JSON Schema: {message}")]
    Compile { path: String, message: String },
}
