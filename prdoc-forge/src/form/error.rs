//! Form derivation error types.

use thiserror::Error;

/// Errors that can occur while deriving a form from a schema.
#[derive(Debug, Error)]
pub enum FormError {
    /// Forms can only be derived from object schemas.
    #[error("Cannot derive a form: expected an object schema, found '{found}'")]
    RootNotObject { found: String },
}
