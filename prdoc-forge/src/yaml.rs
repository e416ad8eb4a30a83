//! Canonical YAML emission and loading.
//!
//! Models travel through the crate as [`serde_json::Value`]; this module is
//! the only place where YAML text is produced or consumed. Emission is
//! deterministic: block style, two-space indentation, keys in stable
//! (alphabetical) order and a leading `---` document marker. Loading resolves
//! `<<` merge keys and normalizes mapping keys to strings, so the result is
//! always a plain JSON model.

use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while converting between YAML text and models.
#[derive(Debug, Error)]
pub enum YamlError {
    /// The text is not a single well-formed YAML document.
    #[error("Failed to parse YAML: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
    },

    /// The model could not be rendered as YAML.
    #[error("Failed to emit YAML: {source}")]
    Emit {
        #[source]
        source: serde_yaml::Error,
    },

    /// `<<` merge keys could not be resolved.
    #[error("Failed to resolve YAML merge keys: {source}")]
    Merge {
        #[source]
        source: serde_yaml::Error,
    },

    /// The document uses a YAML feature models cannot represent.
    #[error("Unsupported YAML value: {message}")]
    Unsupported { message: String },
}

/// Renders a model as a YAML document.
///
/// The output starts with a `---` marker and ends with a newline. Emitting
/// the same model always produces the same text.
///
/// # Errors
///
/// Returns [`YamlError::Emit`] if the model cannot be serialized, which does
/// not happen for values produced by this crate.
pub fn emit(model: &Value) -> Result<String, YamlError> {
    let body = serde_yaml::to_string(model).map_err(|e| YamlError::Emit { source: e })?;
    Ok(format!("---\n{body}"))
}

/// Parses a single YAML document into a model.
///
/// `<<` merge keys are resolved before conversion, and mapping keys that are
/// not strings are rendered to their canonical string form.
///
/// # Errors
///
/// Returns an error when the text is not one well-formed YAML document, when
/// merge keys cannot be resolved, or when the document uses tagged values.
pub fn parse(text: &str) -> Result<Value, YamlError> {
    let mut document: serde_yaml::Value =
        serde_yaml::from_str(text).map_err(|e| YamlError::Parse { source: e })?;

    document
        .apply_merge()
        .map_err(|e| YamlError::Merge { source: e })?;

    yaml_to_json(&document)
}

/// Converts a YAML value into a JSON model deterministically.
fn yaml_to_json(value: &serde_yaml::Value) -> Result<Value, YamlError> {
    match value {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(i.into()))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(u.into()))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| YamlError::Unsupported {
                        message: format!("non-finite number '{f}'"),
                    })
            } else {
                Err(YamlError::Unsupported {
                    message: "unrepresentable number".to_string(),
                })
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(yaml_to_json(item)?);
            }
            Ok(Value::Array(out))
        }
        serde_yaml::Value::Mapping(mapping) => {
            let mut out = serde_json::Map::new();
            for (key, entry) in mapping {
                let key = match key {
                    serde_yaml::Value::String(s) => s.clone(),
                    // Scalar keys such as `1` or `true` get their canonical
                    // YAML rendering as the string key.
                    other => serde_yaml::to_string(other)
                        .map_err(|e| YamlError::Emit { source: e })?
                        .trim()
                        .to_string(),
                };
                out.insert(key, yaml_to_json(entry)?);
            }
            Ok(Value::Object(out))
        }
        serde_yaml::Value::Tagged(tagged) => Err(YamlError::Unsupported {
            message: format!("tagged value '{}'", tagged.tag),
        }),
    }
}
