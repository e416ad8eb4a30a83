//! Deriving a form description from a schema.
//!
//! The mapping from schema node to control is a fixed table, checked in this
//! order: a node with an `enum` is a select regardless of its `type`; then
//! `object` maps to a group, `array` to a list, `boolean` to a checkbox,
//! `number` and `integer` to a numeric input, `string` to a text input.
//! Anything else falls back to a text input rather than failing, so a schema
//! with exotic nodes still yields an editable form.
//!
//! Fields appear in the order `serde_json` stores object keys, which is
//! alphabetical, so the derived form is stable for a given schema.

mod error;
mod field;

pub use error::FormError;
pub use field::{FieldDescriptor, FieldKind};

use crate::schema::Schema;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;

/// A complete form derived from an object schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormDescriptor {
    /// The schema's `title`, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Top-level fields, one per schema property.
    pub fields: Vec<FieldDescriptor>,
}

impl FormDescriptor {
    /// Derives the form for `schema`.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::RootNotObject`] when the schema root is not an
    /// object schema, since only objects have named properties to bind
    /// controls to.
    pub fn from_schema(schema: &Schema) -> Result<Self, FormError> {
        let root = schema.document();

        let root_type = root.get("type").and_then(Value::as_str);
        if root_type != Some("object") {
            return Err(FormError::RootNotObject {
                found: root_type.unwrap_or("unspecified").to_string(),
            });
        }

        Ok(Self {
            title: root
                .get("title")
                .and_then(Value::as_str)
                .map(String::from),
            fields: fields_of(root),
        })
    }
}

/// Builds descriptors for every property of an object schema node.
fn fields_of(node: &Value) -> Vec<FieldDescriptor> {
    let required: HashSet<&str> = node
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    node.get("properties")
        .and_then(Value::as_object)
        .map(|properties| {
            properties
                .iter()
                .map(|(name, subschema)| {
                    descriptor(name, subschema, required.contains(name.as_str()))
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Builds the descriptor of a single schema node.
fn descriptor(name: &str, node: &Value, required: bool) -> FieldDescriptor {
    FieldDescriptor {
        name: name.to_string(),
        label: node
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or(name)
            .to_string(),
        required,
        help: node
            .get("description")
            .and_then(Value::as_str)
            .map(String::from),
        default: node.get("default").cloned(),
        kind: kind_of(node),
    }
}

/// The fixed mapping table from schema node to control.
fn kind_of(node: &Value) -> FieldKind {
    if let Some(options) = node.get("enum").and_then(Value::as_array) {
        return FieldKind::Select {
            options: options.clone(),
        };
    }

    match node.get("type").and_then(Value::as_str) {
        Some("object") => FieldKind::Group {
            fields: fields_of(node),
        },
        Some("array") => FieldKind::List {
            item: Box::new(item_of(node)),
        },
        Some("boolean") => FieldKind::Checkbox,
        Some("number") | Some("integer") => FieldKind::Number,
        Some("string") => FieldKind::Text,
        _ => FieldKind::Text,
    }
}

/// Builds the item descriptor of an array schema node.
fn item_of(node: &Value) -> FieldDescriptor {
    match node.get("items") {
        Some(items) => descriptor("item", items, false),
        // An untyped list still renders, as a list of text inputs.
        None => FieldDescriptor {
            name: "item".to_string(),
            label: "item".to_string(),
            required: false,
            help: None,
            default: None,
            kind: FieldKind::Text,
        },
    }
}
