//! Form field descriptors.

use serde::Serialize;
use serde_json::Value;

/// The control a schema node maps onto.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    /// Free-form text input.
    Text,

    /// Numeric input.
    Number,

    /// Boolean checkbox.
    Checkbox,

    /// One choice out of a fixed set.
    Select {
        /// The schema's `enum` values, in declaration order.
        options: Vec<Value>,
    },

    /// A nested group of named fields.
    Group {
        /// Fields of the nested object.
        fields: Vec<FieldDescriptor>,
    },

    /// A growable list of same-shaped items.
    List {
        /// Descriptor every item of the list is rendered from.
        item: Box<FieldDescriptor>,
    },
}

/// One form control derived from a schema node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescriptor {
    /// Property name in the model.
    pub name: String,

    /// Display label. Falls back to the property name when the schema does
    /// not declare a `title`.
    pub label: String,

    /// Whether the parent schema lists this property as required.
    pub required: bool,

    /// The schema's `description`, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,

    /// The schema's `default`, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// Which control renders this field.
    #[serde(flatten)]
    pub kind: FieldKind,
}
