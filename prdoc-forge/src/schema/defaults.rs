//! Default injection for models edited against a schema.
//!
//! Filling in declared `default` values is an explicit, pure step here rather
//! than a side effect of validation. Callers that want the classic
//! validate-with-defaults behavior run [`apply_defaults`] first and validate
//! the result.

use serde_json::Value;

/// Fills absent properties of `model` with the `default` values the schema
/// declares, recursing into nested objects and existing array items.
///
/// Values already present are never overwritten, which makes the function
/// idempotent: applying it twice yields the same model as applying it once.
/// Absent objects and array items are not invented; only fields of values the
/// model already carries (or that a `default` just produced) are filled.
pub fn apply_defaults(schema: &Value, model: &mut Value) {
    match model {
        Value::Object(fields) => {
            let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
                return;
            };

            for (name, subschema) in properties {
                if !fields.contains_key(name) {
                    if let Some(default) = subschema.get("default") {
                        fields.insert(name.clone(), default.clone());
                    }
                }

                // Recurse into whatever is there now, including a default
                // that was just inserted.
                if let Some(value) = fields.get_mut(name) {
                    apply_defaults(subschema, value);
                }
            }
        }
        Value::Array(items) => {
            let Some(item_schema) = schema.get("items") else {
                return;
            };

            for item in items {
                apply_defaults(item_schema, item);
            }
        }
        _ => {}
    }
}
