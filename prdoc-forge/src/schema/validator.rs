//! Fail-slow validation of models.

use jsonschema::Validator;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// A single schema violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// JSON Pointer to the offending value. Empty for the document root.
    pub path: String,

    /// Human-readable message from the validation engine.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Every violation found in one model, in document order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Returns true if the model satisfied the schema.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of violations found.
    #[must_use]
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Iterates over the violations.
    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.violations.iter()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ValidationReport {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

/// A compiled schema, ready to validate models.
///
/// Validation never stops at the first problem: the whole model is walked and
/// every violation is reported, so a caller can surface all of them at once.
pub struct SchemaValidator {
    validator: Validator,
}

impl SchemaValidator {
    pub(crate) fn new(validator: Validator) -> Self {
        Self { validator }
    }

    /// Validates `model` and collects every violation.
    ///
    /// # Returns
    ///
    /// `Ok(())` when the model satisfies the schema, otherwise the full
    /// [`ValidationReport`]. Validation does not mutate the model; running it
    /// twice on the same model yields the same report.
    pub fn validate(&self, model: &Value) -> Result<(), ValidationReport> {
        let report = self.report(model);
        if report.is_empty() {
            Ok(())
        } else {
            Err(report)
        }
    }

    /// Validates `model`, always returning the (possibly empty) report.
    #[must_use]
    pub fn report(&self, model: &Value) -> ValidationReport {
        let violations = self
            .validator
            .iter_errors(model)
            .map(|error| Violation {
                path: error.instance_path.to_string(),
                message: error.to_string(),
            })
            .collect();
        ValidationReport { violations }
    }

    /// Returns true if `model` satisfies the schema.
    #[must_use]
    pub fn is_valid(&self, model: &Value) -> bool {
        self.validator.is_valid(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;
    use serde_json::json;

    fn compiled() -> SchemaValidator {
        Schema::embedded().unwrap().compile().unwrap()
    }

    #[test]
    fn valid_minimal_model() {
        let validator = compiled();
        let model = json!({ "title": "Fix bug" });

        assert!(validator.validate(&model).is_ok());
        assert!(validator.is_valid(&model));
    }

    #[test]
    fn collects_every_violation() {
        let validator = compiled();
        // Three independent problems: missing title, bad audience enum value
        // plus missing description, and a crate entry without a name.
        let model = json!({
            "doc": [{ "audience": "nobody" }],
            "crates": [{ "bump": "patch" }]
        });

        let report = validator.validate(&model).unwrap_err();
        assert!(report.len() >= 3, "expected at least 3 violations, got {report:?}");

        let paths: Vec<&str> = report.iter().map(|v| v.path.as_str()).collect();
        assert!(paths.contains(&""), "missing required title reported at root");
        assert!(paths.contains(&"/doc/0/audience"));
        assert!(paths.contains(&"/crates/0"));
    }

    #[test]
    fn rejects_unknown_top_level_properties() {
        let validator = compiled();
        let model = json!({ "title": "Fix bug", "unexpected": 1 });

        let report = validator.validate(&model).unwrap_err();
        assert_eq!(report.len(), 1);
    }

    #[test]
    fn report_is_stable_across_runs() {
        let validator = compiled();
        let model = json!({ "doc": [{ "audience": "nobody" }] });

        let first = validator.report(&model);
        let second = validator.report(&model);

        assert_eq!(first.violations, second.violations);
    }

    #[test]
    fn violation_display_includes_path() {
        let violation = Violation {
            path: "/doc/0/audience".to_string(),
            message: "not valid".to_string(),
        };
        assert_eq!(violation.to_string(), "/doc/0/audience: not valid");

        let root = Violation {
            path: String::new(),
            message: "not valid".to_string(),
        };
        assert_eq!(root.to_string(), "not valid");
    }
}
