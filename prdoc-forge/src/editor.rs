//! The authoring state machine for one prdoc.
//!
//! An [`Editor`] starts as a draft. Every model update runs the same path:
//! defaults are applied, the model is validated fail-slow, and only when the
//! model satisfies the schema is the YAML text regenerated and the editor
//! marked valid. A failed update leaves the previous YAML text untouched and
//! drops the editor back to draft, so the YAML text never reflects an invalid
//! model. Submission is only possible while valid.

use crate::filename::PrNumber;
use crate::form::{FormDescriptor, FormError};
use crate::github::{self, ForgeUrlError, DEFAULT_HOST};
use crate::schema::{apply_defaults, Schema, SchemaError, SchemaValidator, ValidationReport};
use crate::target::TargetParams;
use crate::yaml::{self, YamlError};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Errors that can occur while authoring or submitting.
#[derive(Debug, Error)]
pub enum EditorError {
    /// Submit was called while the model still has violations.
    #[error("Cannot submit: the draft has {count} unresolved violation(s)")]
    NotValid { count: usize },

    /// The schema failed to load or compile.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The valid model could not be rendered as YAML.
    #[error(transparent)]
    Yaml(#[from] YamlError),

    /// The submission URL could not be composed.
    #[error(transparent)]
    Url(#[from] ForgeUrlError),
}

/// Where the editor currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    /// The model has not passed validation yet.
    Draft,

    /// The model satisfies the schema and the YAML text matches it.
    Valid,
}

/// Authoring session for a single prdoc.
pub struct Editor {
    schema: Schema,
    validator: SchemaValidator,
    host: String,
    model: Value,
    yaml_text: Option<String>,
    state: EditorState,
    report: ValidationReport,
}

impl Editor {
    /// Creates an editor for `schema`, starting with an empty draft.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema does not compile.
    pub fn new(schema: Schema) -> Result<Self, EditorError> {
        let validator = schema.compile()?;

        Ok(Self {
            schema,
            validator,
            host: DEFAULT_HOST.to_string(),
            model: Value::Object(serde_json::Map::new()),
            yaml_text: None,
            state: EditorState::Draft,
            report: ValidationReport::default(),
        })
    }

    /// Uses `host` instead of the default forge host for submission URLs.
    #[must_use]
    pub fn with_host(mut self, host: &str) -> Self {
        self.host = host.to_string();
        self
    }

    /// Derives the form the schema describes.
    ///
    /// # Errors
    ///
    /// Returns an error when the schema root is not an object schema.
    pub fn form(&self) -> Result<FormDescriptor, FormError> {
        FormDescriptor::from_schema(&self.schema)
    }

    /// Replaces the model, applying defaults and revalidating.
    ///
    /// On success the YAML text is regenerated and the editor becomes valid;
    /// on failure the YAML text is left as it was and the editor returns to
    /// draft. The returned report lists every violation of the new model.
    ///
    /// # Errors
    ///
    /// Returns an error only when a valid model cannot be rendered as YAML,
    /// which does not happen for models built from schema-conforming input.
    pub fn update(&mut self, model: Value) -> Result<ValidationReport, EditorError> {
        let mut model = model;
        apply_defaults(self.schema.document(), &mut model);

        let report = self.validator.report(&model);
        self.model = model;

        if report.is_empty() {
            // The one place the YAML text is allowed to change.
            self.yaml_text = Some(yaml::emit(&self.model)?);
            self.state = EditorState::Valid;
            debug!("Draft validated");
        } else {
            self.state = EditorState::Draft;
            debug!(violations = report.len(), "Draft has violations");
        }

        self.report = report.clone();
        Ok(report)
    }

    /// Composes the pre-filled "create new file" URL for the current draft.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NotValid`] while the editor is in draft, or a
    /// URL error when the host cannot anchor one. Nothing is sent anywhere;
    /// the handoff is the URL itself.
    pub fn submit(&self, params: &TargetParams) -> Result<Url, EditorError> {
        match (&self.state, &self.yaml_text) {
            (EditorState::Valid, Some(text)) => {
                let url = github::new_file_url(&self.host, params, text)?;
                debug!(pull = params.pull, "Composed submission URL");
                Ok(url)
            }
            _ => Err(EditorError::NotValid {
                count: self.report.len(),
            }),
        }
    }

    /// The current model, defaults included.
    #[must_use]
    pub fn model(&self) -> &Value {
        &self.model
    }

    /// The YAML text of the last valid model, if any update succeeded yet.
    #[must_use]
    pub fn yaml_text(&self) -> Option<&str> {
        self.yaml_text.as_deref()
    }

    /// Violations reported by the last update.
    #[must_use]
    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    /// Current state of the editor.
    #[must_use]
    pub fn state(&self) -> EditorState {
        self.state
    }

    /// The in-repository path submission will propose for `pull`.
    #[must_use]
    pub fn proposed_path(pull: PrNumber) -> String {
        github::prdoc_path(pull)
    }
}
