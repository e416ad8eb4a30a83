//! Skeleton generation for new prdoc files.
//!
//! `generate` starts authors off with a pre-filled skeleton instead of an
//! empty file. The skeleton is a Handlebars template, embedded in the crate
//! and overridable through the configuration, rendered with the PR number.

use crate::filename::PrNumber;
use handlebars::{no_escape, Handlebars};
use serde_json::json;
use std::path::Path;
use thiserror::Error;

/// The skeleton template shipped with this crate.
pub const PRDOC_DEFAULT_TEMPLATE: &str = include_str!("assets/template.prdoc.hbs");

/// Errors that can occur while producing a skeleton.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Failed to read a template file.
    #[error("Failed to read template '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The template did not render.
    #[error("Failed to render template: {source}")]
    Render {
        #[source]
        source: handlebars::RenderError,
    },
}

/// Creates the Handlebars registry used for skeletons.
///
/// Strict mode is on so a template referencing an unknown variable fails
/// loudly, and HTML escaping is off because the output is YAML.
#[must_use]
pub fn create_registry() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();
    hbs.register_escape_fn(no_escape);
    hbs.set_strict_mode(true);
    hbs
}

/// Reads the skeleton template from `path`, or falls back to the embedded
/// one.
///
/// # Errors
///
/// Returns an error when a configured template file cannot be read.
pub fn load_template(path: Option<&Path>) -> Result<String, TemplateError> {
    match path {
        Some(path) => std::fs::read_to_string(path).map_err(|e| TemplateError::Io {
            path: path.display().to_string(),
            source: e,
        }),
        None => Ok(PRDOC_DEFAULT_TEMPLATE.to_string()),
    }
}

/// Renders the prdoc skeleton for a PR number.
///
/// # Errors
///
/// Returns an error when the template references variables beyond `number`
/// or is otherwise malformed.
pub fn render_skeleton(template: &str, number: PrNumber) -> Result<String, TemplateError> {
    let data = json!({ "number": number });

    create_registry()
        .render_template(template, &data)
        .map_err(|e| TemplateError::Render { source: e })
}
