#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod config;
pub mod docfile;
pub mod editor;
pub mod filename;
pub mod form;
pub mod github;
pub mod schema;
pub mod target;
pub mod template;
pub mod yaml;

pub use config::{ConfigError, ForgeConfig};
pub use docfile::{CheckOutcome, DocFile, DocFileError};
pub use editor::{Editor, EditorError, EditorState};
pub use filename::{DocFileName, FilenameError, PrNumber};
pub use form::{FieldDescriptor, FieldKind, FormDescriptor, FormError};
pub use github::{new_file_url, prdoc_path, ForgeUrlError, DEFAULT_HOST};
pub use schema::{
    apply_defaults, Schema, SchemaError, SchemaValidator, ValidationReport, Violation,
};
pub use target::{TargetError, TargetParams};
pub use template::{render_skeleton, TemplateError, PRDOC_DEFAULT_TEMPLATE};
pub use yaml::YamlError;
