//! Reading and checking prdoc files on disk.
//!
//! Discovery is purely name-based: [`DocFile::find_in_dir`] lists `.prdoc`
//! files without opening them. Content only comes into play in
//! [`DocFile::load`] and [`DocFile::check`], which parse the YAML and run the
//! schema over it.

use crate::filename::DocFileName;
use crate::schema::{SchemaValidator, ValidationReport, EXTENSION};
use crate::yaml::{self, YamlError};
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur while loading prdoc files.
#[derive(Debug, Error)]
pub enum DocFileError {
    /// The file or directory could not be read.
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file is not well-formed YAML.
    #[error("Failed to parse '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: YamlError,
    },

    /// The file parsed but does not satisfy the schema.
    #[error("'{path}' does not satisfy the schema: {n} violation(s)", n = .report.len())]
    Rejected {
        path: String,
        report: ValidationReport,
    },
}

/// Outcome of checking one file.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckOutcome {
    /// Conventional name, well-formed content, schema satisfied.
    Ok { path: PathBuf },

    /// The content is fine but the name does not follow the
    /// `pr_<number>[_<title>].prdoc` convention.
    BadFilename { path: PathBuf },

    /// The file could not be parsed or does not satisfy the schema.
    Invalid { path: PathBuf, reasons: Vec<String> },
}

impl CheckOutcome {
    /// Returns true for a fully conforming file.
    #[must_use]
    pub fn passed(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }

    /// The file this outcome is about.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Ok { path } | Self::BadFilename { path } | Self::Invalid { path, .. } => path,
        }
    }
}

/// A prdoc file loaded from disk and accepted by the schema.
#[derive(Debug, Clone, Serialize)]
pub struct DocFile {
    /// Where the file lives.
    pub path: PathBuf,

    /// The decomposed file name, when it follows the convention.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<DocFileName>,

    /// The file content as a JSON model, merge keys resolved.
    pub content: Value,
}

impl DocFile {
    /// Loads a prdoc file and checks it against the schema.
    ///
    /// The file name does not matter here; unconventionally named files load
    /// fine and simply carry no decomposed [`DocFileName`].
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read, is not well-formed
    /// YAML, or does not satisfy the schema.
    pub fn load(path: &Path, validator: &SchemaValidator) -> Result<Self, DocFileError> {
        debug!(path = %path.display(), "Loading prdoc file");

        let text = std::fs::read_to_string(path).map_err(|e| DocFileError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        let content = yaml::parse(&text).map_err(|e| DocFileError::Parse {
            path: path.display().to_string(),
            source: e,
        })?;

        if let Err(report) = validator.validate(&content) {
            return Err(DocFileError::Rejected {
                path: path.display().to_string(),
                report,
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
            name: DocFileName::try_from(path).ok(),
            content,
        })
    }

    /// Checks one file, reporting the outcome instead of failing.
    #[must_use]
    pub fn check(path: &Path, validator: &SchemaValidator) -> CheckOutcome {
        let name_ok = DocFileName::is_valid(path);

        match Self::load(path, validator) {
            Ok(_) if name_ok => CheckOutcome::Ok {
                path: path.to_path_buf(),
            },
            Ok(_) => CheckOutcome::BadFilename {
                path: path.to_path_buf(),
            },
            Err(DocFileError::Rejected { report, .. }) => CheckOutcome::Invalid {
                path: path.to_path_buf(),
                reasons: report.iter().map(ToString::to_string).collect(),
            },
            Err(e) => CheckOutcome::Invalid {
                path: path.to_path_buf(),
                reasons: vec![e.to_string()],
            },
        }
    }

    /// Lists `.prdoc` files directly inside `dir`, in name order. Dot files
    /// are ignored. With `conventional_only`, names that do not follow the
    /// prdoc convention are dropped as well.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be read.
    pub fn find_in_dir(dir: &Path, conventional_only: bool) -> Result<Vec<PathBuf>, DocFileError> {
        let entries = std::fs::read_dir(dir).map_err(|e| DocFileError::Io {
            path: dir.display().to_string(),
            source: e,
        })?;

        let mut files: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter(|path| path.extension().is_some_and(|ext| ext == EXTENSION))
            .filter(|path| {
                !path
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .starts_with('.')
            })
            .filter(|path| !conventional_only || DocFileName::is_valid(path))
            .collect();

        files.sort();
        Ok(files)
    }

    /// Checks every `.prdoc` file directly inside `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be read; per-file problems
    /// land in the outcomes instead.
    pub fn check_dir(
        dir: &Path,
        validator: &SchemaValidator,
    ) -> Result<Vec<CheckOutcome>, DocFileError> {
        let files = Self::find_in_dir(dir, false)?;
        Ok(files
            .iter()
            .map(|path| Self::check(path, validator))
            .collect())
    }

    /// Loads every conventionally named `.prdoc` file directly inside `dir`.
    ///
    /// # Returns
    ///
    /// `true` and the loaded files when everything loaded, `false` alongside
    /// whatever did load when some files failed. Failures are logged, not
    /// fatal.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be read.
    pub fn load_dir(
        dir: &Path,
        validator: &SchemaValidator,
    ) -> Result<(bool, Vec<DocFile>), DocFileError> {
        let files = Self::find_in_dir(dir, true)?;

        let mut all_loaded = true;
        let mut loaded = Vec::with_capacity(files.len());

        for path in &files {
            match Self::load(path, validator) {
                Ok(doc) => loaded.push(doc),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to load prdoc file");
                    all_loaded = false;
                }
            }
        }

        Ok((all_loaded, loaded))
    }
}
