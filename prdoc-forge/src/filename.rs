//! Standardized prdoc file names.
//!
//! A prdoc file is named `pr_<number>.prdoc`, optionally with a short title
//! slug: `pr_<number>_<title>.prdoc`. Recognition is case-insensitive, and
//! lookups match on the parsed number, so `pr_0042.prdoc` is found when
//! searching for PR 42.

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;
use tracing::trace;

/// A pull request number.
pub type PrNumber = u64;

/// Errors that can occur while handling prdoc file names.
#[derive(Debug, Error)]
pub enum FilenameError {
    /// The file name does not follow the `pr_<number>[_<title>].prdoc` pattern.
    #[error("Invalid prdoc file name: {path}")]
    Invalid { path: String },

    /// No file for the number was found in the directory.
    #[error("No prdoc found for PR #{number} in '{dir}'")]
    NotFound { number: PrNumber, dir: String },

    /// The directory could not be read.
    #[error("Failed to read directory '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

fn filename_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^pr_(?<number>\d+)(?:_(?<title>.+))?\.prdoc$").expect("pattern is valid")
    })
}

/// The name of one prdoc file, decomposed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DocFileName {
    /// The PR number encoded in the name.
    pub number: PrNumber,

    /// The title slug encoded in the name, if any. This is unrelated to the
    /// `title` property inside the file.
    pub title: Option<String>,
}

impl DocFileName {
    /// Creates a file name from a PR number and an optional title slug.
    #[must_use]
    pub fn new(number: PrNumber, title: Option<&str>) -> Self {
        Self {
            number,
            title: title.map(String::from),
        }
    }

    /// Renders the file name, e.g. `pr_42.prdoc` or `pr_42_fix_bug.prdoc`.
    #[must_use]
    pub fn filename(&self) -> String {
        match &self.title {
            Some(title) => format!("pr_{}_{title}.prdoc", self.number),
            None => format!("pr_{}.prdoc", self.number),
        }
    }

    /// Returns true if the last path component looks like a prdoc file name.
    /// Only the name is inspected; the content is not touched.
    pub fn is_valid<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref()
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| filename_pattern().is_match(name))
    }

    /// Finds the file for a PR number directly inside `dir`.
    ///
    /// Matching is done on the parsed number, so zero-padded names such as
    /// `pr_0042.prdoc` are found when searching for PR 42.
    ///
    /// # Errors
    ///
    /// Returns [`FilenameError::NotFound`] when nothing matches, or an I/O
    /// error when the directory cannot be read.
    pub fn find(number: PrNumber, dir: &Path) -> Result<PathBuf, FilenameError> {
        let entries = std::fs::read_dir(dir).map_err(|e| FilenameError::Io {
            path: dir.display().to_string(),
            source: e,
        })?;

        for entry in entries.filter_map(Result::ok) {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let Ok(parsed) = Self::try_from(path.as_path()) else {
                continue;
            };

            trace!(path = %path.display(), number = parsed.number, "Candidate prdoc file");
            if parsed.number == number {
                return Ok(path);
            }
        }

        Err(FilenameError::NotFound {
            number,
            dir: dir.display().to_string(),
        })
    }
}

impl fmt::Display for DocFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.filename())
    }
}

impl From<PrNumber> for DocFileName {
    fn from(number: PrNumber) -> Self {
        Self::new(number, None)
    }
}

impl From<&DocFileName> for PathBuf {
    fn from(name: &DocFileName) -> Self {
        PathBuf::from(name.filename())
    }
}

impl TryFrom<&Path> for DocFileName {
    type Error = FilenameError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| FilenameError::Invalid {
                path: path.display().to_string(),
            })?;

        let captures = filename_pattern()
            .captures(name)
            .ok_or_else(|| FilenameError::Invalid {
                path: path.display().to_string(),
            })?;

        let number = captures["number"]
            .parse()
            .map_err(|_| FilenameError::Invalid {
                path: path.display().to_string(),
            })?;

        Ok(Self {
            number,
            title: captures.name("title").map(|m| m.as_str().to_string()),
        })
    }
}
