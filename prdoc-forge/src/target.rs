//! The four parameters that address a pull request on a forge.
//!
//! Every submission needs an organization, a repository, a pull request
//! number and a branch. They typically arrive through CLI flags or as query
//! parameters of a shared link; either way, nothing else happens until all
//! four are present. The first absent one, checked in the order `org`,
//! `repo`, `pull`, `branch`, is reported as `Missing parameter: <name>`.

use crate::filename::PrNumber;
use serde::Serialize;
use thiserror::Error;
use url::Url;

/// Errors that can occur while resolving target parameters.
#[derive(Debug, Error)]
pub enum TargetError {
    /// A required parameter is absent or empty.
    #[error("Missing parameter: {name}")]
    Missing { name: &'static str },

    /// The pull request number is not a number.
    #[error("Invalid pull request number '{value}': {source}")]
    InvalidPull {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// The source URL could not be parsed at all.
    #[error("Failed to parse URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// A fully resolved submission target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetParams {
    /// Organization or user owning the repository.
    pub org: String,

    /// Repository name.
    pub repo: String,

    /// Pull request number.
    pub pull: PrNumber,

    /// Branch the new file is proposed against.
    pub branch: String,
}

impl TargetParams {
    /// Creates target parameters from already-validated parts.
    #[must_use]
    pub fn new(org: &str, repo: &str, pull: PrNumber, branch: &str) -> Self {
        Self {
            org: org.to_string(),
            repo: repo.to_string(),
            pull,
            branch: branch.to_string(),
        }
    }

    /// Resolves optional parameters into a complete target.
    ///
    /// # Errors
    ///
    /// Returns [`TargetError::Missing`] naming the first absent parameter.
    /// Empty strings count as absent.
    pub fn resolve(
        org: Option<String>,
        repo: Option<String>,
        pull: Option<PrNumber>,
        branch: Option<String>,
    ) -> Result<Self, TargetError> {
        let org = require(org, "org")?;
        let repo = require(repo, "repo")?;
        let pull = pull.ok_or(TargetError::Missing { name: "pull" })?;
        let branch = require(branch, "branch")?;

        Ok(Self {
            org,
            repo,
            pull,
            branch,
        })
    }

    /// Extracts a target from the query string of a shared link.
    ///
    /// When a parameter repeats, the first occurrence wins.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse, a parameter is missing, or
    /// the pull request number is not numeric.
    pub fn from_url(input: &str) -> Result<Self, TargetError> {
        let url = Url::parse(input).map_err(|e| TargetError::InvalidUrl {
            url: input.to_string(),
            source: e,
        })?;

        let mut org = None;
        let mut repo = None;
        let mut pull = None;
        let mut branch = None;

        for (key, value) in url.query_pairs() {
            let slot = match key.as_ref() {
                "org" => &mut org,
                "repo" => &mut repo,
                "pull" => &mut pull,
                "branch" => &mut branch,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }

        let org = require(org, "org")?;
        let repo = require(repo, "repo")?;
        let pull_raw = require(pull, "pull")?;
        let pull = pull_raw.parse().map_err(|e| TargetError::InvalidPull {
            value: pull_raw.clone(),
            source: e,
        })?;
        let branch = require(branch, "branch")?;

        Ok(Self {
            org,
            repo,
            pull,
            branch,
        })
    }
}

fn require(value: Option<String>, name: &'static str) -> Result<String, TargetError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(TargetError::Missing { name })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_complete_parameters() {
        let params = TargetParams::resolve(
            Some("acme".to_string()),
            Some("widgets".to_string()),
            Some(42),
            Some("feature-x".to_string()),
        )
        .unwrap();

        assert_eq!(params, TargetParams::new("acme", "widgets", 42, "feature-x"));
    }

    #[test]
    fn reports_first_missing_parameter() {
        let err = TargetParams::resolve(None, None, None, None).unwrap_err();
        assert_eq!(err.to_string(), "Missing parameter: org");

        let err = TargetParams::resolve(
            Some("acme".to_string()),
            Some("widgets".to_string()),
            Some(42),
            None,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Missing parameter: branch");
    }

    #[test]
    fn empty_strings_count_as_missing() {
        let err = TargetParams::resolve(
            Some(String::new()),
            Some("widgets".to_string()),
            Some(42),
            Some("main".to_string()),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Missing parameter: org");
    }

    #[test]
    fn extracts_parameters_from_url() {
        let params = TargetParams::from_url(
            "https://forms.example/prdoc?org=acme&repo=widgets&pull=42&branch=feature-x",
        )
        .unwrap();

        assert_eq!(params, TargetParams::new("acme", "widgets", 42, "feature-x"));
    }

    #[test]
    fn first_occurrence_wins_for_repeated_parameters() {
        let params = TargetParams::from_url(
            "https://forms.example/prdoc?org=acme&org=other&repo=widgets&pull=42&branch=main",
        )
        .unwrap();

        assert_eq!(params.org, "acme");
    }

    #[test]
    fn url_without_branch_reports_the_notice() {
        let err =
            TargetParams::from_url("https://forms.example/prdoc?org=acme&repo=widgets&pull=42")
                .unwrap_err();
        assert_eq!(err.to_string(), "Missing parameter: branch");
    }

    #[test]
    fn non_numeric_pull_is_rejected() {
        let err = TargetParams::from_url(
            "https://forms.example/prdoc?org=acme&repo=widgets&pull=abc&branch=main",
        )
        .unwrap_err();
        assert!(matches!(err, TargetError::InvalidPull { .. }));
    }

    #[test]
    fn decodes_percent_encoded_values() {
        let params = TargetParams::from_url(
            "https://forms.example/prdoc?org=acme&repo=widgets&pull=42&branch=feat%2Fnested",
        )
        .unwrap();

        assert_eq!(params.branch, "feat/nested");
    }

    #[test]
    fn garbage_url_is_rejected() {
        let err = TargetParams::from_url("not a url").unwrap_err();
        assert!(matches!(err, TargetError::InvalidUrl { .. }));
    }
}
