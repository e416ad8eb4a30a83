//! Composing links into a GitHub-style forge.
//!
//! Submission hands the prepared file over to the forge's own "create new
//! file" page instead of talking to any API: the composed URL carries the
//! target path and the YAML content, pre-filled. Opening it is the caller's
//! business; nothing here performs network traffic.

use crate::filename::{DocFileName, PrNumber};
use crate::schema::PRDOC_DEFAULT_DIR;
use crate::target::TargetParams;
use thiserror::Error;
use url::Url;

/// Default forge host.
pub const DEFAULT_HOST: &str = "github.com";

/// Errors that can occur while composing a forge URL.
#[derive(Debug, Error)]
pub enum ForgeUrlError {
    /// The host does not form a valid https URL.
    #[error("Cannot build a URL for host '{host}': {message}")]
    Host { host: String, message: String },
}

/// The in-repository path of the prdoc file for a PR number,
/// e.g. `prdoc/pr_42.prdoc`.
#[must_use]
pub fn prdoc_path(pull: PrNumber) -> String {
    format!("{PRDOC_DEFAULT_DIR}/{}", DocFileName::from(pull))
}

/// Builds the pre-filled "create new file" URL:
/// `https://<host>/<org>/<repo>/new/<branch>?filename=prdoc/pr_<pull>.prdoc&value=<yaml>`.
///
/// Path segments are percent-encoded, so a branch name containing `/` stays
/// one segment. The query values are form-encoded; decoding them yields the
/// exact file path and YAML text that went in.
///
/// # Errors
///
/// Returns [`ForgeUrlError::Host`] when `host` cannot anchor an https URL.
pub fn new_file_url(
    host: &str,
    params: &TargetParams,
    yaml: &str,
) -> Result<Url, ForgeUrlError> {
    let mut url = Url::parse(&format!("https://{host}")).map_err(|e| ForgeUrlError::Host {
        host: host.to_string(),
        message: e.to_string(),
    })?;

    url.path_segments_mut()
        .map_err(|()| ForgeUrlError::Host {
            host: host.to_string(),
            message: "host cannot carry a path".to_string(),
        })?
        .push(&params.org)
        .push(&params.repo)
        .push("new")
        .push(&params.branch);

    url.query_pairs_mut()
        .append_pair("filename", &prdoc_path(params.pull))
        .append_pair("value", yaml);

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_params() -> TargetParams {
        TargetParams::new("acme", "widgets", 42, "feature-x")
    }

    #[test]
    fn prdoc_path_uses_the_conventional_directory() {
        assert_eq!(prdoc_path(42), "prdoc/pr_42.prdoc");
    }

    #[test]
    fn composes_the_new_file_url() {
        let url = new_file_url(DEFAULT_HOST, &sample_params(), "---\ntitle: Fix bug\n").unwrap();

        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("github.com"));
        assert_eq!(url.path(), "/acme/widgets/new/feature-x");

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0], ("filename".to_string(), "prdoc/pr_42.prdoc".to_string()));
        assert_eq!(pairs[1], ("value".to_string(), "---\ntitle: Fix bug\n".to_string()));
    }

    #[test]
    fn branch_with_slash_stays_one_segment() {
        let params = TargetParams::new("acme", "widgets", 42, "feat/nested");
        let url = new_file_url(DEFAULT_HOST, &params, "---\n").unwrap();

        assert!(url.path().ends_with("/new/feat%2Fnested"));
        // Decoding the segment restores the original branch name.
        let last = url.path_segments().unwrap().next_back().unwrap();
        assert_eq!(last, "feat%2Fnested");
    }

    #[test]
    fn user_input_never_leaks_raw_whitespace() {
        let params = TargetParams::new("acme", "widgets", 42, "feat branch");
        let url = new_file_url(DEFAULT_HOST, &params, "---\ntitle: Fix bug\n").unwrap();

        let text = url.as_str();
        assert!(!text.contains(' '));
        assert!(!text.contains('\n'));
    }

    #[test]
    fn custom_hosts_are_honored() {
        let url = new_file_url("git.example.org", &sample_params(), "---\n").unwrap();
        assert_eq!(url.host_str(), Some("git.example.org"));
    }

    #[test]
    fn nonsense_hosts_are_rejected() {
        let result = new_file_url("not a host", &sample_params(), "---\n");
        assert!(matches!(result, Err(ForgeUrlError::Host { .. })));
    }
}
