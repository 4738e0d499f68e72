/*!
 * Git URL detection and handling
 */

use url::Url;

use super::error::{GitError, GitResult};

/// Check whether an input names a remote repository (`http://` or `https://`)
pub fn is_remote_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Derive a repository name from its URL
///
/// Uses the final path segment with one trailing `.git` stripped, falling back
/// to the host when the URL has no path.
pub fn repo_name_from_url(url: &str) -> GitResult<String> {
    let parsed = Url::parse(url).map_err(|e| GitError::InvalidUrl(format!("{}: {}", url, e)))?;

    let segment = parsed
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .map(str::to_string);

    let name = match segment {
        Some(segment) => segment,
        None => parsed
            .host_str()
            .map(str::to_string)
            .ok_or_else(|| GitError::InvalidUrl(format!("No repository name in URL: {}", url)))?,
    };

    let name = name.strip_suffix(".git").unwrap_or(&name).to_string();
    if name.is_empty() {
        return Err(GitError::InvalidUrl(format!(
            "No repository name in URL: {}",
            url
        )));
    }

    Ok(name)
}
