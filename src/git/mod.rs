/*!
 * Git repository handling functionality
 */

mod error;
mod progress;
mod repository;
mod url;

// Re-export public items
pub use error::{GitError, GitResult};
pub use progress::{GitProgress, ProgressReporter};
pub use repository::{CloneOptions, Repository};
pub use self::url::{is_remote_url, repo_name_from_url};

use std::path::Path;

use tracing::info;

/// Shallow-clone a remote repository into `dest`
///
/// Returns the commit id that was checked out.
pub fn clone_repository<P: ProgressReporter>(
    url: &str,
    dest: &Path,
    options: &CloneOptions,
    progress_fn: Option<&P>,
) -> GitResult<String> {
    match &options.branch {
        Some(branch) => info!("Cloning repository: {} (branch {})", url, branch),
        None => info!("Cloning repository: {}", url),
    }

    let repo = Repository::shallow_clone(url, dest, options, progress_fn)?;
    let head = repo.head_id()?;
    info!("Cloned {} at {} into {}", url, head, repo.path().display());

    Ok(head)
}
