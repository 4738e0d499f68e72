/*!
 * Resolution of the scan root from a URL or local path
 */

use std::fs;
use std::path::{Component, Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{RepoDumpError, Result};
use crate::git::{self, CloneOptions, ProgressReporter};

/// A directory ready to be scanned
#[derive(Debug)]
pub enum Source {
    /// Existing local directory, used in place
    Local(PathBuf),
    /// Shallow clone living in a temporary directory
    Remote {
        /// URL the clone was made from
        url: String,
        /// Commit checked out
        head: String,
        /// Temporary directory holding the clone; removed on drop
        checkout: TempDir,
    },
}

impl Source {
    /// Resolve the configured input into a scan root
    ///
    /// Remote URLs are cloned (depth 1) into a fresh temporary directory;
    /// local paths must name an existing directory.
    pub fn acquire<P: ProgressReporter>(config: &Config, progress: Option<&P>) -> Result<Self> {
        if git::is_remote_url(&config.input) {
            info!("Detected remote repository: {}", config.input);

            let checkout = tempfile::Builder::new().prefix("repodump-").tempdir()?;
            let options = CloneOptions {
                branch: config.branch.clone(),
                depth: 1,
                timeout: config.clone_timeout,
            };
            let head = git::clone_repository(
                &config.input,
                &checkout.path().join(CLONE_DIR),
                &options,
                progress,
            )?;

            return Ok(Self::Remote {
                url: config.input.clone(),
                head,
                checkout,
            });
        }

        let path = PathBuf::from(&config.input);
        if !path.is_dir() {
            crate::bail!(
                InvalidInput,
                "Provided path '{}' is not a valid directory.",
                config.input
            );
        }

        Ok(Self::Local(path))
    }

    /// Root directory to scan
    pub fn root(&self) -> PathBuf {
        match self {
            Self::Local(path) => path.clone(),
            Self::Remote { checkout, .. } => checkout.path().join(CLONE_DIR),
        }
    }

    /// Release the source, deleting a temporary clone
    ///
    /// Dropping a remote source also deletes the clone; this variant reports
    /// deletion failures instead of ignoring them.
    pub fn close(self) -> Result<()> {
        if let Self::Remote { url, head, checkout } = self {
            let location = checkout.path().display().to_string();
            checkout.close()?;
            debug!("Removed clone of {} ({}) at {}", url, head, location);
        }
        Ok(())
    }
}

/// Subdirectory of the temporary directory that receives the clone
const CLONE_DIR: &str = "repo";

/// Derive the output folder name for an input
///
/// URLs use their last path segment without `.git`; local paths use their
/// final component, resolving `.`/`..` through the filesystem first.
pub fn repo_name(input: &str) -> Result<String> {
    if git::is_remote_url(input) {
        return Ok(git::repo_name_from_url(input)?);
    }

    let path = Path::new(input);
    if let Some(Component::Normal(name)) = path.components().last() {
        return Ok(name.to_string_lossy().to_string());
    }

    let resolved = fs::canonicalize(path).map_err(|e| {
        RepoDumpError::InvalidInput(format!("Cannot resolve path '{}': {}", input, e))
    })?;

    Ok(resolved
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "root".to_string()))
}
