/*!
 * Git repository operations
 */

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use git2::{FetchOptions, RemoteCallbacks, Repository as Git2Repository};
use tracing::warn;

use super::error::{GitError, GitResult};
use super::progress::{GitProgress, ProgressReporter};

/// Options for a shallow clone
#[derive(Debug, Clone)]
pub struct CloneOptions {
    /// Branch or tag to check out instead of the remote HEAD
    pub branch: Option<String>,
    /// History depth to fetch
    pub depth: i32,
    /// Upper bound on the whole clone, connect through checkout
    pub timeout: Duration,
}

impl Default for CloneOptions {
    fn default() -> Self {
        Self {
            branch: None,
            depth: 1,
            timeout: Duration::from_secs(crate::config::DEFAULT_CLONE_TIMEOUT_SECS),
        }
    }
}

/// Messages from the clone worker to the waiting caller
enum CloneEvent {
    Progress(GitProgress),
    Finished(Result<Git2Repository, git2::Error>),
}

/// A freshly cloned Git repository
pub struct Repository {
    /// Inner git2 repository instance
    inner: Git2Repository,
    /// Working tree location
    path: PathBuf,
}

impl Repository {
    /// Shallow-clone `url` into `dest`
    ///
    /// The clone runs on a worker thread while this thread relays progress and
    /// waits at most `options.timeout`. Past the deadline the worker's transfer
    /// callbacks abort, and a worker stuck elsewhere is left behind.
    pub fn shallow_clone<P: ProgressReporter>(
        url: &str,
        dest: &Path,
        options: &CloneOptions,
        progress: Option<&P>,
    ) -> GitResult<Self> {
        let deadline = Instant::now() + options.timeout;
        let expired = Arc::new(AtomicBool::new(false));
        let (tx, rx) = mpsc::channel();

        {
            let url = url.to_string();
            let dest = dest.to_path_buf();
            let options = options.clone();
            let expired = Arc::clone(&expired);
            thread::Builder::new()
                .name("repodump-clone".to_string())
                .spawn(move || {
                    let result = run_clone(&url, &dest, &options, deadline, &expired, &tx);
                    // The receiver is gone if the caller already gave up
                    let _ = tx.send(CloneEvent::Finished(result));
                })?;
        }

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match rx.recv_timeout(remaining) {
                Ok(CloneEvent::Progress(stats)) => {
                    if let Some(reporter) = progress {
                        reporter.report(&stats);
                    }
                }
                Ok(CloneEvent::Finished(Ok(repo))) => {
                    return Ok(Self {
                        inner: repo,
                        path: dest.to_path_buf(),
                    })
                }
                Ok(CloneEvent::Finished(Err(_))) if expired.load(Ordering::SeqCst) => {
                    return Err(GitError::Timeout(options.timeout))
                }
                Ok(CloneEvent::Finished(Err(e))) => return Err(GitError::CloneError(e)),
                Err(RecvTimeoutError::Timeout) => {
                    expired.store(true, Ordering::SeqCst);
                    warn!("Clone of {} still running after {:?}, giving up", url, options.timeout);
                    return Err(GitError::Timeout(options.timeout));
                }
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(GitError::CloneError(git2::Error::from_str(
                        "clone worker exited without a result",
                    )))
                }
            }
        }
    }

    /// Commit id checked out at HEAD
    pub fn head_id(&self) -> GitResult<String> {
        let commit = self.inner.head()?.peel_to_commit()?;
        Ok(commit.id().to_string())
    }

    /// Get path to the repository
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Body of the clone worker
///
/// Transfer callbacks forward progress and abort once `deadline` passes or
/// the caller has stopped waiting.
fn run_clone(
    url: &str,
    dest: &Path,
    options: &CloneOptions,
    deadline: Instant,
    expired: &AtomicBool,
    events: &Sender<CloneEvent>,
) -> Result<Git2Repository, git2::Error> {
    let within_deadline = || {
        if expired.load(Ordering::SeqCst) || Instant::now() > deadline {
            expired.store(true, Ordering::SeqCst);
            false
        } else {
            true
        }
    };

    let mut callbacks = RemoteCallbacks::new();
    callbacks.transfer_progress(|stats| {
        if !within_deadline() {
            return false;
        }
        let _ = events.send(CloneEvent::Progress(GitProgress::from(stats)));
        true
    });
    callbacks.sideband_progress(|_| within_deadline());

    let mut fetch_options = FetchOptions::new();
    fetch_options.remote_callbacks(callbacks);
    fetch_options.depth(options.depth);

    let mut builder = git2::build::RepoBuilder::new();
    builder.fetch_options(fetch_options);
    if let Some(branch) = &options.branch {
        builder.branch(branch);
    }

    builder.clone(url, dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;
    use tempfile::tempdir;

    #[test]
    fn test_default_options_are_shallow() {
        let options = CloneOptions::default();
        assert_eq!(options.depth, 1);
        assert!(options.branch.is_none());
        assert_eq!(options.timeout, Duration::from_secs(300));
    }

    #[test]
    fn test_clone_failure_is_reported() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let url = format!("file://{}", missing.display());

        let result = Repository::shallow_clone(
            &url,
            &dir.path().join("repo"),
            &CloneOptions::default(),
            None::<&fn(&GitProgress)>,
        );
        assert!(matches!(result, Err(GitError::CloneError(_))));
    }

    #[test]
    fn test_stalled_remote_times_out() {
        // Accepts connections but never answers
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let dir = tempdir().unwrap();

        let options = CloneOptions {
            timeout: Duration::from_secs(1),
            ..Default::default()
        };
        let started = Instant::now();
        let result = Repository::shallow_clone(
            &format!("http://127.0.0.1:{}/stalled.git", port),
            &dir.path().join("repo"),
            &options,
            None::<&fn(&GitProgress)>,
        );

        assert!(matches!(result, Err(GitError::Timeout(_))));
        assert!(started.elapsed() < Duration::from_secs(30));
        drop(listener);
    }
}
