/*!
 * Directory and file scanning functionality
 */

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indicatif::ProgressBar;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::classify::is_text;
use crate::config::ScanConfig;
use crate::error::Result;
use crate::pattern::PathFilter;
use crate::types::FileRecord;

/// Scanner statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannerStatistics {
    /// Number of files turned into records
    pub files_accepted: usize,
    /// Files skipped because they matched an exclude pattern
    pub files_excluded: usize,
    /// Files skipped because no include pattern matched
    pub files_not_selected: usize,
    /// Files skipped because they look binary
    pub files_binary: usize,
    /// Accepted files whose content could not be read
    pub read_failures: usize,
    /// Directories (or entries) the walker could not read
    pub unreadable_entries: usize,
}

/// Outcome of the pattern checks for one walked entry
enum Decision {
    /// Not a regular file (directory, dangling or directory symlink, ...)
    NotAFile,
    Excluded,
    NotSelected,
    /// Passed both pattern checks; carries the relative path
    Candidate(String),
}

/// Scanner for directory contents
pub struct Scanner {
    /// Scan root; relative paths are computed against it
    root: PathBuf,
    /// Scanner configuration
    config: ScanConfig,
    /// Compiled include/exclude patterns
    filter: PathFilter,
    /// Progress bar
    pub progress: Arc<ProgressBar>,
    /// Scanner statistics
    statistics: ScannerStatistics,
}

impl Scanner {
    /// Create a new scanner, compiling the configured patterns once
    pub fn new(root: impl Into<PathBuf>, config: ScanConfig, progress: Arc<ProgressBar>) -> Result<Self> {
        let filter = PathFilter::new(&config)?;

        Ok(Self {
            root: root.into(),
            config,
            filter,
            progress,
            statistics: ScannerStatistics::default(),
        })
    }

    /// Get scanner statistics from the last scan
    pub fn statistics(&self) -> &ScannerStatistics {
        &self.statistics
    }

    /// Count files that pass pruning and both pattern checks, for progress tracking
    pub fn count_candidates(&self) -> u64 {
        let filter = self.filter.quiet();

        self.walker()
            .filter_map(|entry| entry.ok())
            .filter(|entry| matches!(self.decide(entry, &filter), Decision::Candidate(_)))
            .count() as u64
    }

    /// Walk the scan root and return one record per accepted text file
    ///
    /// Files are produced depth-first, sorted by name within each directory.
    pub fn scan(&mut self) -> Vec<FileRecord> {
        let mut stats = ScannerStatistics::default();
        let mut candidates = Vec::new();

        for entry in self.walker() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    stats.unreadable_entries += 1;
                    continue;
                }
            };

            let rel_path = match self.decide(&entry, &self.filter) {
                Decision::NotAFile => continue,
                Decision::Excluded => {
                    stats.files_excluded += 1;
                    continue;
                }
                Decision::NotSelected => {
                    stats.files_not_selected += 1;
                    continue;
                }
                Decision::Candidate(rel_path) => rel_path,
            };

            self.progress.inc(1);
            self.progress
                .set_message(format!("Current file: {}", display_name(&rel_path)));

            if !is_text(entry.path()) {
                if self.config.verbose {
                    debug!("Skipped binary file: {}", rel_path);
                }
                stats.files_binary += 1;
                continue;
            }

            candidates.push((entry.into_path(), rel_path));
        }

        let records = self.read_records(candidates, &mut stats);
        self.statistics = stats;
        records
    }

    /// Read each classified text file in order
    ///
    /// A file that cannot be read still yields a record, carrying an error
    /// placeholder as its content, and the remaining files are read as usual.
    fn read_records(
        &self,
        candidates: Vec<(PathBuf, String)>,
        stats: &mut ScannerStatistics,
    ) -> Vec<FileRecord> {
        let mut records = Vec::with_capacity(candidates.len());

        for (path, rel_path) in candidates {
            let record = match read_record(&path, rel_path.clone()) {
                Ok(record) => record,
                Err(e) => {
                    warn!("Failed to read {}: {}", path.display(), e);
                    stats.read_failures += 1;
                    unreadable_record(&path, rel_path, &e)
                }
            };

            if self.config.verbose {
                debug!(
                    "Processed file: {} ({} lines, {} bytes)",
                    record.relative_path, record.line_count, record.size_bytes
                );
            }

            stats.files_accepted += 1;
            records.push(record);
        }

        records
    }

    /// Depth-first walker with built-in pruning applied
    fn walker(&self) -> impl Iterator<Item = walkdir::Result<DirEntry>> + '_ {
        WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| !self.is_pruned(entry))
    }

    /// Pruning rules applied before descent: `.git`, hidden entries, excluded directories
    fn is_pruned(&self, entry: &DirEntry) -> bool {
        let name = entry.file_name().to_string_lossy();

        if name == ".git" {
            return true;
        }

        if self.config.ignore_hidden && name.starts_with('.') {
            if self.config.verbose {
                debug!("Skipped hidden entry: {}", entry.path().display());
            }
            return true;
        }

        entry.file_type().is_dir() && self.filter.should_exclude(&self.relative_path(entry.path()))
    }

    /// Apply the pattern checks to a non-pruned entry
    fn decide(&self, entry: &DirEntry, filter: &PathFilter) -> Decision {
        if !is_regular_file(entry) {
            return Decision::NotAFile;
        }

        let rel_path = self.relative_path(entry.path());
        if filter.should_exclude(&rel_path) {
            Decision::Excluded
        } else if !filter.should_include(&rel_path) {
            Decision::NotSelected
        } else {
            Decision::Candidate(rel_path)
        }
    }

    /// Path relative to the scan root, joined with `/`
    fn relative_path(&self, path: &Path) -> String {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        rel.components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Read a file's bytes, replacing invalid UTF-8
fn read_record(path: &Path, rel_path: String) -> io::Result<FileRecord> {
    let bytes = fs::read(path)?;
    let size = fs::metadata(path)
        .map(|m| m.len())
        .unwrap_or(bytes.len() as u64);
    Ok(FileRecord::new(
        rel_path,
        String::from_utf8_lossy(&bytes).into_owned(),
        size,
    ))
}

/// Record standing in for a file whose content could not be read
fn unreadable_record(path: &Path, rel_path: String, err: &io::Error) -> FileRecord {
    let size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    FileRecord::new(
        rel_path,
        format!("Error reading file {}: {}", path.display(), err),
        size,
    )
}

/// Regular files, plus symlinks that resolve to a regular file
fn is_regular_file(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    if file_type.is_file() {
        return true;
    }
    file_type.is_symlink() && entry.path().is_file()
}

/// Shorten long names for the progress message
fn display_name(rel_path: &str) -> String {
    let char_count = rel_path.chars().count();
    if char_count > 40 {
        let tail: String = rel_path.chars().skip(char_count - 37).collect();
        format!("...{}", tail)
    } else {
        rel_path.to_string()
    }
}
