/*!
 * Configuration handling for RepoDump
 */

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;

use crate::error::{Result, ResultExt};

/// Default clone timeout in seconds
pub const DEFAULT_CLONE_TIMEOUT_SECS: u64 = 300;

/// Command-line arguments for RepoDump
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "repodump",
    version = env!("CARGO_PKG_VERSION"),
    about = "Extract repository or directory content into code + metadata outputs",
    long_about = "Walks a local directory or a shallow clone of a remote Git repository and writes a single code dump (directory tree plus the content of every text file) together with a JSON metadata file."
)]
pub struct Args {
    /// Remote repository URL (http:// or https://) or local directory
    pub input_path: String,

    /// Patterns to exclude (e.g. '*.md', 'test/*')
    #[clap(long, num_args = 1.., value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Patterns to include (default: all text files)
    #[clap(long, num_args = 1.., value_name = "GLOB")]
    pub select: Vec<String>,

    /// Read additional exclude patterns from a file, one per line
    #[clap(long, value_name = "FILE")]
    pub exclude_from: Option<PathBuf>,

    /// Read additional include patterns from a file, one per line
    #[clap(long, value_name = "FILE")]
    pub select_from: Option<PathBuf>,

    /// Branch to check out when cloning a repository
    #[clap(long)]
    pub branch: Option<String>,

    /// Enable verbose logging
    #[clap(long)]
    pub verbose: bool,

    /// Scan everything but do not write any output
    #[clap(long)]
    pub dry_run: bool,

    /// Ignore hidden files and directories (those starting with a dot)
    #[clap(long)]
    pub ignore_hidden: bool,

    /// Folder under which `<repo-name>/code.txt` and `metadata.json` are written
    #[clap(long, default_value = "output")]
    pub output_dir: PathBuf,

    /// Give up cloning after this many seconds
    #[clap(long, value_name = "SECS", default_value_t = DEFAULT_CLONE_TIMEOUT_SECS)]
    pub clone_timeout: u64,
}

/// Filtering options for a single scan
#[derive(Clone, Debug, Default)]
pub struct ScanConfig {
    /// Glob patterns whose matches are skipped (checked first)
    pub exclude_patterns: Vec<String>,

    /// Glob patterns to include (if empty, include all)
    pub include_patterns: Vec<String>,

    /// Skip every entry whose name starts with `.`
    pub ignore_hidden: bool,

    /// Log per-file decisions
    pub verbose: bool,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Remote URL or local directory as given on the command line
    pub input: String,

    /// Scan filtering options
    pub scan: ScanConfig,

    /// Branch to check out when cloning
    pub branch: Option<String>,

    /// Root folder for output
    pub output_root: PathBuf,

    /// Skip writing output
    pub dry_run: bool,

    /// Upper bound on the clone step
    pub clone_timeout: Duration,
}

impl Config {
    /// Create configuration from command-line arguments
    ///
    /// Pattern files given with `--exclude-from` / `--select-from` are read
    /// here and appended after the patterns given inline.
    pub fn from_args(args: Args) -> Result<Self> {
        crate::ensure!(
            args.clone_timeout > 0,
            InvalidInput,
            "--clone-timeout must be at least 1 second"
        );

        let mut exclude_patterns = args.exclude;
        if let Some(path) = &args.exclude_from {
            exclude_patterns.extend(read_pattern_file(path)?);
        }

        let mut include_patterns = args.select;
        if let Some(path) = &args.select_from {
            include_patterns.extend(read_pattern_file(path)?);
        }

        Ok(Self {
            input: args.input_path,
            scan: ScanConfig {
                exclude_patterns,
                include_patterns,
                ignore_hidden: args.ignore_hidden,
                verbose: args.verbose,
            },
            branch: args.branch,
            output_root: args.output_dir,
            dry_run: args.dry_run,
            clone_timeout: Duration::from_secs(args.clone_timeout),
        })
    }
}

/// Read one glob pattern per non-blank line
pub fn read_pattern_file(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read pattern file {}", path.display()))?;

    Ok(parse_patterns(&content))
}

fn parse_patterns(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RepoDumpError;
    use tempfile::tempdir;

    #[test]
    fn test_parse_patterns_skips_blank_lines() {
        let patterns = parse_patterns("*.md\n\n   \n  target/*  \r\n*.lock\n");
        assert_eq!(patterns, vec!["*.md", "target/*", "*.lock"]);
    }

    #[test]
    fn test_from_args_appends_pattern_files() {
        let dir = tempdir().unwrap();
        let excludes = dir.path().join("exclude.txt");
        fs::write(&excludes, "*.png\n\n*.jpg\n").unwrap();

        let args = Args::parse_from([
            "repodump",
            "--exclude",
            "*.md",
            "--exclude-from",
            excludes.to_str().unwrap(),
            "--ignore-hidden",
            "--dry-run",
            "some/dir",
        ]);
        let config = Config::from_args(args).unwrap();

        assert_eq!(config.input, "some/dir");
        assert_eq!(config.scan.exclude_patterns, vec!["*.md", "*.png", "*.jpg"]);
        assert!(config.scan.include_patterns.is_empty());
        assert!(config.scan.ignore_hidden);
        assert!(config.dry_run);
        assert_eq!(config.output_root, PathBuf::from("output"));
        assert_eq!(
            config.clone_timeout,
            Duration::from_secs(DEFAULT_CLONE_TIMEOUT_SECS)
        );
    }

    #[test]
    fn test_multiple_select_values() {
        let args = Args::parse_from([
            "repodump",
            "--select",
            "*.rs",
            "*.toml",
            "--branch",
            "dev",
            "--",
            "https://github.com/user/repo",
        ]);
        let config = Config::from_args(args).unwrap();

        assert_eq!(config.scan.include_patterns, vec!["*.rs", "*.toml"]);
        assert_eq!(config.branch.as_deref(), Some("dev"));
        assert_eq!(config.input, "https://github.com/user/repo");
    }

    #[test]
    fn test_zero_clone_timeout_is_rejected() {
        let args = Args::parse_from(["repodump", "--clone-timeout", "0", "."]);
        let err = Config::from_args(args).unwrap_err();
        assert!(matches!(err, RepoDumpError::InvalidInput(_)));
        assert!(err.to_string().contains("--clone-timeout"));
    }

    #[test]
    fn test_missing_pattern_file_is_invalid_input() {
        let args = Args::parse_from(["repodump", "--select-from", "/no/such/file", "."]);
        let err = Config::from_args(args).unwrap_err();
        assert!(matches!(err, RepoDumpError::InvalidInput(_)));
    }
}
