/*!
 * Tests for the RepoDump pipeline
 */

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use indicatif::ProgressBar;
use tempfile::tempdir;

use crate::config::ScanConfig;
use crate::pipeline::extract;
use crate::scanner::ScannerStatistics;
use crate::types::ExtractionResult;
use crate::writer::OutputWriter;

// Helper function to create a test directory structure
fn setup_test_directory() -> io::Result<tempfile::TempDir> {
    let temp_dir = tempdir()?;

    // Create a simple directory structure
    fs::create_dir(temp_dir.path().join("dir1"))?;
    fs::create_dir(temp_dir.path().join("dir2"))?;
    fs::create_dir(temp_dir.path().join("dir1").join("subdir"))?;

    // Create text files
    let mut file1 = File::create(temp_dir.path().join("file1.txt"))?;
    writeln!(file1, "This is a text file with content")?;

    let mut file2 = File::create(temp_dir.path().join("dir1").join("file2.txt"))?;
    writeln!(file2, "This is another text file\nwith multiple lines")?;

    let mut file3 = File::create(
        temp_dir
            .path()
            .join("dir1")
            .join("subdir")
            .join("file3.txt"),
    )?;
    writeln!(file3, "Nested file content")?;

    let mut readme = File::create(temp_dir.path().join("README.md"))?;
    write!(readme, "# Title\nno trailing newline")?;

    // Git metadata is never scanned
    fs::create_dir(temp_dir.path().join(".git"))?;
    let mut git_file = File::create(temp_dir.path().join(".git").join("config"))?;
    writeln!(git_file, "[core]\n\trepositoryformatversion = 0")?;

    // Hidden entries
    fs::write(temp_dir.path().join(".env"), "SECRET=1\n")?;
    fs::create_dir(temp_dir.path().join(".config"))?;
    fs::write(temp_dir.path().join(".config").join("settings.toml"), "a = 1\n")?;

    // Create a binary file
    let mut bin_file = File::create(temp_dir.path().join("binary.bin"))?;
    bin_file.write_all(&[0u8, 1u8, 2u8, 3u8])?;

    Ok(temp_dir)
}

fn run(root: &Path, config: ScanConfig) -> io::Result<(ExtractionResult, ScannerStatistics)> {
    Ok(extract(root, &config, Arc::new(ProgressBar::hidden()))?)
}

fn paths(result: &ExtractionResult) -> Vec<&str> {
    result
        .files
        .iter()
        .map(|f| f.relative_path.as_str())
        .collect()
}

fn patterns(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

// Test basic extraction functionality
#[test]
fn test_basic_extraction() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let (result, stats) = run(temp_dir.path(), ScanConfig::default())?;

    assert_eq!(
        paths(&result),
        vec![
            ".config/settings.toml",
            ".env",
            "README.md",
            "dir1/file2.txt",
            "dir1/subdir/file3.txt",
            "file1.txt",
        ]
    );
    assert_eq!(stats.files_binary, 1);

    // Tree lists everything except .git, binaries included
    assert!(result.directory_tree.starts_with("Directory structure:\n"));
    assert!(result.directory_tree.contains("binary.bin"));
    assert!(result.directory_tree.contains("└── subdir"));
    assert!(!result.directory_tree.contains(".git\n"));
    assert!(!result.dump_text.contains("repositoryformatversion"));

    let readme = &result.files[2];
    assert_eq!(readme.line_count, 2);
    assert_eq!(readme.size_bytes, 27);
    assert!(result
        .dump_text
        .contains("File: README.md (2 lines, 27 bytes)"));

    Ok(())
}

// Exclusion wins over inclusion
#[test]
fn test_exclude_precedence() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let config = ScanConfig {
        exclude_patterns: patterns(&["*.md"]),
        include_patterns: patterns(&["README.md", "*.txt"]),
        ..Default::default()
    };
    let (result, _) = run(temp_dir.path(), config)?;

    assert_eq!(
        paths(&result),
        vec!["dir1/file2.txt", "dir1/subdir/file3.txt", "file1.txt"]
    );
    assert!(!result.dump_text.contains("File: README.md"));

    Ok(())
}

// Excluding a directory prunes its whole subtree
#[test]
fn test_exclude_directory() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let config = ScanConfig {
        exclude_patterns: patterns(&["dir1"]),
        ..Default::default()
    };
    let (result, _) = run(temp_dir.path(), config)?;

    assert!(paths(&result).iter().all(|p| !p.starts_with("dir1/")));
    // The tree still shows the excluded directory
    assert!(result.directory_tree.contains("dir1"));

    Ok(())
}

#[test]
fn test_ignore_hidden() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let config = ScanConfig {
        ignore_hidden: true,
        ..Default::default()
    };
    let (result, _) = run(temp_dir.path(), config)?;

    for file in &result.files {
        assert!(
            file.relative_path
                .split('/')
                .all(|segment| !segment.starts_with('.')),
            "hidden path leaked: {}",
            file.relative_path
        );
    }
    assert_eq!(result.files.len(), 4);

    Ok(())
}

#[test]
fn test_binary_skipped_even_when_selected() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let config = ScanConfig {
        include_patterns: patterns(&["*.bin"]),
        ..Default::default()
    };
    let (result, stats) = run(temp_dir.path(), config)?;

    assert!(result.files.is_empty());
    assert_eq!(stats.files_binary, 1);

    Ok(())
}

#[test]
fn test_paths_unique_and_exist() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let (result, _) = run(temp_dir.path(), ScanConfig::default())?;

    let mut seen = HashSet::new();
    for file in &result.files {
        assert!(seen.insert(file.relative_path.clone()));
        assert!(temp_dir.path().join(&file.relative_path).is_file());
    }

    Ok(())
}

#[test]
fn test_dump_is_idempotent() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let (first, _) = run(temp_dir.path(), ScanConfig::default())?;
    let (second, _) = run(temp_dir.path(), ScanConfig::default())?;

    assert_eq!(first.dump_text, second.dump_text);

    Ok(())
}

// One dump section per file, in file order
#[test]
fn test_sections_follow_file_order() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let (result, _) = run(temp_dir.path(), ScanConfig::default())?;

    let headers: Vec<&str> = result
        .dump_text
        .lines()
        .filter(|line| line.starts_with("File: "))
        .collect();
    assert_eq!(headers.len(), result.files.len());

    for (header, file) in headers.iter().zip(&result.files) {
        assert_eq!(
            *header,
            format!(
                "File: {} ({} lines, {} bytes)",
                file.relative_path, file.line_count, file.size_bytes
            )
        );
    }

    Ok(())
}

#[test]
fn test_empty_file_has_zero_lines() -> io::Result<()> {
    let temp_dir = tempdir()?;
    File::create(temp_dir.path().join("empty.txt"))?;

    let (result, _) = run(temp_dir.path(), ScanConfig::default())?;
    assert_eq!(result.files.len(), 1);
    assert_eq!(result.files[0].line_count, 0);
    assert_eq!(result.files[0].size_bytes, 0);

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_permission_denied_branch() -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = tempdir()?;
    fs::write(temp_dir.path().join("visible.txt"), "hi\n")?;
    let locked = temp_dir.path().join("locked");
    fs::create_dir(&locked)?;
    fs::write(locked.join("secret.txt"), "secret\n")?;
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000))?;

    // Privileged users can still list the directory; nothing to check then
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))?;
        return Ok(());
    }

    let outcome = run(temp_dir.path(), ScanConfig::default());
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))?;
    let (result, stats) = outcome?;

    assert_eq!(paths(&result), vec!["visible.txt"]);
    assert_eq!(stats.unreadable_entries, 1);
    assert_eq!(
        result.directory_tree,
        "Directory structure:\n├── locked\n│   [Permission Denied]\n└── visible.txt"
    );
    assert_eq!(result.dump_text.matches("[Permission Denied]").count(), 1);

    Ok(())
}

#[test]
fn test_write_output_files() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let out_dir = tempdir()?;
    let (result, _) = run(temp_dir.path(), ScanConfig::default())?;

    let written = OutputWriter::new(out_dir.path().join("project")).write(&result)?;

    assert_eq!(fs::read_to_string(&written.code)?, result.dump_text);
    let metadata: serde_json::Value = serde_json::from_str(&fs::read_to_string(&written.metadata)?)?;
    let files = metadata["files"].as_array().expect("files array");
    assert_eq!(files.len(), result.files.len());
    assert_eq!(files[0]["path"], ".config/settings.toml");
    assert_eq!(files[0]["content"], "a = 1\n");

    Ok(())
}
