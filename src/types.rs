/*!
 * Core types and data structures for the RepoDump application
 */

use serde::Serialize;

use crate::error::Result;

/// A single text file accepted by the scanner
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    /// Path relative to the scan root, using `/` separators
    #[serde(rename = "path")]
    pub relative_path: String,
    /// Decoded file content (or a read-failure placeholder)
    pub content: String,
    /// Size in bytes as reported by the filesystem
    #[serde(rename = "size")]
    pub size_bytes: u64,
    /// Number of newline-delimited segments in `content`
    #[serde(rename = "lines")]
    pub line_count: usize,
}

impl FileRecord {
    /// Build a record, deriving the line count from the content
    pub fn new(relative_path: impl Into<String>, content: String, size_bytes: u64) -> Self {
        let line_count = count_lines(&content);
        Self {
            relative_path: relative_path.into(),
            content,
            size_bytes,
            line_count,
        }
    }
}

/// Count newline-delimited segments; a trailing segment without `\n` still counts
pub fn count_lines(content: &str) -> usize {
    content.lines().count()
}

/// Final output of one extraction run
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Rendered directory tree, including its header line
    pub directory_tree: String,
    /// Accepted files in scan order
    pub files: Vec<FileRecord>,
    /// Tree followed by one section per file
    pub dump_text: String,
}

#[derive(Serialize)]
struct MetadataDocument<'a> {
    files: &'a [FileRecord],
}

impl ExtractionResult {
    /// Serialize the per-file metadata document as pretty JSON
    pub fn metadata_json(&self) -> Result<String> {
        let doc = MetadataDocument { files: &self.files };
        Ok(serde_json::to_string_pretty(&doc)?)
    }

    /// Sum of line counts across all files
    pub fn total_lines(&self) -> usize {
        self.files.iter().map(|f| f.line_count).sum()
    }

    /// Sum of file sizes across all files
    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.size_bytes).sum()
    }
}
