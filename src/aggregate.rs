/*!
 * Assembly of the final code dump
 */

use crate::types::{ExtractionResult, FileRecord};

/// Width of the `=` separator around each file header
pub const SEPARATOR_WIDTH: usize = 48;

/// Combine a rendered tree and scanned files into the final result.
///
/// The dump is the tree, a blank line, then one section per file in input
/// order: separator, `File: <path> (<n> lines, <n> bytes)` header, separator,
/// content. Sections are separated by a blank line.
pub fn aggregate(directory_tree: String, files: Vec<FileRecord>) -> ExtractionResult {
    let separator = format!("{}\n", "=".repeat(SEPARATOR_WIDTH));

    let sections: Vec<String> = files
        .iter()
        .map(|file| {
            format!(
                "{sep}File: {} ({} lines, {} bytes)\n{sep}{}\n",
                file.relative_path,
                file.line_count,
                file.size_bytes,
                file.content,
                sep = separator
            )
        })
        .collect();

    let dump_text = format!("{}\n\n{}", directory_tree, sections.join("\n"));

    ExtractionResult {
        directory_tree,
        files,
        dump_text,
    }
}
