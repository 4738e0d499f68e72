/*!
 * Directory tree rendering
 */

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;

use tracing::warn;

/// Header line that starts every rendered tree
pub const TREE_HEADER: &str = "Directory structure:";

/// Marker emitted in place of a directory that could not be listed
pub const PERMISSION_DENIED: &str = "[Permission Denied]";

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE_INDENT: &str = "│   ";
const SPACE_INDENT: &str = "    ";

/// Render the directory structure under `root` as box-drawing text.
///
/// Entries are sorted by name within each level and `.git` is never listed.
/// Symbolic links to directories are listed but not descended into.
pub fn render_tree(root: &Path) -> String {
    let mut lines = Vec::new();
    render_level(root, "", &mut lines);
    format!("{}\n{}", TREE_HEADER, lines.join("\n"))
}

fn render_level(dir: &Path, prefix: &str, lines: &mut Vec<String>) {
    let entries = match list_entries(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            lines.push(format!("{}{}", prefix, PERMISSION_DENIED));
            return;
        }
        Err(e) => {
            warn!("Failed to list {}: {}", dir.display(), e);
            return;
        }
    };

    let count = entries.len();
    for (i, (name, is_dir)) in entries.into_iter().enumerate() {
        let is_last = i + 1 == count;
        let connector = if is_last { LAST_BRANCH } else { BRANCH };
        lines.push(format!("{}{}{}", prefix, connector, name.to_string_lossy()));

        if is_dir {
            let indent = if is_last { SPACE_INDENT } else { PIPE_INDENT };
            render_level(&dir.join(&name), &format!("{}{}", prefix, indent), lines);
        }
    }
}

/// Read a directory's entries as sorted `(name, is_real_directory)` pairs
fn list_entries(dir: &Path) -> io::Result<Vec<(OsString, bool)>> {
    let mut entries: Vec<(OsString, bool)> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| {
            let is_dir = entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false);
            (entry.file_name(), is_dir)
        })
        .filter(|(name, _)| name != ".git")
        .collect();

    entries.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(entries)
}
