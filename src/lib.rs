/*!
 * RepoDump - Extract a source tree into a single code dump plus JSON metadata
 *
 * This library walks a local directory (or a shallow clone of a remote
 * repository), filters files by glob patterns and a text heuristic, and
 * produces a concatenated dump prefixed by a rendered directory tree.
 */

pub mod aggregate;
pub mod classify;
pub mod config;
pub mod error;
pub mod git;
pub mod logging;
pub mod pattern;
pub mod pipeline;
pub mod report;
pub mod scanner;
pub mod source;
pub mod style;
pub mod tree;
pub mod types;
pub mod utils;
pub mod writer;

#[cfg(test)]
mod tests;

// Re-export main components for easier access
pub use aggregate::aggregate;
pub use classify::is_text;
pub use config::{Args, Config, ScanConfig};
pub use error::{RepoDumpError, Result};
pub use pattern::{PathFilter, PatternSet};
pub use pipeline::extract;
pub use report::{FileReportInfo, ReportFormat, Reporter, ScanReport};
pub use scanner::{Scanner, ScannerStatistics};
pub use source::{repo_name, Source};
pub use tree::render_tree;
pub use types::{ExtractionResult, FileRecord};
pub use writer::{OutputWriter, WrittenOutput};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
