/*!
 * Scan-filter-aggregate pipeline over a single root directory
 */

use std::path::Path;
use std::sync::Arc;

use indicatif::ProgressBar;
use tracing::info;

use crate::aggregate::aggregate;
use crate::config::ScanConfig;
use crate::error::Result;
use crate::scanner::{Scanner, ScannerStatistics};
use crate::tree::render_tree;
use crate::types::ExtractionResult;

/// Scan `root`, render its tree and assemble the dump
pub fn extract(
    root: &Path,
    config: &ScanConfig,
    progress: Arc<ProgressBar>,
) -> Result<(ExtractionResult, ScannerStatistics)> {
    info!("Scanning directory: {}", root.display());

    let mut scanner = Scanner::new(root, config.clone(), progress)?;
    scanner.progress.set_length(scanner.count_candidates());

    let files = scanner.scan();
    let tree = render_tree(root);
    let result = aggregate(tree, files);

    Ok((result, scanner.statistics().clone()))
}
