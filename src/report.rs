/*!
 * Reporting functionality for RepoDump
 *
 * Provides functionality for generating formatted reports of scan results
 * using the tabled library for clean, consistent table rendering.
 */

use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::scanner::ScannerStatistics;
use crate::types::ExtractionResult;
use crate::utils::{format_file_size, format_number};

/// Above this many files only the largest are listed
const FULL_LISTING_LIMIT: usize = 15;

/// Number of files listed when the listing is truncated
const TOP_FILES: usize = 10;

/// Information about a file in the report
#[derive(Debug, Clone, Default)]
pub struct FileReportInfo {
    /// Number of lines in the file
    pub lines: usize,
    /// Size of the file in bytes
    pub bytes: u64,
}

/// Statistics for a finished extraction
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Output folder, or `None` on a dry run
    pub output: Option<String>,
    /// Time taken end to end
    pub duration: Duration,
    /// Number of files in the dump
    pub files_processed: usize,
    /// Total number of lines
    pub total_lines: usize,
    /// Total size in bytes
    pub total_bytes: u64,
    /// Skip counters from the scanner
    pub statistics: ScannerStatistics,
    /// Details for each file, in dump order
    pub file_details: Vec<(String, FileReportInfo)>,
}

impl ScanReport {
    /// Build a report from the pipeline output
    pub fn new(
        result: &ExtractionResult,
        statistics: &ScannerStatistics,
        output: Option<String>,
        duration: Duration,
    ) -> Self {
        let file_details = result
            .files
            .iter()
            .map(|f| {
                (
                    f.relative_path.clone(),
                    FileReportInfo {
                        lines: f.line_count,
                        bytes: f.size_bytes,
                    },
                )
            })
            .collect();

        Self {
            output,
            duration,
            files_processed: result.files.len(),
            total_lines: result.total_lines(),
            total_bytes: result.total_bytes(),
            statistics: statistics.clone(),
            file_details,
        }
    }
}

/// Format of the report output
pub enum ReportFormat {
    /// Console table output
    ConsoleTable,
}

/// Report generator for scan results
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Generate a report string based on scan statistics
    pub fn generate_report(&self, report: &ScanReport) -> String {
        match self.format {
            ReportFormat::ConsoleTable => self.generate_console_report(report),
        }
    }

    /// Print the report to stdout
    pub fn print_report(&self, report: &ScanReport) {
        println!("\n{}", self.generate_report(report));
    }

    // Keep the trailing path segments that fit in `max_len`
    fn format_path(&self, path: &str, max_len: usize) -> String {
        if path.chars().count() <= max_len {
            return path.to_string();
        }

        let mut kept = Vec::new();
        let mut current_len = 3; // "..."
        for part in path.rsplit('/') {
            let part_len = part.chars().count() + 1;
            if current_len + part_len > max_len {
                break;
            }
            kept.push(part);
            current_len += part_len;
        }

        if kept.is_empty() {
            let tail: String = path
                .chars()
                .skip(path.chars().count() - (max_len - 3))
                .collect();
            return format!("...{}", tail);
        }

        let mut result = String::from("...");
        for part in kept.iter().rev() {
            result.push('/');
            result.push_str(part);
        }
        result
    }

    fn create_summary_table(&self, report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        let stats = &report.statistics;
        let mut rows = vec![
            SummaryRow {
                key: "Output".to_string(),
                value: report
                    .output
                    .clone()
                    .unwrap_or_else(|| "(dry run, nothing written)".to_string()),
            },
            SummaryRow {
                key: "Process Time".to_string(),
                value: format!("{:.4?}", report.duration),
            },
            SummaryRow {
                key: "Files Processed".to_string(),
                value: format_number(report.files_processed),
            },
            SummaryRow {
                key: "Total Lines".to_string(),
                value: format_number(report.total_lines),
            },
            SummaryRow {
                key: "Total Size".to_string(),
                value: format_file_size(report.total_bytes),
            },
            SummaryRow {
                key: "Skipped".to_string(),
                value: format!(
                    "{} excluded, {} not selected, {} binary",
                    stats.files_excluded, stats.files_not_selected, stats.files_binary
                ),
            },
        ];

        if stats.read_failures > 0 || stats.unreadable_entries > 0 {
            rows.push(SummaryRow {
                key: "Errors".to_string(),
                value: format!(
                    "{} unreadable files, {} unreadable entries",
                    stats.read_failures, stats.unreadable_entries
                ),
            });
        }

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn create_files_table(&self, report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct FileRow {
            #[tabled(rename = "File Path")]
            path: String,

            #[tabled(rename = "Lines")]
            lines: String,

            #[tabled(rename = "Size")]
            size: String,
        }

        let mut files: Vec<_> = report.file_details.iter().collect();
        if files.len() > FULL_LISTING_LIMIT {
            files.sort_by(|(_, a), (_, b)| b.bytes.cmp(&a.bytes));
            files.truncate(TOP_FILES);
        }

        let rows: Vec<FileRow> = files
            .iter()
            .map(|(path, info)| FileRow {
                path: self.format_path(path, 60),
                lines: format_number(info.lines),
                size: format_file_size(info.bytes),
            })
            .collect();

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn generate_console_report(&self, report: &ScanReport) -> String {
        let summary_table = self.create_summary_table(report);
        let files_table = self.create_files_table(report);

        let summary_title = "EXTRACTION COMPLETE";
        let files_title = if report.file_details.len() > FULL_LISTING_LIMIT {
            "TOP 10 LARGEST FILES BY SIZE"
        } else {
            "PROCESSED FILES"
        };

        format!(
            "{}\n{}\n\n{}\n{}",
            files_title, files_table, summary_title, summary_table
        )
    }
}
