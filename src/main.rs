/*!
 * Command-line interface for RepoDump
 */

use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use repodump::config::{Args, Config};
use repodump::git::GitProgress;
use repodump::report::{ReportFormat, Reporter, ScanReport};
use repodump::source::{repo_name, Source};
use repodump::style::{paint, Tone};
use repodump::writer::OutputWriter;
use repodump::{logging, pipeline, Result};

fn main() -> ExitCode {
    // Parse command line arguments
    let args = Args::parse();

    logging::init(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Printed directly so a silenced log filter cannot hide it
            eprintln!("{}", paint(&format!("Error: {}", e), Tone::Failure));
            debug!("Exiting after error: {:?}", e);
            ExitCode::from(1)
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config = Config::from_args(args)?;
    let output_dir = config.output_root.join(repo_name(&config.input)?);

    // Per-file debug logs and a live bar would interleave on stderr
    let progress = if config.scan.verbose {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos}/{len} Elapsed: {elapsed_precise}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar.enable_steady_tick(Duration::from_millis(100));
        bar
    };
    let progress = Arc::new(progress);
    progress.set_prefix("Setup");

    let start_time = Instant::now();

    let clone_progress = |p: &GitProgress| {
        progress.set_message(format!(
            "Cloning: {}% ({} objects, {})",
            p.percentage(),
            p.received_objects,
            p.formatted_bytes()
        ));
    };
    let source = match Source::acquire(&config, Some(&clone_progress)) {
        Ok(source) => source,
        Err(e) => {
            progress.finish_and_clear();
            return Err(e);
        }
    };

    progress.set_prefix("Scanning");
    let outcome = pipeline::extract(&source.root(), &config.scan, Arc::clone(&progress));
    progress.finish_and_clear();

    // The temporary clone is released whether or not the scan succeeded
    if let Err(e) = source.close() {
        warn!("Failed to remove temporary clone: {}", e);
    }
    let (result, statistics) = outcome?;

    let output = if config.dry_run {
        info!(
            "{}",
            paint("[DRY RUN] Files processed but no output written.", Tone::Warning)
        );
        None
    } else {
        let written = OutputWriter::new(&output_dir).write(&result)?;
        info!(
            "{}",
            paint(
                &format!(
                    "Content extracted:\n  {}\n  {}",
                    written.code.display(),
                    written.metadata.display()
                ),
                Tone::Success
            )
        );
        Some(output_dir.display().to_string())
    };

    let report = ScanReport::new(&result, &statistics, output, start_time.elapsed());
    Reporter::new(ReportFormat::ConsoleTable).print_report(&report);

    Ok(())
}
