pub mod aggregator;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod ingest;
pub mod logging;
pub mod messages;
pub mod ui;
pub mod writer;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, OutputConfig, ReportConfig, RunConfiguration};
pub use error::{Result, SiftError, UserFriendlyError};

// Core functionality re-exports
pub use aggregator::{Aggregator, NumericStats, ShortStats, StatisticsReport, TextStats};
pub use classifier::{classify, Category, ClassifiedValue, LineClassifier};
pub use ingest::{FileIngest, IngestReport};
pub use ui::{OutputFormatter, OutputMode, ProgressManager};
pub use writer::{OutputWriter, WriteReport, WrittenFile};

use std::path::Path;
use tracing::{debug, info};

/// Main library interface: ingest, write, report.
pub struct LineSift {
    config: RunConfiguration,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

/// Everything a run produced, for callers that want more than the printed output.
#[derive(Debug)]
pub struct RunReport {
    pub aggregator: Aggregator,
    pub ingest: IngestReport,
    pub write: WriteReport,
    pub statistics: Option<StatisticsReport>,
}

impl RunReport {
    pub fn error_count(&self) -> usize {
        self.ingest.errors.len() + self.write.errors.len()
    }
}

impl LineSift {
    pub fn new(config: RunConfiguration, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(!quiet && output_mode == OutputMode::Human);

        Self {
            config,
            output_formatter,
            progress_manager,
        }
    }

    /// Create a LineSift instance from CLI arguments and any config file
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = OutputMode::from_string(&config.report.format);
        let run_config = config.into_run_configuration(cli_args.files.clone());

        debug!(?run_config, ?output_mode, "configuration resolved");

        Ok(Self::new(
            run_config,
            output_mode,
            cli_args.verbosity_level(),
            cli_args.quiet,
        ))
    }

    /// Runs the whole pipeline. Every failure along the way is reported and
    /// recorded; none of them stops the run.
    pub fn run(&self) -> RunReport {
        let mut aggregator = Aggregator::new();

        let ingest = self.ingest_files(&mut aggregator);
        let write = self.write_outputs(&aggregator, ingest.read_failed);
        let statistics = self.print_statistics(&aggregator);

        info!(
            integers = aggregator.integers().len(),
            floats = aggregator.floats().len(),
            strings = aggregator.strings().len(),
            values = aggregator.total(),
            errors = ingest.errors.len() + write.errors.len(),
            "run finished"
        );

        RunReport {
            aggregator,
            ingest,
            write,
            statistics,
        }
    }

    fn ingest_files(&self, aggregator: &mut Aggregator) -> IngestReport {
        let file_progress = self
            .progress_manager
            .create_file_progress(self.config.input_files.len() as u64);
        let progress_callback = {
            let pb = file_progress.clone();
            move |progress: &IngestReport| {
                ui::progress::update_ingest_progress(&pb, progress);
            }
        };

        let report = FileIngest::new().ingest_files(
            &self.config.input_files,
            aggregator,
            Some(&progress_callback),
        );

        ui::progress::finish_progress_with_summary(
            &file_progress,
            &messages::progress_finished(report.lines_classified),
            report.elapsed(),
        );

        self.output_formatter.print_errors(&report.errors);
        self.output_formatter.print_ingest_summary(&report);

        report
    }

    fn write_outputs(&self, aggregator: &Aggregator, read_failed: bool) -> WriteReport {
        let report = OutputWriter::new(&self.config).write_all(aggregator, read_failed);
        self.output_formatter.print_write_report(&report);
        report
    }

    fn print_statistics(&self, aggregator: &Aggregator) -> Option<StatisticsReport> {
        if !self.config.wants_statistics() {
            return None;
        }

        let report = aggregator.statistics_report(self.config.short_stats, self.config.full_stats);
        self.output_formatter
            .print_statistics(&report, self.config.full_stats);

        Some(report)
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config)?;
        Ok(())
    }

}

/// Get version information
pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
