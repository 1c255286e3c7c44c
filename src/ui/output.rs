use crate::aggregator::{NumericStats, ShortStats, StatisticsReport, TextStats};
use crate::classifier::format_float;
use crate::error::{SiftError, UserFriendlyError};
use crate::ingest::IngestReport;
use crate::messages;
use crate::writer::WriteReport;
use console::{style, Emoji, Term};
use std::fmt::Display;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

impl OutputMode {
    pub fn from_string(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputMode::Json,
            "plain" => OutputMode::Plain,
            _ => OutputMode::Human,
        }
    }
}

// Emojis with text fallbacks
static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");

/// Renders statistics on stdout and every diagnostic message on stderr, so the
/// statistics stream stays machine-readable.
pub struct OutputFormatter {
    mode: OutputMode,
    /// Styling for messages on stderr.
    use_colors: bool,
    /// Styling for statistics on stdout.
    stats_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        Self::with_terminals(
            mode,
            verbose,
            quiet,
            Term::stdout().features().colors_supported(),
            Term::stderr().features().colors_supported(),
        )
    }

    fn with_terminals(
        mode: OutputMode,
        verbose: u8,
        quiet: bool,
        stdout_colors: bool,
        stderr_colors: bool,
    ) -> Self {
        let human = mode == OutputMode::Human && !quiet;

        Self {
            mode,
            use_colors: human && stderr_colors,
            stats_colors: human && stdout_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    // Core messaging methods
    pub fn success(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Success, message),
                OutputMode::Json => self.print_json_message("success", message),
                OutputMode::Plain => eprintln!("SUCCESS: {}", message),
            }
        }
    }

    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Error, message),
            OutputMode::Json => self.print_json_message("error", message),
            OutputMode::Plain => eprintln!("ERROR: {}", message),
        }
    }

    pub fn warning(&self, message: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Warning, message),
                OutputMode::Json => self.print_json_message("warning", message),
                OutputMode::Plain => eprintln!("WARNING: {}", message),
            }
        }
    }

    pub fn info(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Info, message),
                OutputMode::Json => self.print_json_message("info", message),
                OutputMode::Plain => eprintln!("INFO: {}", message),
            }
        }
    }

    // User-friendly error handling
    pub fn print_user_friendly_error(&self, error: &SiftError) {
        let user_message = error.user_message();
        self.error(&user_message);

        if let Some(suggestion) = error.suggestion() {
            if !self.should_show_message(1) {
                return;
            }

            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        eprintln!(
                            "{}{}",
                            INFO,
                            style(messages::suggestion(&suggestion)).cyan()
                        );
                    } else {
                        eprintln!("{}", messages::suggestion(&suggestion));
                    }
                }
                OutputMode::Json => {
                    self.print_json_object(&serde_json::json!({
                        "type": "suggestion",
                        "message": suggestion
                    }));
                }
                OutputMode::Plain => {
                    eprintln!("SUGGESTION: {}", suggestion);
                }
            }
        }
    }

    pub fn print_errors(&self, errors: &[SiftError]) {
        for error in errors {
            self.print_user_friendly_error(error);
        }
    }

    /// Reports the outcome of the write step, including a directory fallback.
    pub fn print_write_report(&self, report: &WriteReport) {
        self.print_errors(&report.errors);

        if report.fell_back {
            self.warning(messages::DIRECTORY_FALLBACK);
        }

        if report.directory_skipped {
            self.info(&messages::directory_creation_skipped(&report.output_directory));
        }

        for file in &report.files_written {
            self.success(&messages::file_written(&file.path, file.lines));
        }
    }

    pub fn print_ingest_summary(&self, report: &IngestReport) {
        self.info(&messages::ingest_summary(
            report.files_read,
            report.files_total,
            report.lines_classified,
        ));
    }

    /// Prints the requested statistics on stdout.
    pub fn print_statistics(&self, report: &StatisticsReport, full: bool) {
        match self.mode {
            OutputMode::Json => {
                let json_output =
                    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string());
                println!("{}", json_output);
            }
            OutputMode::Human | OutputMode::Plain => {
                let stdout = io::stdout();
                let mut out = stdout.lock();
                // A closed stdout (e.g. `| head`) is not worth a panic.
                let _ = self.render_statistics(&mut out, report, full);
            }
        }
    }

    /// Text rendering of the statistics blocks: short counts first, then one
    /// section per non-empty category.
    pub fn render_statistics<W: Write>(
        &self,
        out: &mut W,
        report: &StatisticsReport,
        full: bool,
    ) -> io::Result<()> {
        if let Some(ref short) = report.short {
            self.render_short(out, short)?;
        }

        if full {
            self.write_title(out, messages::FULL_STATS_TITLE)?;

            if let Some(ref stats) = report.integers {
                self.render_numeric(out, messages::INTEGERS_HEADING, stats, |v| v.to_string())?;
            }
            if let Some(ref stats) = report.floats {
                self.render_numeric(out, messages::FLOATS_HEADING, stats, |v| format_float(*v))?;
            }
            if let Some(ref stats) = report.strings {
                self.render_text(out, stats)?;
            }
        }

        Ok(())
    }

    fn render_short<W: Write>(&self, out: &mut W, short: &ShortStats) -> io::Result<()> {
        self.write_title(out, messages::SHORT_STATS_TITLE)?;
        self.write_field(out, messages::INTEGERS_HEADING, short.integers)?;
        self.write_field(out, messages::FLOATS_HEADING, short.floats)?;
        self.write_field(out, messages::STRINGS_HEADING, short.strings)?;
        writeln!(out)
    }

    fn render_numeric<W: Write, T>(
        &self,
        out: &mut W,
        heading: &str,
        stats: &NumericStats<T>,
        format_value: impl Fn(&T) -> String,
    ) -> io::Result<()> {
        self.write_section(out, heading)?;
        self.write_field(out, messages::COUNT_LABEL, stats.count)?;
        self.write_field(out, messages::MIN_LABEL, format_value(&stats.min))?;
        self.write_field(out, messages::MAX_LABEL, format_value(&stats.max))?;
        self.write_field(out, messages::SUM_LABEL, format_float(stats.sum))?;
        self.write_field(out, messages::AVERAGE_LABEL, format_float(stats.average))?;
        writeln!(out)
    }

    fn render_text<W: Write>(&self, out: &mut W, stats: &TextStats) -> io::Result<()> {
        self.write_section(out, messages::STRINGS_HEADING)?;
        self.write_field(out, messages::COUNT_LABEL, stats.count)?;
        self.write_field(out, messages::SHORTEST_LABEL, stats.min_length)?;
        self.write_field(out, messages::LONGEST_LABEL, stats.max_length)?;
        writeln!(out)
    }

    fn write_title<W: Write>(&self, out: &mut W, title: &str) -> io::Result<()> {
        if self.stats_colors {
            writeln!(out, "{}", style(format!("{}:", title)).bold().cyan())?;
        } else {
            writeln!(out, "{}:", title)?;
        }
        writeln!(out)
    }

    fn write_section<W: Write>(&self, out: &mut W, heading: &str) -> io::Result<()> {
        if self.stats_colors {
            writeln!(out, "* {}", style(format!("{}:", heading)).bold())
        } else {
            writeln!(out, "* {}:", heading)
        }
    }

    fn write_field<W: Write>(&self, out: &mut W, label: &str, value: impl Display) -> io::Result<()> {
        if self.stats_colors {
            writeln!(out, "{}: {}", label, style(value).cyan().bold())
        } else {
            writeln!(out, "{}: {}", label, value)
        }
    }

    // Private helper methods
    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn print_human_message(&self, msg_type: MessageType, message: &str) {
        if self.use_colors {
            let (emoji, styled) = match msg_type {
                MessageType::Success => (CHECKMARK, style(message).green().bold()),
                MessageType::Error => (CROSS, style(message).red().bold()),
                MessageType::Warning => (WARNING, style(message).yellow().bold()),
                MessageType::Info => (INFO, style(message).cyan()),
            };
            eprintln!("{}{}", emoji, styled);
        } else {
            let prefix = match msg_type {
                MessageType::Success => "✓",
                MessageType::Error => "✗",
                MessageType::Warning => "!",
                MessageType::Info => "i",
            };
            eprintln!("{} {}", prefix, message);
        }
    }

    fn print_json_message(&self, level: &str, message: &str) {
        self.print_json_object(&serde_json::json!({
            "type": "message",
            "level": level,
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }));
    }

    fn print_json_object(&self, obj: &serde_json::Value) {
        eprintln!(
            "{}",
            serde_json::to_string(obj).unwrap_or_else(|_| "{}".to_string())
        );
    }
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Success,
    Error,
    Warning,
    Info,
}
