//! User-facing message text.
//!
//! Every string the tool shows to a person is produced here, so the wording can
//! be replaced in one place without touching the pipeline.

use std::fmt::Display;
use std::path::Path;

pub const SHORT_STATS_TITLE: &str = "Short statistics";
pub const FULL_STATS_TITLE: &str = "Full statistics";

pub const INTEGERS_HEADING: &str = "Integers";
pub const FLOATS_HEADING: &str = "Floats";
pub const STRINGS_HEADING: &str = "Strings";

pub const COUNT_LABEL: &str = "Count";
pub const MIN_LABEL: &str = "Min";
pub const MAX_LABEL: &str = "Max";
pub const SUM_LABEL: &str = "Sum";
pub const AVERAGE_LABEL: &str = "Average";
pub const SHORTEST_LABEL: &str = "Shortest string length";
pub const LONGEST_LABEL: &str = "Longest string length";

pub const DIRECTORY_FALLBACK: &str = "Output files will be written to the current directory.";

pub fn file_read_failed(path: &Path, cause: impl Display) -> String {
    format!("Error processing file {}: {}", path.display(), cause)
}

pub fn line_parse_failed(line: &str, reason: impl Display) -> String {
    format!("Error parsing line {}: {}", line, reason)
}

pub fn directory_create_failed(path: &Path, cause: impl Display) -> String {
    format!(
        "Could not create output directory {}: {}",
        path.display(),
        cause
    )
}

pub fn file_write_failed(path: &Path, cause: impl Display) -> String {
    format!("Error writing file {}: {}", path.display(), cause)
}

pub fn directory_creation_skipped(path: &Path) -> String {
    format!(
        "Skipping creation of output directory {} because an input file could not be read",
        path.display()
    )
}

pub fn file_written(path: &Path, lines: usize) -> String {
    format!("Wrote {} lines to {}", lines, path.display())
}

pub fn ingest_summary(files_read: usize, files_total: usize, lines: usize) -> String {
    format!(
        "Classified {} lines from {}/{} files",
        lines, files_read, files_total
    )
}

pub fn config_generated(path: &str) -> String {
    format!("Generated sample configuration file: {}", path)
}

pub fn configuration_error(message: impl Display) -> String {
    format!("Configuration error: {}", message)
}

pub fn config_not_found(path: &Path) -> String {
    format!("Configuration file not found: {}", path.display())
}

pub fn config_read_failed(path: &Path, cause: impl Display) -> String {
    format!("Failed to read config file {}: {}", path.display(), cause)
}

pub fn config_parse_failed(path: &Path, cause: impl Display) -> String {
    format!("Failed to parse config file {}: {}", path.display(), cause)
}

pub fn prefix_has_separator(prefix: &str) -> String {
    format!("File prefix must not contain path separators: {}", prefix)
}

pub fn unknown_report_format(format: &str) -> String {
    format!(
        "Unknown report format '{}' (expected human, plain or json)",
        format
    )
}

pub fn config_generation_failed(cause: impl Display) -> String {
    format!("Failed to generate configuration file: {}", cause)
}

pub fn config_usage(path: &str) -> String {
    format!(
        "\nTo use this configuration:\n  linesift <files>... --config {}",
        path
    )
}

pub fn suggestion(text: impl Display) -> String {
    format!("Suggestion: {}", text)
}

pub const MISSING_INPUT_HINT: &str =
    "Check the path; input files are resolved relative to the working directory.";
pub const INVALID_UTF8_HINT: &str = "Input files must be UTF-8 encoded text.";
pub const READ_PERMISSION_HINT: &str = "Ensure you have read permission for the input file.";
pub const OVERFLOW_HINT: &str =
    "Numbers outside the 64-bit range are dropped; quote or alter the line to keep it as text.";
pub const WRITE_HINT: &str =
    "Ensure the output directory exists and is writable, or choose another one with -o.";
pub const CONFIG_HINT: &str =
    "Check your configuration file syntax and ensure all values have the right type.";

pub const PROGRESS_READING: &str = "Reading input files...";

pub fn progress_classifying(path: &Path, lines: usize) -> String {
    format!("Classifying {} ({} lines so far)", path.display(), lines)
}

pub fn progress_finished(lines: usize) -> String {
    format!("Classified {} lines", lines)
}

pub fn progress_completed_in(summary: &str, duration: impl Display) -> String {
    format!("{} (completed in {})", summary, duration)
}
