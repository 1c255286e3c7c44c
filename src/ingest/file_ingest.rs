use crate::aggregator::Aggregator;
use crate::classifier::LineClassifier;
use crate::error::{Result, SiftError};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Outcome of reading every input file.
#[derive(Debug)]
pub struct IngestReport {
    pub files_total: usize,
    pub files_processed: usize,
    pub files_read: usize,
    pub lines_seen: usize,
    pub blank_lines: usize,
    pub lines_classified: usize,
    pub lines_dropped: usize,
    pub current_file: Option<PathBuf>,
    pub start_time: Instant,
    pub errors: Vec<SiftError>,
    /// Set once any input file could not be read. The writer then leaves the
    /// output directory alone.
    pub read_failed: bool,
}

impl IngestReport {
    pub fn new(files_total: usize) -> Self {
        Self {
            files_total,
            files_processed: 0,
            files_read: 0,
            lines_seen: 0,
            blank_lines: 0,
            lines_classified: 0,
            lines_dropped: 0,
            current_file: None,
            start_time: Instant::now(),
            errors: Vec::new(),
            read_failed: false,
        }
    }

    pub fn add_error(&mut self, error: SiftError) {
        self.errors.push(error);
    }

    pub fn percentage(&self) -> f64 {
        if self.files_total == 0 {
            0.0
        } else {
            (self.files_processed as f64 / self.files_total as f64) * 100.0
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

#[derive(Debug, Default)]
pub struct FileIngest {
    classifier: LineClassifier,
}

impl FileIngest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `paths` in order, feeding every non-blank line into `aggregator`.
    ///
    /// Unreadable files and unparsable lines are recorded in the report and
    /// skipped; nothing here aborts the run.
    pub fn ingest_files(
        &self,
        paths: &[PathBuf],
        aggregator: &mut Aggregator,
        progress_callback: Option<&dyn Fn(&IngestReport)>,
    ) -> IngestReport {
        let mut report = IngestReport::new(paths.len());

        for path in paths {
            if let Some(callback) = progress_callback {
                callback(&report);
            }

            report.current_file = Some(path.clone());

            match read_text(path) {
                Ok(content) => {
                    self.ingest_content(&content, aggregator, &mut report);
                    report.files_read += 1;
                    debug!(file = %path.display(), "input file classified");
                }
                Err(e) => {
                    info!(file = %path.display(), error = %e, "input file skipped");
                    report.read_failed = true;
                    report.add_error(e);
                }
            }

            report.files_processed += 1;
        }

        if let Some(callback) = progress_callback {
            callback(&report);
        }

        report
    }

    /// Classifies the lines of one already-loaded file.
    pub fn ingest_content(
        &self,
        content: &str,
        aggregator: &mut Aggregator,
        report: &mut IngestReport,
    ) {
        for raw_line in split_lines(content) {
            report.lines_seen += 1;

            let line = trim_line(raw_line);
            if line.is_empty() {
                report.blank_lines += 1;
                continue;
            }

            match self.classifier.classify(line) {
                Ok(value) => {
                    aggregator.add(value);
                    report.lines_classified += 1;
                }
                Err(e) => {
                    debug!(line, "numeric line dropped");
                    report.lines_dropped += 1;
                    report.add_error(e);
                }
            }
        }
    }
}

/// Strips ASCII control characters and spaces from both ends. Other Unicode
/// whitespace, such as a no-break space, stays part of the line.
pub fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| c <= ' ')
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| SiftError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Splits text on `\n`, `\r\n` and lone `\r`. A trailing terminator does not
/// produce an extra empty line.
pub fn split_lines(content: &str) -> Vec<&str> {
    let bytes = content.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&content[start..i]);
                start = i + 1;
            }
            b'\r' => {
                lines.push(&content[start..i]);
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }

    if start < bytes.len() {
        lines.push(&content[start..]);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_input(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_split_lines_endings() {
        assert_eq!(split_lines("a\nb\r\nc\rd"), vec!["a", "b", "c", "d"]);
        assert_eq!(split_lines("a\n"), vec!["a"]);
        assert_eq!(split_lines("a\r\n\r\nb"), vec!["a", "", "b"]);
        assert_eq!(split_lines("\n"), vec![""]);
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_ingest_sample_lines() {
        let temp_dir = TempDir::new().unwrap();
        let input = write_input(
            temp_dir.path(),
            "in.txt",
            b"42\n-7\n3.14\n-0.5e2\nhello world\n\n",
        );

        let mut aggregator = Aggregator::new();
        let report = FileIngest::new().ingest_files(&[input], &mut aggregator, None);

        assert_eq!(aggregator.integers(), &[42, -7]);
        assert_eq!(aggregator.floats(), &[3.14, -50.0]);
        assert_eq!(aggregator.strings(), &["hello world".to_string()]);
        assert_eq!(report.lines_classified, 5);
        assert_eq!(report.blank_lines, 1);
        assert!(!report.read_failed);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_lines_are_trimmed() {
        let temp_dir = TempDir::new().unwrap();
        let input = write_input(temp_dir.path(), "in.txt", b"  12  \r\n\t  \r\n  some text\t\n");

        let mut aggregator = Aggregator::new();
        let report = FileIngest::new().ingest_files(&[input], &mut aggregator, None);

        assert_eq!(aggregator.integers(), &[12]);
        assert_eq!(aggregator.strings(), &["some text".to_string()]);
        assert_eq!(report.blank_lines, 1);
    }

    #[test]
    fn test_trim_strips_only_control_and_space() {
        assert_eq!(trim_line("\u{0}42\u{1f}"), "42");
        assert_eq!(trim_line(" \t x \x0b"), "x");
        assert_eq!(trim_line("42\u{a0}"), "42\u{a0}");

        let mut aggregator = Aggregator::new();
        let mut report = IngestReport::new(1);
        FileIngest::new().ingest_content("42\u{a0}\n\u{0}7\n", &mut aggregator, &mut report);

        assert_eq!(aggregator.integers(), &[7]);
        assert_eq!(aggregator.strings(), &["42\u{a0}".to_string()]);
    }

    #[test]
    fn test_missing_file_is_isolated() {
        let temp_dir = TempDir::new().unwrap();
        let first = write_input(temp_dir.path(), "a.txt", b"1\nx\n");
        let missing = temp_dir.path().join("missing.txt");
        let last = write_input(temp_dir.path(), "b.txt", b"2\n2.5\n");

        let mut aggregator = Aggregator::new();
        let report =
            FileIngest::new().ingest_files(&[first, missing, last], &mut aggregator, None);

        assert_eq!(aggregator.integers(), &[1, 2]);
        assert_eq!(aggregator.floats(), &[2.5]);
        assert_eq!(aggregator.strings(), &["x".to_string()]);
        assert!(report.read_failed);
        assert_eq!(report.files_read, 2);
        assert_eq!(report.files_processed, 3);
        assert_eq!(report.errors.len(), 1);
        assert!(matches!(report.errors[0], SiftError::FileRead { .. }));
    }

    #[test]
    fn test_invalid_utf8_skips_whole_file() {
        let temp_dir = TempDir::new().unwrap();
        let input = write_input(temp_dir.path(), "bin.txt", b"1\n\xff\xfe\n2\n");

        let mut aggregator = Aggregator::new();
        let report = FileIngest::new().ingest_files(&[input], &mut aggregator, None);

        assert_eq!(aggregator.total(), 0);
        assert!(report.read_failed);
    }

    #[test]
    fn test_overflow_line_is_dropped_and_reported() {
        let temp_dir = TempDir::new().unwrap();
        let input = write_input(
            temp_dir.path(),
            "in.txt",
            b"1\n99999999999999999999\n2\n",
        );

        let mut aggregator = Aggregator::new();
        let report = FileIngest::new().ingest_files(&[input], &mut aggregator, None);

        assert_eq!(aggregator.integers(), &[1, 2]);
        assert!(aggregator.strings().is_empty());
        assert_eq!(report.lines_dropped, 1);
        assert!(!report.read_failed);
        assert!(matches!(report.errors[0], SiftError::LineParse { .. }));
    }

    #[test]
    fn test_progress_callback() {
        let temp_dir = TempDir::new().unwrap();
        let input = write_input(temp_dir.path(), "in.txt", b"1\n");
        let calls = std::cell::Cell::new(0);
        let callback = |_: &IngestReport| calls.set(calls.get() + 1);

        let mut aggregator = Aggregator::new();
        let report =
            FileIngest::new().ingest_files(&[input], &mut aggregator, Some(&callback));

        assert_eq!(calls.get(), 2);
        assert_eq!(report.percentage(), 100.0);
    }
}
