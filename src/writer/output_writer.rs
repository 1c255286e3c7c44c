use crate::aggregator::Aggregator;
use crate::classifier::Category;
use crate::config::RunConfiguration;
use crate::error::{Result, SiftError};
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub category: Category,
    pub path: PathBuf,
    pub lines: usize,
}

#[derive(Debug)]
pub struct WriteReport {
    pub output_directory: PathBuf,
    pub directory_skipped: bool,
    pub fell_back: bool,
    pub files_written: Vec<WrittenFile>,
    pub errors: Vec<SiftError>,
}

impl WriteReport {
    fn new(output_directory: PathBuf) -> Self {
        Self {
            output_directory,
            directory_skipped: false,
            fell_back: false,
            files_written: Vec::new(),
            errors: Vec::new(),
        }
    }
}

/// Persists the three collections as `<dir>/<prefix><category>.txt`.
pub struct OutputWriter {
    output_dir: PathBuf,
    fallback_dir: PathBuf,
    prefix: String,
    append: bool,
    buffer_size: usize,
}

impl OutputWriter {
    pub fn new(config: &RunConfiguration) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            fallback_dir: PathBuf::from("."),
            prefix: config.prefix.clone(),
            append: config.append,
            buffer_size: 64 * 1024, // 64KB buffer
        }
    }

    pub fn with_fallback_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.fallback_dir = dir.into();
        self
    }

    pub fn file_path(&self, dir: &Path, category: Category) -> PathBuf {
        dir.join(category.file_name(&self.prefix))
    }

    /// Writes every non-empty category. Failures are collected in the report and
    /// never stop the remaining files.
    pub fn write_all(&self, aggregator: &Aggregator, read_failed: bool) -> WriteReport {
        let mut report = WriteReport::new(self.output_dir.clone());

        if read_failed {
            debug!(dir = %self.output_dir.display(), "directory creation skipped after read failure");
            report.directory_skipped = true;
        } else if let Err(e) = self.ensure_directory() {
            info!(
                dir = %self.output_dir.display(),
                fallback = %self.fallback_dir.display(),
                "falling back to current directory"
            );
            report.output_directory = self.fallback_dir.clone();
            report.fell_back = true;
            report.errors.push(e);
        }

        for category in Category::ALL {
            let count = aggregator.len(category);
            if count == 0 {
                continue;
            }

            let path = self.file_path(&report.output_directory, category);
            match self.write_category(aggregator, category, &path) {
                Ok(lines) => {
                    debug!(file = %path.display(), lines, "output file written");
                    report.files_written.push(WrittenFile {
                        category,
                        path,
                        lines,
                    });
                }
                Err(e) => report.errors.push(e),
            }
        }

        report
    }

    fn ensure_directory(&self) -> Result<()> {
        if self.output_dir.is_dir() {
            return Ok(());
        }

        fs::create_dir_all(&self.output_dir).map_err(|source| SiftError::DirectoryCreate {
            path: self.output_dir.clone(),
            source,
        })
    }

    fn write_category(
        &self,
        aggregator: &Aggregator,
        category: Category,
        path: &Path,
    ) -> Result<usize> {
        let to_write_error = |source: std::io::Error| SiftError::FileWrite {
            path: path.to_path_buf(),
            source,
        };

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(self.append)
            .truncate(!self.append)
            .open(path)
            .map_err(to_write_error)?;

        let mut writer = BufWriter::with_capacity(self.buffer_size, file);
        let mut lines = 0;

        for line in aggregator.canonical_lines(category) {
            write!(writer, "{}{}", line, LINE_ENDING).map_err(to_write_error)?;
            lines += 1;
        }

        writer.flush().map_err(to_write_error)?;

        Ok(lines)
    }
}
