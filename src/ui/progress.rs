use crate::ingest::IngestReport;
use crate::messages;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Draws on stderr; indicatif hides the bar by itself when stderr is not a TTY.
pub struct ProgressManager {
    enabled: bool,
}

impl ProgressManager {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn create_file_progress(&self, total_files: u64) -> ProgressBar {
        if !self.enabled || total_files == 0 {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(total_files);
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>7}/{len:7} files {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
        );
        pb.set_message(messages::PROGRESS_READING);
        pb
    }
}

pub fn update_ingest_progress(pb: &ProgressBar, progress: &IngestReport) {
    pb.set_position(progress.files_processed as u64);

    match progress.current_file {
        Some(ref current_file) => pb.set_message(messages::progress_classifying(
            current_file,
            progress.lines_classified,
        )),
        None => pb.set_message(messages::PROGRESS_READING),
    }
}

pub fn finish_progress_with_summary(pb: &ProgressBar, message: &str, duration: Duration) {
    let final_message = messages::progress_completed_in(message, format_duration(duration));
    pb.finish_with_message(final_message);
}

fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}s", secs)
    } else {
        format!("{}ms", duration.as_millis())
    }
}
