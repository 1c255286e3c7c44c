pub mod file_ingest;

pub use file_ingest::{split_lines, trim_line, FileIngest, IngestReport};
