pub mod output_writer;

pub use output_writer::{OutputWriter, WriteReport, WrittenFile, LINE_ENDING};
