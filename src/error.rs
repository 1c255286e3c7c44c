use crate::messages;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiftError {
    #[error("Failed to read input file {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse line {line:?}: {reason}")]
    LineParse { line: String, reason: String },

    #[error("Failed to create output directory {}: {source}", .path.display())]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output file {}: {source}", .path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for SiftError {
    fn user_message(&self) -> String {
        match self {
            SiftError::FileRead { path, source } => messages::file_read_failed(path, source),
            SiftError::LineParse { line, reason } => messages::line_parse_failed(line, reason),
            SiftError::DirectoryCreate { path, source } => {
                messages::directory_create_failed(path, source)
            }
            SiftError::FileWrite { path, source } => messages::file_write_failed(path, source),
            SiftError::Config { message } => messages::configuration_error(message),
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            SiftError::FileRead { source, .. } => match source.kind() {
                std::io::ErrorKind::NotFound => Some(messages::MISSING_INPUT_HINT.to_string()),
                std::io::ErrorKind::InvalidData => Some(messages::INVALID_UTF8_HINT.to_string()),
                std::io::ErrorKind::PermissionDenied => {
                    Some(messages::READ_PERMISSION_HINT.to_string())
                }
                _ => None,
            },
            SiftError::LineParse { .. } => Some(messages::OVERFLOW_HINT.to_string()),
            SiftError::DirectoryCreate { .. } => Some(messages::DIRECTORY_FALLBACK.to_string()),
            SiftError::FileWrite { .. } => Some(messages::WRITE_HINT.to_string()),
            SiftError::Config { .. } => Some(messages::CONFIG_HINT.to_string()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SiftError>;
