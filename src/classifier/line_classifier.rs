use crate::error::{Result, SiftError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

// `[0-9]` rather than `\d`: the regex crate's `\d` accepts every Unicode digit.
static INTEGER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[0-9]+$").expect("integer pattern is valid"));

static FLOAT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?[0-9]*\.[0-9]+(?:[eE][-+]?[0-9]+)?$")
        .expect("float pattern is valid")
});

/// The bucket a line lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Integer,
    Float,
    Text,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Integer, Category::Float, Category::Text];

    /// Stem of the output file for this category, before the prefix and `.txt`.
    pub fn file_stem(&self) -> &'static str {
        match self {
            Category::Integer => "integers",
            Category::Float => "floats",
            Category::Text => "strings",
        }
    }

    pub fn file_name(&self, prefix: &str) -> String {
        format!("{}{}.txt", prefix, self.file_stem())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_stem())
    }
}

/// A classified, non-blank input line.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifiedValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl ClassifiedValue {
    pub fn category(&self) -> Category {
        match self {
            ClassifiedValue::Integer(_) => Category::Integer,
            ClassifiedValue::Float(_) => Category::Float,
            ClassifiedValue::Text(_) => Category::Text,
        }
    }

    /// The text written to the output file for this value.
    pub fn canonical(&self) -> String {
        match self {
            ClassifiedValue::Integer(value) => value.to_string(),
            ClassifiedValue::Float(value) => format_float(*value),
            ClassifiedValue::Text(text) => text.clone(),
        }
    }
}

impl fmt::Display for ClassifiedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

/// Formats a float so it always reads as one: `-50.0`, `3.14`, `1e20`.
pub fn format_float(value: f64) -> String {
    format!("{:?}", value)
}

/// Whole-line classifier for trimmed, non-empty lines.
///
/// Integer is tried before float, and float before text. A line that looks
/// numeric but does not fit the target type is rejected with
/// [`SiftError::LineParse`] instead of falling back to text.
#[derive(Debug, Default, Clone, Copy)]
pub struct LineClassifier;

impl LineClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn is_integer(&self, line: &str) -> bool {
        INTEGER_PATTERN.is_match(line)
    }

    pub fn is_float(&self, line: &str) -> bool {
        FLOAT_PATTERN.is_match(line)
    }

    pub fn classify(&self, line: &str) -> Result<ClassifiedValue> {
        debug_assert!(!line.is_empty(), "blank lines are skipped before classification");

        if self.is_integer(line) {
            return line
                .parse::<i64>()
                .map(ClassifiedValue::Integer)
                .map_err(|e| SiftError::LineParse {
                    line: line.to_string(),
                    reason: e.to_string(),
                });
        }

        if self.is_float(line) {
            let value = line.parse::<f64>().map_err(|e| SiftError::LineParse {
                line: line.to_string(),
                reason: e.to_string(),
            })?;

            if !value.is_finite() {
                return Err(SiftError::LineParse {
                    line: line.to_string(),
                    reason: "value is out of range for a 64-bit float".to_string(),
                });
            }

            return Ok(ClassifiedValue::Float(value));
        }

        Ok(ClassifiedValue::Text(line.to_string()))
    }
}

/// Classifies a single trimmed line with the default classifier.
pub fn classify(line: &str) -> Result<ClassifiedValue> {
    LineClassifier::new().classify(line)
}
