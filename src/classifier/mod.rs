pub mod line_classifier;

pub use line_classifier::{classify, format_float, Category, ClassifiedValue, LineClassifier};
