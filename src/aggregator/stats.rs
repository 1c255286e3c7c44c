use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortStats {
    pub integers: usize,
    pub floats: usize,
    pub strings: usize,
}

/// Statistics for a non-empty numeric collection. `sum` is always accumulated in
/// double precision, even for integers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericStats<T> {
    pub count: usize,
    pub min: T,
    pub max: T,
    pub sum: f64,
    pub average: f64,
}

impl<T> NumericStats<T> {
    pub fn new(count: usize, min: T, max: T, sum: f64) -> Self {
        Self {
            count,
            min,
            max,
            sum,
            average: sum / count as f64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStats {
    pub count: usize,
    pub min_length: usize,
    pub max_length: usize,
}

/// Snapshot of everything the reporter may print.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short: Option<ShortStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integers: Option<NumericStats<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floats: Option<NumericStats<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strings: Option<TextStats>,
    pub generated_at: DateTime<Utc>,
}
