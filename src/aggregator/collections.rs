use crate::aggregator::stats::{NumericStats, ShortStats, StatisticsReport, TextStats};
use crate::classifier::{Category, ClassifiedValue};

/// The three per-category collections, kept in encounter order.
#[derive(Debug, Default, Clone)]
pub struct Aggregator {
    integers: Vec<i64>,
    floats: Vec<f64>,
    strings: Vec<String>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, value: ClassifiedValue) {
        match value {
            ClassifiedValue::Integer(v) => self.add_integer(v),
            ClassifiedValue::Float(v) => self.add_float(v),
            ClassifiedValue::Text(s) => self.add_string(s),
        }
    }

    pub fn add_integer(&mut self, value: i64) {
        self.integers.push(value);
    }

    pub fn add_float(&mut self, value: f64) {
        self.floats.push(value);
    }

    pub fn add_string<S: Into<String>>(&mut self, value: S) {
        self.strings.push(value.into());
    }

    pub fn integers(&self) -> &[i64] {
        &self.integers
    }

    pub fn floats(&self) -> &[f64] {
        &self.floats
    }

    pub fn strings(&self) -> &[String] {
        &self.strings
    }

    pub fn len(&self, category: Category) -> usize {
        match category {
            Category::Integer => self.integers.len(),
            Category::Float => self.floats.len(),
            Category::Text => self.strings.len(),
        }
    }

    pub fn total(&self) -> usize {
        self.integers.len() + self.floats.len() + self.strings.len()
    }

    /// Canonical output lines for one category, in insertion order.
    pub fn canonical_lines(&self, category: Category) -> Box<dyn Iterator<Item = String> + '_> {
        match category {
            Category::Integer => Box::new(
                self.integers
                    .iter()
                    .map(|v| ClassifiedValue::Integer(*v).canonical()),
            ),
            Category::Float => Box::new(
                self.floats
                    .iter()
                    .map(|v| ClassifiedValue::Float(*v).canonical()),
            ),
            Category::Text => Box::new(self.strings.iter().cloned()),
        }
    }

    pub fn short_stats(&self) -> ShortStats {
        ShortStats {
            integers: self.integers.len(),
            floats: self.floats.len(),
            strings: self.strings.len(),
        }
    }

    pub fn integer_stats(&self) -> Option<NumericStats<i64>> {
        let min = *self.integers.iter().min()?;
        let max = *self.integers.iter().max()?;
        let sum: f64 = self.integers.iter().map(|v| *v as f64).sum();

        Some(NumericStats::new(self.integers.len(), min, max, sum))
    }

    pub fn float_stats(&self) -> Option<NumericStats<f64>> {
        let first = *self.floats.first()?;
        let (min, max) = self
            .floats
            .iter()
            .fold((first, first), |(min, max), v| (min.min(*v), max.max(*v)));
        let sum: f64 = self.floats.iter().sum();

        Some(NumericStats::new(self.floats.len(), min, max, sum))
    }

    /// Length statistics, measured in Unicode scalar values.
    pub fn text_stats(&self) -> Option<TextStats> {
        let lengths = self.strings.iter().map(|s| s.chars().count());
        let min_length = lengths.clone().min()?;
        let max_length = lengths.max()?;

        Some(TextStats {
            count: self.strings.len(),
            min_length,
            max_length,
        })
    }

    pub fn statistics_report(&self, include_short: bool, include_full: bool) -> StatisticsReport {
        StatisticsReport {
            short: include_short.then(|| self.short_stats()),
            integers: include_full.then(|| self.integer_stats()).flatten(),
            floats: include_full.then(|| self.float_stats()).flatten(),
            strings: include_full.then(|| self.text_stats()).flatten(),
            generated_at: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify;

    fn sample() -> Aggregator {
        let mut aggregator = Aggregator::new();
        for line in ["42", "-7", "3.14", "-0.5e2", "hello world"] {
            aggregator.add(classify(line).unwrap());
        }
        aggregator
    }

    #[test]
    fn test_sample_classification() {
        let aggregator = sample();
        assert_eq!(aggregator.integers(), &[42, -7]);
        assert_eq!(aggregator.floats(), &[3.14, -50.0]);
        assert_eq!(aggregator.strings(), &["hello world".to_string()]);
        assert_eq!(aggregator.total(), 5);
    }

    #[test]
    fn test_short_stats() {
        let stats = sample().short_stats();
        assert_eq!(stats.integers, 2);
        assert_eq!(stats.floats, 2);
        assert_eq!(stats.strings, 1);
    }

    #[test]
    fn test_integer_stats() {
        let stats = sample().integer_stats().unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.min, -7);
        assert_eq!(stats.max, 42);
        assert_eq!(stats.sum, 35.0);
        assert_eq!(stats.average, 17.5);
    }

    #[test]
    fn test_float_stats() {
        let stats = sample().float_stats().unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.min, -50.0);
        assert_eq!(stats.max, 3.14);
        assert!((stats.sum - (-46.86)).abs() < 1e-9);
    }

    #[test]
    fn test_text_stats_count_characters() {
        let mut aggregator = Aggregator::new();
        aggregator.add_string("abc");
        aggregator.add_string("héllo wörld");
        aggregator.add_string("x");

        let stats = aggregator.text_stats().unwrap();
        assert_eq!(stats.count, 3);
        assert_eq!(stats.min_length, 1);
        assert_eq!(stats.max_length, 11);
    }

    #[test]
    fn test_empty_collections_have_no_stats() {
        let aggregator = Aggregator::new();
        assert_eq!(aggregator.total(), 0);
        assert!(aggregator.integer_stats().is_none());
        assert!(aggregator.float_stats().is_none());
        assert!(aggregator.text_stats().is_none());

        let report = aggregator.statistics_report(true, true);
        assert_eq!(report.short.unwrap().integers, 0);
        assert!(report.integers.is_none());
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let mut aggregator = Aggregator::new();
        for v in [5, 1, 3, 1] {
            aggregator.add_integer(v);
        }
        let lines: Vec<String> = aggregator.canonical_lines(Category::Integer).collect();
        assert_eq!(lines, vec!["5", "1", "3", "1"]);
    }

    #[test]
    fn test_large_integer_sum_uses_float() {
        let mut aggregator = Aggregator::new();
        aggregator.add_integer(i64::MAX);
        aggregator.add_integer(i64::MAX);

        let stats = aggregator.integer_stats().unwrap();
        assert!(stats.sum > i64::MAX as f64);
    }
}
