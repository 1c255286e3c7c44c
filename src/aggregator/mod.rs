pub mod collections;
pub mod stats;

pub use collections::Aggregator;
pub use stats::{NumericStats, ShortStats, StatisticsReport, TextStats};
