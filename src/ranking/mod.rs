//! Ranking pipeline - from error series to predictability orderings.

mod predictability;

pub use predictability::{PredictabilityRanker, RankerConfig};
