//! predrank - cross-model predictability ranking.
//!
//! Several independently trained models each report a per-index error series
//! for every target. Information that multiple networks learn tends to be
//! significant, so indices that stay cheap to predict across all models are
//! frequently the interpretable ones. predrank averages each index's error
//! across models and orders the indices of each target ascending by that
//! mean.
//!
//! # Pipeline
//!
//! ```text
//! Load Document → Validate Schema → Average per Index → Stable Sort → Write
//!       ↓               ↓                  ↓                ↓           ↓
//!   serde_json    uniform targets,   mean across      ascending,    pretty
//!                 series length       models          ties by index  JSON
//! ```
//!
//! A companion summary pass (the `predrank-matrix` binary) collapses each
//! (source, target) series to its geometric mean and differential entropy
//! for cross-model comparison tables.

pub mod document;
pub mod ranking;
pub mod summary;
pub mod types;

// Re-export the public surface
pub use document::{load_document, store_document};
pub use ranking::{PredictabilityRanker, RankerConfig};
pub use summary::{summarize, PairSummary, SummaryMatrix};
pub use types::{
    ErrorDocument, RankedIndex, RankingDocument, TargetRecord, DEFAULT_INDEX_COUNT,
};
