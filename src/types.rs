//! Core document types for predrank.
//!
//! The input document is a two-level map: model name -> target name ->
//! record. Each record is a JSON array whose first element is the error
//! series for that (model, target) pair; any trailing elements are metadata
//! this tool does not interpret and drops on load.
//!
//! Both map levels are BTreeMap-backed, so iteration order (and therefore
//! output key order) is deterministic across runs.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, IgnoredAny, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of leading indices ranked per target.
pub const DEFAULT_INDEX_COUNT: usize = 500;

/// Input document: model name -> target name -> record.
pub type ErrorDocument = BTreeMap<String, BTreeMap<String, TargetRecord>>;

/// Output document: target name -> ranked entries, ascending by value.
pub type RankingDocument = BTreeMap<String, Vec<RankedIndex>>;

/// One (model, target) record: the per-index error series.
///
/// On the wire a record is an array whose element `[0]` holds the series;
/// further elements may carry anything and are ignored when loading.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetRecord {
    pub series: Vec<f64>,
}

impl TargetRecord {
    pub fn new(series: Vec<f64>) -> Self {
        Self { series }
    }
}

impl<'de> Deserialize<'de> for TargetRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = TargetRecord;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a record array whose first element is a number series")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let series: Vec<f64> = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;

                // Drain trailing metadata elements without materializing them
                while seq.next_element::<IgnoredAny>()?.is_some() {}

                Ok(TargetRecord { series })
            }
        }

        deserializer.deserialize_seq(RecordVisitor)
    }
}

impl Serialize for TargetRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(1))?;
        seq.serialize_element(&self.series)?;
        seq.end()
    }
}

/// One ranked entry, serialized as `[original_index, averaged_value]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankedIndex(pub usize, pub f64);

impl RankedIndex {
    /// Position of the value in the original series.
    pub fn index(&self) -> usize {
        self.0
    }

    /// Error averaged across all models for this index.
    pub fn value(&self) -> f64 {
        self.1
    }
}
