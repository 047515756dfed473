//! Cross-model predictability ranking.
//!
//! Several independently trained models each report a per-index error series
//! for every target. Information that multiple networks learn tends to be
//! significant, so indices with low error across all models are frequently
//! the interpretable ones. The ranker averages each index's error across
//! models and orders the indices of each target ascending by that mean.

use anyhow::{anyhow, bail, Result};

use crate::types::{ErrorDocument, RankedIndex, RankingDocument, DEFAULT_INDEX_COUNT};

/// Configuration for the predictability ranker.
#[derive(Debug, Clone)]
pub struct RankerConfig {
    /// Number of leading indices of each series to rank.
    pub index_count: usize,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            index_count: DEFAULT_INDEX_COUNT,
        }
    }
}

/// Cross-model average-error ranker.
///
/// The target set is taken from the first model's sub-map and is
/// authoritative: every other model must carry exactly that set. Averaging
/// is an unweighted arithmetic mean across models, computed per index.
pub struct PredictabilityRanker {
    config: RankerConfig,
}

impl PredictabilityRanker {
    /// Create a new PredictabilityRanker with the given configuration.
    pub fn new(config: RankerConfig) -> Self {
        Self { config }
    }

    /// Rank every target in the document.
    ///
    /// The algorithm:
    /// 1. Validate target-set uniformity and series lengths
    /// 2. For each target, average index `i` across all models
    /// 3. Stable-sort the (index, mean) pairs ascending by mean
    ///
    /// Errors on an empty document, on mismatched target sets across models,
    /// and on any series shorter than the configured index count.
    pub fn rank(&self, document: &ErrorDocument) -> Result<RankingDocument> {
        let targets = self.validate(document)?;
        let model_count = document.len() as f64;

        let mut result = RankingDocument::new();
        for target in targets {
            let mut means = vec![0.0f64; self.config.index_count];
            for records in document.values() {
                // Presence and length were checked in validate()
                let series = &records[target].series;
                for (mean, value) in means.iter_mut().zip(series) {
                    *mean += value / model_count;
                }
            }

            let mut ranked: Vec<RankedIndex> = means
                .into_iter()
                .enumerate()
                .map(|(index, value)| RankedIndex(index, value))
                .collect();

            // sort_by is stable: equal means keep ascending index order.
            // total_cmp keeps the ordering deterministic even for NaN input.
            // total_cmp would put -0.0 before 0.0, but a -0.0 mean cannot
            // occur: accumulation starts from +0.0, and IEEE addition only
            // yields -0.0 when every operand is -0.0.
            ranked.sort_by(|a, b| a.value().total_cmp(&b.value()));

            result.insert(target.to_string(), ranked);
        }

        Ok(result)
    }

    /// Check that every model carries exactly the first model's target set
    /// and that every series is long enough. Returns the authoritative
    /// target list.
    fn validate<'a>(&self, document: &'a ErrorDocument) -> Result<Vec<&'a str>> {
        let (first_model, first_targets) = document
            .iter()
            .next()
            .ok_or_else(|| anyhow!("input document contains no models"))?;

        for (model, records) in document {
            for target in records.keys() {
                if !first_targets.contains_key(target) {
                    bail!(
                        "model '{}' has target '{}' that model '{}' lacks",
                        model,
                        target,
                        first_model
                    );
                }
            }

            for target in first_targets.keys() {
                let record = records
                    .get(target)
                    .ok_or_else(|| anyhow!("model '{}' is missing target '{}'", model, target))?;

                if record.series.len() < self.config.index_count {
                    bail!(
                        "series for model '{}', target '{}' has {} values, expected at least {}",
                        model,
                        target,
                        record.series.len(),
                        self.config.index_count
                    );
                }
            }
        }

        Ok(first_targets.keys().map(String::as_str).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TargetRecord;
    use std::collections::BTreeMap;

    fn document(models: &[(&str, &[(&str, &[f64])])]) -> ErrorDocument {
        let mut doc = ErrorDocument::new();
        for (model, targets) in models {
            let mut records = BTreeMap::new();
            for (target, series) in *targets {
                records.insert(target.to_string(), TargetRecord::new(series.to_vec()));
            }
            doc.insert(model.to_string(), records);
        }
        doc
    }

    fn ranker(index_count: usize) -> PredictabilityRanker {
        PredictabilityRanker::new(RankerConfig { index_count })
    }

    #[test]
    fn test_averages_across_models() {
        let doc = document(&[
            ("m1", &[("A", &[10.0, 10.0, 20.0][..])]),
            ("m2", &[("A", &[0.0, 20.0, 10.0][..])]),
        ]);

        let ranking = ranker(3).rank(&doc).unwrap();
        let values: Vec<f64> = ranking["A"].iter().map(|e| e.value()).collect();

        // Means are [5, 15, 15]; index 0 sorts first
        assert_eq!(values, vec![5.0, 15.0, 15.0]);
        assert_eq!(ranking["A"][0].index(), 0);
    }

    #[test]
    fn test_ties_keep_lower_index_first() {
        // Indices 1 and 2 both average to 15; the stable sort must keep
        // index 1 ahead of index 2.
        let doc = document(&[
            ("m1", &[("A", &[10.0, 10.0, 20.0][..])]),
            ("m2", &[("A", &[0.0, 20.0, 10.0][..])]),
        ]);

        let ranking = ranker(3).rank(&doc).unwrap();
        let indices: Vec<usize> = ranking["A"].iter().map(|e| e.index()).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_sorts_ascending_by_mean() {
        let doc = document(&[("m1", &[("A", &[3.0, 1.0, 2.0][..])])]);

        let ranking = ranker(3).rank(&doc).unwrap();
        let entries: Vec<(usize, f64)> =
            ranking["A"].iter().map(|e| (e.index(), e.value())).collect();
        assert_eq!(entries, vec![(1, 1.0), (2, 2.0), (0, 3.0)]);
    }

    #[test]
    fn test_each_index_appears_exactly_once() {
        let doc = document(&[("m1", &[("A", &[5.0, 0.0, 5.0, 0.0, 5.0][..])])]);

        let ranking = ranker(5).rank(&doc).unwrap();
        let mut indices: Vec<usize> = ranking["A"].iter().map(|e| e.index()).collect();
        indices.sort();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_only_leading_indices_are_ranked() {
        // Series longer than index_count: the tail is ignored
        let doc = document(&[("m1", &[("A", &[2.0, 1.0, 99.0, 98.0][..])])]);

        let ranking = ranker(2).rank(&doc).unwrap();
        assert_eq!(ranking["A"].len(), 2);
        assert_eq!(ranking["A"][0].index(), 1);
    }

    #[test]
    fn test_output_covers_all_targets() {
        let doc = document(&[
            ("m1", &[("A", &[1.0][..]), ("B", &[2.0][..])]),
            ("m2", &[("A", &[3.0][..]), ("B", &[4.0][..])]),
        ]);

        let ranking = ranker(1).rank(&doc).unwrap();
        let targets: Vec<_> = ranking.keys().collect();
        assert_eq!(targets, vec!["A", "B"]);
        assert_eq!(ranking["B"][0].value(), 3.0);
    }

    #[test]
    fn test_full_width_ranking() {
        let series: Vec<f64> = (0..DEFAULT_INDEX_COUNT).rev().map(|i| i as f64).collect();
        let doc = document(&[("m1", &[("A", &series[..])])]);

        let ranking = PredictabilityRanker::new(RankerConfig::default())
            .rank(&doc)
            .unwrap();
        let entries = &ranking["A"];
        assert_eq!(entries.len(), DEFAULT_INDEX_COUNT);

        // Series was descending, so the ranking reverses it
        assert_eq!(entries[0].index(), DEFAULT_INDEX_COUNT - 1);
        assert_eq!(entries[0].value(), 0.0);
        for pair in entries.windows(2) {
            assert!(pair[0].value() <= pair[1].value());
        }
    }

    #[test]
    fn test_empty_document_is_an_error() {
        let err = ranker(1).rank(&ErrorDocument::new()).unwrap_err();
        assert!(format!("{}", err).contains("no models"));
    }

    #[test]
    fn test_missing_target_is_an_error() {
        let doc = document(&[
            ("m1", &[("A", &[1.0][..]), ("B", &[2.0][..])]),
            ("m2", &[("A", &[3.0][..])]),
        ]);

        let err = ranker(1).rank(&doc).unwrap_err();
        let message = format!("{}", err);
        assert!(message.contains("m2"));
        assert!(message.contains("'B'"));
    }

    #[test]
    fn test_extra_target_is_an_error() {
        let doc = document(&[
            ("m1", &[("A", &[1.0][..])]),
            ("m2", &[("A", &[2.0][..]), ("C", &[3.0][..])]),
        ]);

        let err = ranker(1).rank(&doc).unwrap_err();
        assert!(format!("{}", err).contains("'C'"));
    }

    #[test]
    fn test_short_series_is_an_error() {
        let doc = document(&[("m1", &[("A", &[1.0, 2.0][..])])]);

        let err = ranker(3).rank(&doc).unwrap_err();
        let message = format!("{}", err);
        assert!(message.contains("2 values"));
        assert!(message.contains("at least 3"));
    }

    #[test]
    fn test_negative_zero_input_keeps_index_order() {
        // Means accumulate from +0.0, so -0.0 input still produces a +0.0
        // mean and the zero tie resolves by index like any other tie.
        let doc = document(&[("m1", &[("A", &[-0.0, 0.0, -0.0][..])])]);

        let ranking = ranker(3).rank(&doc).unwrap();
        let indices: Vec<usize> = ranking["A"].iter().map(|e| e.index()).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_ranking_is_deterministic() {
        let doc = document(&[
            ("m1", &[("A", &[0.3, 0.1, 0.2][..])]),
            ("m2", &[("A", &[0.1, 0.3, 0.2][..])]),
        ]);

        let ranker = ranker(3);
        let first = serde_json::to_string(&ranker.rank(&doc).unwrap()).unwrap();
        let second = serde_json::to_string(&ranker.rank(&doc).unwrap()).unwrap();
        assert_eq!(first, second);
    }
}
