//! Cross-pair summary statistics.
//!
//! Collapses each (source, target) error series to two scalars used for
//! at-a-glance comparison across models:
//! - geometric mean of the series: `exp(mean of ln x)`
//! - differential entropy in nats, treating each value as the variance of a
//!   Gaussian: `sum of ln sqrt(2*pi*e*x)`
//!
//! Pairs where the source name equals the target name are skipped; a model
//! predicting itself says nothing about cross-model agreement.

use std::collections::BTreeMap;
use std::f64::consts::{E, PI};

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::types::ErrorDocument;

/// Scalar summaries of one (source, target) series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairSummary {
    pub geometric_mean: f64,
    pub differential_entropy: f64,
}

/// source -> target -> summary, diagonal omitted.
pub type SummaryMatrix = BTreeMap<String, BTreeMap<String, PairSummary>>;

/// Summarize every (source, target) pair in the document.
pub fn summarize(document: &ErrorDocument) -> Result<SummaryMatrix> {
    if document.is_empty() {
        bail!("input document contains no models");
    }

    let mut matrix = SummaryMatrix::new();
    for (source, records) in document {
        let mut row = BTreeMap::new();
        for (target, record) in records {
            if source == target {
                continue;
            }
            let summary = summarize_series(&record.series).map_err(|e| {
                e.context(format!("summarizing source '{}', target '{}'", source, target))
            })?;
            row.insert(target.clone(), summary);
        }
        matrix.insert(source.clone(), row);
    }

    Ok(matrix)
}

fn summarize_series(series: &[f64]) -> Result<PairSummary> {
    if series.is_empty() {
        bail!("series is empty");
    }

    let count = series.len() as f64;
    let log_sum: f64 = series.iter().map(|value| value.ln()).sum();
    let entropy: f64 = series
        .iter()
        .map(|value| (value * 2.0 * PI * E).sqrt().ln())
        .sum();

    Ok(PairSummary {
        geometric_mean: (log_sum / count).exp(),
        differential_entropy: entropy,
    })
}
