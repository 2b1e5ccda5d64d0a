//! Impurity measures of a label multiset.
//! Both functions are pure and deterministic;
//! the iteration order of distinct labels does not affect
//! the numeric result.

use std::collections::BTreeMap;

use crate::error::TreeError;


/// Count the occurrences of each distinct label.
/// A `BTreeMap` keeps the distinct labels in sorted order,
/// which fixes the tie winner of [`mode_label`].
pub(crate) fn label_counts<S>(labels: &[S]) -> BTreeMap<&str, usize>
    where S: AsRef<str>,
{
    let mut counts = BTreeMap::new();
    for label in labels {
        *counts.entry(label.as_ref()).or_insert(0) += 1;
    }
    counts
}


/// Returns the entropy (in bits) of the given label multiset.
/// The result lies in `[0, log2(k)]` for `k` distinct labels.
///
/// Labels with zero count never enter the count map,
/// so `log2(0)` is never evaluated.
///
/// # Errors
/// Returns [`TreeError::EmptyInput`] if `labels` is empty.
pub fn entropy<S>(labels: &[S]) -> Result<f64, TreeError>
    where S: AsRef<str>,
{
    if labels.is_empty() {
        return Err(TreeError::EmptyInput);
    }

    let total = labels.len() as f64;
    let value = label_counts(labels)
        .values()
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum::<f64>();

    Ok(value)
}


/// Returns the Gini impurity of the given label multiset,
/// `1 - Σ p²` over the distinct label proportions.
/// The result lies in `[0, 1 - 1/k]` for `k` distinct labels.
///
/// # Errors
/// Returns [`TreeError::EmptyInput`] if `labels` is empty.
pub fn gini<S>(labels: &[S]) -> Result<f64, TreeError>
    where S: AsRef<str>,
{
    if labels.is_empty() {
        return Err(TreeError::EmptyInput);
    }

    let total = labels.len() as f64;
    let correct = label_counts(labels)
        .values()
        .map(|&count| (count as f64 / total).powi(2))
        .sum::<f64>();

    Ok(1.0 - correct)
}


/// Returns the most frequent label.
/// Ties among equally frequent labels are broken by
/// the first label in sorted order.
/// Returns `None` if `labels` is empty.
pub(crate) fn mode_label<S>(labels: &[S]) -> Option<String>
    where S: AsRef<str>,
{
    let counts = label_counts(labels);

    let mut best: Option<(&str, usize)> = None;
    for (label, count) in counts {
        // Strict comparison keeps the first label in sorted order
        // when several labels share the maximal count.
        match best {
            Some((_, c)) if count <= c => {},
            _ => { best = Some((label, count)); },
        }
    }

    best.map(|(label, _)| label.to_string())
}
