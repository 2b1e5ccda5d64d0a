//! Splitting criteria and the per-node split search.

use std::fmt;

use crate::error::TreeError;
use crate::sample::{
    Sample,
    Feature,
    CategoricalFeature,
    NumericFeature,
};

use super::measure::{entropy, gini};
use super::node::Predicate;
use super::trace::{TraceEvent, Tracer};


/// Splitting criteria for growing the decision tree.
/// * `Criterion::InformationGain` maximizes the entropy reduction
///     of a multiway partition (ID3).
/// * `Criterion::Gini` minimizes the weighted Gini impurity
///     of a binary partition (CART-style).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    /// Entropy-based information gain with multiway splits.
    InformationGain,
    /// Gini impurity with exhaustive binary splits.
    Gini,
}


impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InformationGain => "Information Gain (ID3)",
            Self::Gini => "Gini index (binary splits)",
        };

        write!(f, "{name}")
    }
}


/// The winning split of one node:
/// the chosen feature, its score
/// (information gain or impurity reduction),
/// and the ordered row partitions with their branch predicates.
pub(crate) struct Split {
    pub(crate) feature: String,
    pub(crate) score: f64,
    pub(crate) partitions: Vec<(Predicate, Vec<usize>)>,
}


impl Criterion {
    /// Returns the best split over `features`
    /// for the subset of rows in `indices`.
    ///
    /// Ties among equally scored features are broken by
    /// the first occurrence in the declared feature order;
    /// ties among candidate partitions of one feature by
    /// the first enumerated candidate.
    ///
    /// # Errors
    /// Returns [`TreeError::NoUsableSplit`] if no feature
    /// yields a usable split.
    pub(crate) fn best_split(
        &self,
        sample: &Sample,
        indices: &[usize],
        features: &[String],
        depth: usize,
        tracer: &mut Tracer<'_>,
    ) -> Result<Split, TreeError>
    {
        match self {
            Self::InformationGain => {
                split_by_information_gain(sample, indices, features, depth, tracer)
            },
            Self::Gini => {
                split_by_gini_reduction(sample, indices, features, depth, tracer)
            },
        }
    }
}


fn subset_labels<'a>(sample: &'a Sample, indices: &[usize]) -> Vec<&'a str> {
    let target = sample.target();
    indices.iter()
        .map(|&i| target[i].as_str())
        .collect()
}


/// Score every feature by the entropy reduction of its
/// multiway partition and return the best one.
/// The number of branches equals the number of distinct values
/// the feature takes over the subset,
/// for categorical and numeric features alike.
fn split_by_information_gain(
    sample: &Sample,
    indices: &[usize],
    features: &[String],
    depth: usize,
    tracer: &mut Tracer<'_>,
) -> Result<Split, TreeError>
{
    let parent = entropy(&subset_labels(sample, indices))?;
    tracer.emit(TraceEvent::NodeImpurity {
        depth,
        n_sample: indices.len(),
        measure: "entropy",
        impurity: parent,
    });

    let n = indices.len() as f64;
    let mut best: Option<Split> = None;

    for name in features {
        let partitions = match sample.feature(name)? {
            Feature::Categorical(feat) => {
                multiway_partition(feat, indices)
            },
            Feature::Numeric(feat) => {
                numeric_multiway_partition(feat, indices)
            },
        };

        let mut weighted = 0.0;
        for (_, rows) in &partitions {
            // Each partition of an observed value holds a row;
            // only a NaN branch can be empty,
            // since NaN matches nothing, itself included.
            if rows.is_empty() { continue; }
            weighted += rows.len() as f64 / n
                * entropy(&subset_labels(sample, rows))?;
        }
        let gain = parent - weighted;

        if tracer.enabled() {
            tracer.emit(TraceEvent::CandidateEvaluated {
                depth,
                feature: name,
                candidate: format!("multiway ({} branches)", partitions.len()),
                score: gain,
            });
        }

        // Strict comparison keeps the first feature
        // in declared order on ties.
        if best.as_ref().map_or(true, |b| gain > b.score) {
            best = Some(Split {
                feature: name.clone(),
                score: gain,
                partitions,
            });
        }
    }

    if let Some(split) = &best {
        tracer.emit(TraceEvent::SplitChosen {
            depth,
            feature: &split.feature,
            score: split.score,
        });
    }

    best.ok_or(TreeError::NoUsableSplit)
}


/// Score every feature by the Gini impurity reduction of its
/// best binary partition and return the best one.
/// Only strictly positive reductions are usable.
fn split_by_gini_reduction(
    sample: &Sample,
    indices: &[usize],
    features: &[String],
    depth: usize,
    tracer: &mut Tracer<'_>,
) -> Result<Split, TreeError>
{
    let parent = gini(&subset_labels(sample, indices))?;
    tracer.emit(TraceEvent::NodeImpurity {
        depth,
        n_sample: indices.len(),
        measure: "gini",
        impurity: parent,
    });

    let n = indices.len() as f64;
    let mut best: Option<Split> = None;

    for name in features {
        let candidates = match sample.feature(name)? {
            Feature::Categorical(feat) => binary_partitions(feat, indices),
            Feature::Numeric(feat) => threshold_partitions(feat, indices),
        };

        // The best candidate of this feature,
        // by minimal weighted Gini impurity.
        // Strict comparison keeps the first enumerated candidate on ties.
        let mut feature_best: Option<(f64, Vec<(Predicate, Vec<usize>)>)> =
            None;

        for partitions in candidates {
            let mut weighted = 0.0;
            for (_, rows) in &partitions {
                if rows.is_empty() { continue; }
                weighted += rows.len() as f64 / n
                    * gini(&subset_labels(sample, rows))?;
            }

            if tracer.enabled() {
                let candidate = partitions.iter()
                    .map(|(predicate, _)| predicate.to_string())
                    .collect::<Vec<_>>()
                    .join(" vs. ");
                tracer.emit(TraceEvent::CandidateEvaluated {
                    depth,
                    feature: name,
                    candidate,
                    score: weighted,
                });
            }

            if feature_best.as_ref().map_or(true, |(w, _)| weighted < *w) {
                feature_best = Some((weighted, partitions));
            }
        }

        let Some((weighted, partitions)) = feature_best else { continue; };
        let reduction = parent - weighted;

        // A split that does not reduce the impurity is unusable.
        // Strict comparison keeps the first feature
        // in declared order on ties.
        if reduction > 0.0
            && best.as_ref().map_or(true, |b| reduction > b.score)
        {
            best = Some(Split {
                feature: name.clone(),
                score: reduction,
                partitions,
            });
        }
    }

    if let Some(split) = &best {
        tracer.emit(TraceEvent::SplitChosen {
            depth,
            feature: &split.feature,
            score: split.score,
        });
    }

    best.ok_or(TreeError::NoUsableSplit)
}


/// One branch per distinct value of `feat` over the subset,
/// in ascending value order.
fn multiway_partition(feat: &CategoricalFeature, indices: &[usize])
    -> Vec<(Predicate, Vec<usize>)>
{
    feat.distinct(indices)
        .into_iter()
        .map(|value| {
            let rows = indices.iter()
                .copied()
                .filter(|&i| feat.sample[i] == value)
                .collect::<Vec<_>>();
            (Predicate::Equals(value.to_string()), rows)
        })
        .collect()
}


/// Every binary partition of the distinct values of `feat`
/// into a subset and its complement.
/// Complementary pairs count once, so a domain of `m` values
/// yields `2^(m-1) - 1` candidates.
/// Candidates are enumerated by ascending subset size,
/// lexicographically within one size.
///
/// The search is exhaustive and therefore exponential in `m`;
/// it is only meant for low-cardinality categorical domains.
fn binary_partitions(feat: &CategoricalFeature, indices: &[usize])
    -> Vec<Vec<(Predicate, Vec<usize>)>>
{
    let values = feat.distinct(indices);
    let m = values.len();
    if m < 2 {
        return Vec::new();
    }

    let mut candidates = Vec::new();
    for k in 1..m {
        // Subsets larger than their complement repeat
        // earlier candidates with the sides swapped.
        if k > m - k {
            break;
        }

        for combo in index_combinations(m, k) {
            // For even splits, keep the representative
            // containing the first value.
            if k == m - k && !combo.contains(&0) {
                continue;
            }

            let in_values = combo.iter()
                .map(|&j| values[j].to_string())
                .collect::<Vec<_>>();
            let out_values = (0..m)
                .filter(|j| !combo.contains(j))
                .map(|j| values[j].to_string())
                .collect::<Vec<_>>();

            let rows_in = indices.iter()
                .copied()
                .filter(|&i| in_values.iter().any(|v| *v == feat.sample[i]))
                .collect::<Vec<_>>();
            let rows_out = indices.iter()
                .copied()
                .filter(|&i| out_values.iter().any(|v| *v == feat.sample[i]))
                .collect::<Vec<_>>();

            candidates.push(vec![
                (Predicate::In(in_values), rows_in),
                (Predicate::In(out_values), rows_out),
            ]);
        }
    }

    candidates
}


/// Experimental: one branch per distinct numeric value of `feat`
/// over the subset, in ascending value order.
/// Equality branches over floating point values classify well
/// only when the classified rows carry values
/// observed during induction.
fn numeric_multiway_partition(feat: &NumericFeature, indices: &[usize])
    -> Vec<(Predicate, Vec<usize>)>
{
    feat.distinct(indices)
        .into_iter()
        .map(|value| {
            let rows = indices.iter()
                .copied()
                .filter(|&i| feat.sample[i] == value)
                .collect::<Vec<_>>();
            (Predicate::EqualsNumeric(value), rows)
        })
        .collect()
}


/// Experimental: threshold partitions of a numeric feature at the
/// midpoints between consecutive distinct values.
/// This path has no test coverage on real data.
fn threshold_partitions(feat: &NumericFeature, indices: &[usize])
    -> Vec<Vec<(Predicate, Vec<usize>)>>
{
    let values = feat.distinct(indices);

    values.windows(2)
        .map(|pair| {
            let threshold = (pair[0] + pair[1]) / 2.0;
            let rows_le = indices.iter()
                .copied()
                .filter(|&i| feat.sample[i] <= threshold)
                .collect::<Vec<_>>();
            let rows_gt = indices.iter()
                .copied()
                .filter(|&i| feat.sample[i] > threshold)
                .collect::<Vec<_>>();

            vec![
                (Predicate::Le(threshold), rows_le),
                (Predicate::Gt(threshold), rows_gt),
            ]
        })
        .collect()
}


/// All `k`-element subsets of `0..m` in lexicographic order.
fn index_combinations(m: usize, k: usize) -> Vec<Vec<usize>> {
    let mut out = Vec::new();
    let mut combo = (0..k).collect::<Vec<_>>();

    loop {
        out.push(combo.clone());

        // Advance to the next combination.
        let mut i = k;
        while i > 0 && combo[i - 1] == i - 1 + m - k {
            i -= 1;
        }
        if i == 0 {
            break;
        }
        combo[i - 1] += 1;
        for j in i..k {
            combo[j] = combo[j - 1] + 1;
        }
    }

    out
}
