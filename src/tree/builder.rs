//! Defines the recursive induction loop.
use crate::error::TreeError;
use crate::sample::Sample;

use super::criterion::{Criterion, Split};
use super::measure::mode_label;
use super::node::{DecisionTree, Node};
use super::trace::{LeafCause, TraceEvent, TraceSink, Tracer};


/// A struct that builds a [`DecisionTree`] from a [`Sample`].
/// `TreeBuilder` keeps the induction parameters:
/// the splitting criterion, the candidate features,
/// and an optional trace sink.
///
/// # Example
///
/// ```no_run
/// use arbor::prelude::*;
///
/// # fn main() -> Result<(), TreeError> {
/// # let sample: Sample = todo!();
/// let tree = TreeBuilder::new()
///     .criterion(Criterion::InformationGain)
///     .build(&sample)?;
/// # Ok(())
/// # }
/// ```
pub struct TreeBuilder<'a> {
    criterion: Criterion,
    features: Option<Vec<String>>,
    trace: Option<&'a mut dyn TraceSink>,
}


impl<'a> TreeBuilder<'a> {
    /// Construct a new instance of [`TreeBuilder`].
    /// By default, the criterion is
    /// [`Criterion::InformationGain`],
    /// the candidate features are all non-target columns,
    /// and no trace sink is attached.
    pub fn new() -> Self {
        Self {
            criterion: Criterion::InformationGain,
            features: None,
            trace: None,
        }
    }


    /// Set the node splitting rule.
    /// Default value is `Criterion::InformationGain`.
    /// See [`Criterion`] for other rules.
    #[inline]
    pub fn criterion(mut self, criterion: Criterion) -> Self {
        self.criterion = criterion;
        self
    }


    /// Restrict the candidate features to the given column names.
    /// By default, every non-target column is a candidate.
    pub fn features<I>(mut self, features: I) -> Self
        where I: IntoIterator,
              I::Item: ToString,
    {
        let features = features.into_iter()
            .map(|f| f.to_string())
            .collect();
        self.features = Some(features);
        self
    }


    /// Attach a trace sink observing the induction.
    /// The sink receives structural facts only;
    /// the induced tree does not depend on it.
    pub fn trace(mut self, sink: &'a mut dyn TraceSink) -> Self {
        self.trace = Some(sink);
        self
    }


    /// Induce a decision tree over `sample`.
    /// This method consumes `self`.
    ///
    /// # Errors
    /// Returns [`TreeError::UnknownColumn`] if a requested feature
    /// does not exist, and [`TreeError::EmptyInput`] if `sample`
    /// has no rows.
    pub fn build(self, sample: &Sample) -> Result<DecisionTree, TreeError> {
        let features = match self.features {
            Some(features) => {
                for name in &features {
                    sample.feature(name)?;
                }
                features
            },
            None => {
                sample.feature_names()
                    .into_iter()
                    .map(|name| name.to_string())
                    .collect()
            },
        };

        // The mode label of the full sample classifies
        // rows that reach an empty branch.
        let full_mode = mode_label(sample.target())
            .ok_or(TreeError::EmptyInput)?;

        let indices = (0..sample.shape().0).collect::<Vec<_>>();
        let mut tracer = Tracer::new(self.trace);

        let root = grow(
            self.criterion,
            sample,
            indices,
            features,
            full_mode.clone(),
            &full_mode,
            0,
            &mut tracer,
        )?;

        Ok(DecisionTree::from(root))
    }
}


impl Default for TreeBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}


/// Grow one node over the subset of rows in `indices`.
/// Each recursive call removes the winning feature
/// from the candidate set, so the recursion depth is bounded by
/// the initial feature count.
#[allow(clippy::too_many_arguments)]
fn grow(
    criterion: Criterion,
    sample: &Sample,
    indices: Vec<usize>,
    features: Vec<String>,
    default_label: String,
    full_mode: &str,
    depth: usize,
    tracer: &mut Tracer<'_>,
) -> Result<Node, TreeError>
{
    // If every row shares one target value, return that value.
    if let Some(label) = single_label(sample, &indices) {
        tracer.emit(TraceEvent::LeafEmitted {
            depth, label, cause: LeafCause::PureSubset,
        });
        return Ok(Node::leaf(label));
    }

    // If the subset is empty,
    // return the mode label of the full sample.
    if indices.is_empty() {
        tracer.emit(TraceEvent::LeafEmitted {
            depth, label: full_mode, cause: LeafCause::EmptySubset,
        });
        return Ok(Node::leaf(full_mode));
    }

    // If no candidate feature remains,
    // return the default label inherited from the parent.
    if features.is_empty() {
        tracer.emit(TraceEvent::LeafEmitted {
            depth,
            label: &default_label,
            cause: LeafCause::ExhaustedFeatures,
        });
        return Ok(Node::leaf(&default_label));
    }

    // The majority label of this subset becomes
    // the default label of the children.
    let labels = subset_labels(sample, &indices);
    let majority = mode_label(&labels).ok_or(TreeError::EmptyInput)?;

    let split = match criterion
        .best_split(sample, &indices, &features, depth, tracer)
    {
        Ok(split) => split,
        Err(TreeError::NoUsableSplit) => {
            tracer.emit(TraceEvent::LeafEmitted {
                depth,
                label: &majority,
                cause: LeafCause::NoUsableSplit,
            });
            return Ok(Node::leaf(majority));
        },
        Err(e) => return Err(e),
    };

    let Split { feature, partitions, .. } = split;

    // The winning feature is consumed for every descendant,
    // even under binary splits where a feature could in principle
    // be revisited with a different partition.
    let rest = features.into_iter()
        .filter(|name| *name != feature)
        .collect::<Vec<_>>();

    let mut branches = Vec::with_capacity(partitions.len());
    for (predicate, rows) in partitions {
        let child = if rows.is_empty() {
            tracer.emit(TraceEvent::LeafEmitted {
                depth: depth + 1,
                label: full_mode,
                cause: LeafCause::EmptySubset,
            });
            Node::leaf(full_mode)
        } else if let Some(label) = single_label(sample, &rows) {
            // A pure branch becomes a leaf without a recursive call.
            tracer.emit(TraceEvent::LeafEmitted {
                depth: depth + 1,
                label,
                cause: LeafCause::PureSubset,
            });
            Node::leaf(label)
        } else {
            grow(
                criterion,
                sample,
                rows,
                rest.clone(),
                majority.clone(),
                full_mode,
                depth + 1,
                tracer,
            )?
        };
        branches.push((predicate, child));
    }

    Ok(Node::branch(feature, branches))
}


fn subset_labels<'a>(sample: &'a Sample, indices: &[usize]) -> Vec<&'a str> {
    let target = sample.target();
    indices.iter()
        .map(|&i| target[i].as_str())
        .collect()
}


/// Returns the common target value of the subset, if any.
/// An empty subset has no common value.
fn single_label<'a>(sample: &'a Sample, indices: &[usize])
    -> Option<&'a str>
{
    let target = sample.target();
    let first = target[*indices.first()?].as_str();
    indices.iter()
        .all(|&i| target[i] == first)
        .then_some(first)
}
