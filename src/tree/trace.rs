//! An injectable event sink observing the induction.
//! The events carry structural facts only;
//! whether a sink is attached or not never changes the induced tree.
use colored::Colorize;

use std::fmt;


/// Why the builder emitted a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafCause {
    /// Every row of the subset shares one target value.
    PureSubset,
    /// The subset contains no row;
    /// the leaf carries the mode label of the full sample.
    EmptySubset,
    /// No candidate feature remains;
    /// the leaf carries the default label of the parent.
    ExhaustedFeatures,
    /// No candidate feature yields a usable split;
    /// the leaf carries the majority label of the subset.
    NoUsableSplit,
}


impl fmt::Display for LeafCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PureSubset => "subset is pure",
            Self::EmptySubset => "subset is empty",
            Self::ExhaustedFeatures => "feature set is empty",
            Self::NoUsableSplit => "no usable split",
        };
        write!(f, "{name}")
    }
}


/// A structural fact emitted during induction.
#[derive(Debug, Clone, PartialEq)]
pub enum TraceEvent<'a> {
    /// The impurity of the current subset was computed.
    NodeImpurity {
        /// Depth of the current node.
        depth: usize,
        /// Number of rows in the current subset.
        n_sample: usize,
        /// Name of the impurity measure.
        measure: &'static str,
        /// The computed impurity.
        impurity: f64,
    },

    /// A candidate split of one feature was scored.
    CandidateEvaluated {
        /// Depth of the current node.
        depth: usize,
        /// The candidate feature.
        feature: &'a str,
        /// Human-readable description of the candidate partition.
        candidate: String,
        /// The candidate score
        /// (information gain or weighted Gini impurity).
        score: f64,
    },

    /// A feature and its partition were chosen for the current node.
    SplitChosen {
        /// Depth of the current node.
        depth: usize,
        /// The winning feature.
        feature: &'a str,
        /// The winning score
        /// (information gain or Gini impurity reduction).
        score: f64,
    },

    /// A leaf was emitted.
    LeafEmitted {
        /// Depth of the leaf.
        depth: usize,
        /// The class label of the leaf.
        label: &'a str,
        /// Why the builder stopped here.
        cause: LeafCause,
    },
}


/// A sink consuming [`TraceEvent`]s.
/// Implementors must not feed anything back into the induction;
/// the same inputs produce the same tree
/// regardless of the attached sink.
pub trait TraceSink {
    /// Consume one event.
    fn emit(&mut self, event: TraceEvent<'_>);
}


/// A [`TraceSink`] rendering an indented induction narrative
/// to standard output.
#[derive(Debug, Default)]
pub struct ConsoleTrace;


impl ConsoleTrace {
    /// Construct a new instance of [`ConsoleTrace`].
    pub fn new() -> Self {
        Self
    }
}


impl TraceSink for ConsoleTrace {
    fn emit(&mut self, event: TraceEvent<'_>) {
        match event {
            TraceEvent::NodeImpurity {
                depth, n_sample, measure, impurity,
            } => {
                let indent = "│  ".repeat(depth);
                println!(
                    "{indent}├──┬─ {} of {n_sample} rows: {impurity:.4}",
                    measure.bold(),
                );
            },
            TraceEvent::CandidateEvaluated {
                depth, feature, candidate, score,
            } => {
                let indent = "│  ".repeat(depth);
                println!(
                    "{indent}│  ├──── {feature} {candidate}: {score:.4}"
                );
            },
            TraceEvent::SplitChosen { depth, feature, score, } => {
                let indent = "│  ".repeat(depth);
                println!(
                    "{indent}│  └──── best feature: {} ({score:.4})",
                    feature.green().bold(),
                );
            },
            TraceEvent::LeafEmitted { depth, label, cause, } => {
                let indent = "│  ".repeat(depth);
                println!(
                    "{indent}└─── {cause}; label: {}",
                    label.cyan().bold(),
                );
            },
        }
    }
}


/// Internal handle threading an optional sink
/// through the recursion without branching at every call site.
pub(crate) struct Tracer<'a> {
    sink: Option<&'a mut dyn TraceSink>,
}


impl<'a> Tracer<'a> {
    pub(crate) fn new(sink: Option<&'a mut dyn TraceSink>) -> Self {
        Self { sink }
    }


    /// Returns `true` if a sink is attached.
    /// Callers may skip building event payloads otherwise.
    pub(crate) fn enabled(&self) -> bool {
        self.sink.is_some()
    }


    pub(crate) fn emit(&mut self, event: TraceEvent<'_>) {
        if let Some(sink) = self.sink.as_mut() {
            sink.emit(event);
        }
    }
}
