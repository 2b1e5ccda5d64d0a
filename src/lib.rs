#![warn(missing_docs)]

//!
//! A crate that induces decision tree classifiers
//! from labeled tabular data.
//!
//! Two classic splitting criteria are provided.
//!
//! - Information gain (ID3)
//!     Each internal node splits multiway,
//!     one branch per distinct value of the chosen feature.
//!     The feature maximizing the entropy reduction is chosen.
//!
//!
//! - Gini impurity (CART-style binary splits)
//!     Each internal node splits a categorical feature
//!     into a subset of its values and the complement,
//!     found by exhaustive enumeration of the binary partitions.
//!     Numeric features are split at midpoint thresholds.
//!
//! The induced [`DecisionTree`] can be turned into
//! conjunctive classification rules or a Graphviz dot description.

/// Defines the error type of this crate.
pub mod error;
/// Defines [`Sample`], the tabular dataset abstraction.
pub mod sample;
/// Defines the tree induction algorithms and the tree type.
pub mod tree;
/// Exports the commonly used items of this crate.
pub mod prelude;


pub use error::TreeError;

pub use sample::{
    Sample,
    SampleReader,
    Feature,
    Value,
};

pub use tree::{
    TreeBuilder,
    Criterion,
    DecisionTree,
    Node,
    Predicate,
    Rule,
    TraceSink,
    TraceEvent,
    LeafCause,
    ConsoleTrace,
};

pub use tree::measure::{entropy, gini};
