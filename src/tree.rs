//! The files in `tree/` directory define the induction algorithms,
//! the induced tree type, and its consumers.

/// Defines the impurity measures (entropy, Gini).
pub mod measure;

/// Defines the tree builder.
pub mod builder;

/// Defines rule extraction from an induced tree.
pub mod rules;

/// Defines the Graphviz dot export of an induced tree.
pub mod dot;

/// Defines the trace hook observing the induction.
pub mod trace;

mod criterion;
mod node;


pub use builder::TreeBuilder;
pub use criterion::Criterion;
pub use node::{
    DecisionTree,
    Node,
    BranchNode,
    LeafNode,
    Predicate,
};
pub use rules::Rule;
pub use trace::{
    TraceSink,
    TraceEvent,
    LeafCause,
    ConsoleTrace,
};
