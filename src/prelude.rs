//! Exports the standard types for decision tree induction.
//!
pub use crate::sample::{
    // Dataset abstraction ----------------------
    Sample,
    SampleReader,

    Feature,
    Value,
};


pub use crate::tree::{
    // Induction --------------------------------
    TreeBuilder,
    Criterion,


    // The induced tree and its parts -----------
    DecisionTree,
    Node,
    Predicate,


    // Rule extraction --------------------------
    Rule,


    // Trace hooks ------------------------------
    TraceSink,
    TraceEvent,
    LeafCause,
    ConsoleTrace,
};


pub use crate::error::TreeError;
