//! Defines the error type shared by the sample and tree modules.
use thiserror::Error;


/// Errors arising while reading a sample or inducing a tree.
#[derive(Debug, Error)]
pub enum TreeError {
    /// An impurity measure was called on an empty label set.
    /// The induction loop never produces this case by itself
    /// since pure and empty subsets become leaves before
    /// any measure is evaluated.
    #[error("cannot compute an impurity measure of an empty label set")]
    EmptyInput,


    /// The requested column does not exist in the sample.
    #[error("the column named `{0}` does not exist in the sample")]
    UnknownColumn(String),


    /// No candidate feature yields a usable split.
    /// [`TreeBuilder`](crate::TreeBuilder) recovers from this error
    /// by emitting a majority-label leaf; it never reaches the caller.
    #[error("no candidate feature yields a usable split")]
    NoUsableSplit,


    /// An I/O failure while reading a dataset file.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
