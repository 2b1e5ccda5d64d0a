//! Defines the representation of the induced decision tree.
use serde::{Serialize, Deserialize};

use std::fmt;
use std::path::Path;
use std::fs::File;
use std::io::prelude::*;

use rayon::prelude::*;

use crate::sample::{Sample, Value};


/// The predicate attached to a branch of an internal node.
/// A row follows the branch whose predicate its feature value satisfies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    /// The feature value equals the given categorical value.
    Equals(String),

    /// The feature value is a member of the given set
    /// of categorical values.
    In(Vec<String>),

    /// The feature value equals the given numeric value.
    /// Produced by the experimental multiway split
    /// over a numeric feature.
    EqualsNumeric(f64),

    /// The feature value is at most the given threshold.
    Le(f64),

    /// The feature value exceeds the given threshold.
    Gt(f64),
}


impl Predicate {
    /// Returns `true` if `value` satisfies this predicate.
    /// A value of the wrong kind satisfies no predicate.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Equals(v), Value::Categorical(x)) => v == x,
            (Self::In(set), Value::Categorical(x)) => {
                set.iter().any(|v| v == x)
            },
            (Self::EqualsNumeric(v), Value::Numeric(x)) => v == x,
            (Self::Le(t), Value::Numeric(x)) => x <= t,
            (Self::Gt(t), Value::Numeric(x)) => x > t,
            _ => false,
        }
    }
}


impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equals(v) => write!(f, "= {v}"),
            Self::In(set) => write!(f, "in {{{}}}", set.join(", ")),
            Self::EqualsNumeric(v) => write!(f, "= {v}"),
            Self::Le(t) => write!(f, "<= {t}"),
            Self::Gt(t) => write!(f, "> {t}"),
        }
    }
}


/// Enumeration of `BranchNode` and `LeafNode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// An internal node testing one feature.
    Branch(BranchNode),


    /// A node that have no child.
    Leaf(LeafNode),
}


/// Represents the internal nodes of the decision tree.
/// The branches are kept as an ordered list of
/// predicate/subtree pairs; the order is the one produced by
/// the split search and is preserved by rule extraction and
/// dot export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchNode {
    pub(crate) feature: String,
    pub(crate) branches: Vec<(Predicate, Node)>,
}


/// Represents the leaf nodes of the decision tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafNode {
    pub(crate) label: String,
}


impl Node {
    pub(crate) fn leaf<T: ToString>(label: T) -> Self {
        Self::Leaf(LeafNode { label: label.to_string(), })
    }


    pub(crate) fn branch(
        feature: String,
        branches: Vec<(Predicate, Node)>,
    ) -> Self
    {
        Self::Branch(BranchNode { feature, branches, })
    }


    /// Returns `true` if this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }


    /// The class label of this node.
    /// Returns `None` for an internal node.
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Leaf(leaf) => Some(&leaf.label),
            Self::Branch(_) => None,
        }
    }


    /// The feature tested at this node.
    /// Returns `None` for a leaf.
    pub fn feature(&self) -> Option<&str> {
        match self {
            Self::Branch(branch) => Some(&branch.feature),
            Self::Leaf(_) => None,
        }
    }


    /// The ordered branches of this node.
    /// Returns `None` for a leaf.
    pub fn branches(&self) -> Option<&[(Predicate, Node)]> {
        match self {
            Self::Branch(branch) => Some(&branch.branches[..]),
            Self::Leaf(_) => None,
        }
    }


    /// The number of leaves under this node.
    pub fn n_leaves(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Branch(branch) => {
                branch.branches.iter()
                    .map(|(_, child)| child.n_leaves())
                    .sum()
            },
        }
    }


    /// The length of the longest path from this node to a leaf.
    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf(_) => 0,
            Self::Branch(branch) => {
                1 + branch.branches.iter()
                    .map(|(_, child)| child.depth())
                    .max()
                    .unwrap_or(0)
            },
        }
    }


    fn classify(&self, sample: &Sample, row: usize) -> Option<&str> {
        match self {
            Self::Leaf(leaf) => Some(&leaf.label),
            Self::Branch(branch) => {
                let value = sample.feature(&branch.feature).ok()?.at(row);
                branch.branches.iter()
                    .find(|(predicate, _)| predicate.matches(&value))
                    .and_then(|(_, child)| child.classify(sample, row))
            },
        }
    }
}


/// The decision tree induced by [`TreeBuilder`](crate::TreeBuilder).
/// This struct is just a wrapper of `Node`.
/// It is immutable after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    root: Node,
}


impl From<Node> for DecisionTree {
    #[inline]
    fn from(root: Node) -> Self {
        Self { root }
    }
}


impl DecisionTree {
    /// Returns the root node of this tree.
    pub fn root(&self) -> &Node {
        &self.root
    }


    /// The number of leaves of this tree.
    pub fn n_leaves(&self) -> usize {
        self.root.n_leaves()
    }


    /// The length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }


    /// Classify the `row`-th row of `sample` by walking the tree.
    /// Returns `None` if a row carries a value
    /// matched by no branch of the node it reaches.
    pub fn classify(&self, sample: &Sample, row: usize) -> Option<&str> {
        self.root.classify(sample, row)
    }


    /// Classify every row of `sample`.
    pub fn classify_all<'a>(&'a self, sample: &Sample)
        -> Vec<Option<&'a str>>
    {
        let n_sample = sample.shape().0;
        (0..n_sample).into_par_iter()
            .map(|row| self.classify(sample, row))
            .collect()
    }


    /// Serialize this tree to a JSON string.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }


    /// Deserialize a tree from a JSON string.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }


    /// Write the JSON serialization of this tree to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let json = self.to_json()
            .map_err(std::io::Error::from)?;
        let mut f = File::create(path)?;
        f.write_all(json.as_bytes())?;
        Ok(())
    }
}
