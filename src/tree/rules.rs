//! Conjunctive classification rules extracted from an induced tree.
use serde::{Serialize, Deserialize};

use std::fmt;

use crate::sample::Sample;

use super::node::{DecisionTree, Node, Predicate};


/// One conjunctive classification rule,
/// corresponding to one root-to-leaf path:
/// `IF f1 = v1 AND f2 = v2 ... THEN target = label`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    conditions: Vec<(String, Predicate)>,
    target: String,
    label: String,
}


impl Rule {
    /// The conditions of this rule, in root-to-leaf order.
    pub fn conditions(&self) -> &[(String, Predicate)] {
        &self.conditions[..]
    }


    /// The predicted class label.
    pub fn label(&self) -> &str {
        &self.label
    }


    /// The length of the conjunction,
    /// which equals the depth of the corresponding leaf.
    pub fn len(&self) -> usize {
        self.conditions.len()
    }


    /// Returns `true` if this rule has no condition,
    /// i.e. the tree is a single leaf.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }


    /// Returns `true` if the `row`-th row of `sample`
    /// satisfies every condition of this rule.
    pub fn matches(&self, sample: &Sample, row: usize) -> bool {
        self.conditions.iter()
            .all(|(name, predicate)| {
                sample.feature(name)
                    .map(|feat| predicate.matches(&feat.at(row)))
                    .unwrap_or(false)
            })
    }
}


impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let conjunction = if self.conditions.is_empty() {
            String::from("true")
        } else {
            self.conditions.iter()
                .map(|(name, predicate)| condition_string(name, predicate))
                .collect::<Vec<_>>()
                .join(" AND ")
        };

        write!(
            f,
            "IF {conjunction} THEN {target}='{label}'",
            target = self.target,
            label = self.label,
        )
    }
}


fn condition_string(name: &str, predicate: &Predicate) -> String {
    match predicate {
        Predicate::Equals(v) => format!("{name}='{v}'"),
        Predicate::In(set) => format!("{name} in {{{}}}", set.join(", ")),
        Predicate::EqualsNumeric(v) => format!("{name}={v}"),
        Predicate::Le(t) => format!("{name} <= {t}"),
        Predicate::Gt(t) => format!("{name} > {t}"),
    }
}


impl DecisionTree {
    /// Extract one rule per leaf,
    /// walking the branches in left-to-right order.
    /// `target` is the name of the target column,
    /// used in the rendered `THEN` part.
    pub fn rules<S: AsRef<str>>(&self, target: S) -> Vec<Rule> {
        let target = target.as_ref();
        let mut rules = Vec::with_capacity(self.n_leaves());
        let mut path = Vec::new();
        collect_rules(self.root(), target, &mut path, &mut rules);
        rules
    }
}


fn collect_rules(
    node: &Node,
    target: &str,
    path: &mut Vec<(String, Predicate)>,
    rules: &mut Vec<Rule>,
)
{
    match node {
        Node::Leaf(leaf) => {
            rules.push(Rule {
                conditions: path.clone(),
                target: target.to_string(),
                label: leaf.label.clone(),
            });
        },
        Node::Branch(branch) => {
            for (predicate, child) in &branch.branches {
                path.push((branch.feature.clone(), predicate.clone()));
                collect_rules(child, target, path, rules);
                path.pop();
            }
        },
    }
}
