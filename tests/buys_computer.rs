// The classic 14-row "buys computer" dataset:
// categorical features `age, income, student, credit_rating`,
// binary target `buys_computer` in {yes, no}.
use polars::prelude::*;

use arbor::prelude::*;
use arbor::Node;


fn buys_computer() -> Sample {
    let age = Series::new("age", [
        "youth", "youth", "middle_aged", "senior", "senior",
        "senior", "middle_aged", "youth", "youth", "senior",
        "youth", "middle_aged", "middle_aged", "senior",
    ]);
    let income = Series::new("income", [
        "high", "high", "high", "medium", "low",
        "low", "low", "medium", "low", "medium",
        "medium", "medium", "high", "medium",
    ]);
    let student = Series::new("student", [
        "no", "no", "no", "no", "yes",
        "yes", "yes", "no", "yes", "yes",
        "yes", "no", "yes", "no",
    ]);
    let credit_rating = Series::new("credit_rating", [
        "fair", "excellent", "fair", "fair", "fair",
        "excellent", "excellent", "fair", "fair", "fair",
        "excellent", "excellent", "fair", "excellent",
    ]);
    let target = Series::new("buys_computer", [
        "no", "no", "yes", "yes", "yes",
        "no", "yes", "no", "yes", "yes",
        "yes", "yes", "yes", "no",
    ]);

    let df = DataFrame::new(vec![age, income, student, credit_rating])
        .unwrap();
    Sample::from_dataframe(df, target).unwrap()
}


/// A sink recording every evaluated candidate as
/// `(depth, feature, description)`.
#[derive(Default)]
struct Recorder {
    candidates: Vec<(usize, String, String)>,
}


impl TraceSink for Recorder {
    fn emit(&mut self, event: TraceEvent<'_>) {
        if let TraceEvent::CandidateEvaluated {
            depth, feature, candidate, ..
        } = event
        {
            self.candidates.push((depth, feature.to_string(), candidate));
        }
    }
}


#[test]
fn id3_root_splits_on_age() {
    let sample = buys_computer();
    let tree = TreeBuilder::new()
        .criterion(Criterion::InformationGain)
        .build(&sample)
        .unwrap();

    let root = tree.root();
    assert_eq!(root.feature(), Some("age"));

    // One branch per distinct value of `age`.
    let branches = root.branches().unwrap();
    assert_eq!(branches.len(), 3);

    // `age = middle_aged` is pure and resolves directly to a leaf.
    let (_, middle_aged) = branches.iter()
        .find(|(p, _)| *p == Predicate::Equals("middle_aged".into()))
        .unwrap();
    assert!(middle_aged.is_leaf());
    assert_eq!(middle_aged.label(), Some("yes"));
}


fn check_paths(
    node: &Node,
    mut path: Vec<String>,
    max_len: usize,
    domain: &[String],
)
{
    match node {
        Node::Leaf(_) => {
            let label = node.label().unwrap();
            assert!(path.len() <= max_len);
            assert!(domain.iter().any(|c| c == label));
        },
        Node::Branch(_) => {
            let feature = node.feature().unwrap().to_string();
            // Each feature appears at most once on a path.
            assert!(!path.contains(&feature));
            path.push(feature);
            for (_, child) in node.branches().unwrap() {
                check_paths(child, path.clone(), max_len, domain);
            }
        },
    }
}


#[test]
fn id3_paths_are_bounded_and_leaf_labels_are_valid() {
    let sample = buys_computer();
    let tree = TreeBuilder::new()
        .criterion(Criterion::InformationGain)
        .build(&sample)
        .unwrap();

    let domain = sample.target_domain();
    check_paths(tree.root(), Vec::new(), 4, &domain);
    assert!(tree.depth() <= 4);
}


#[test]
fn gini_paths_are_bounded_and_leaf_labels_are_valid() {
    let sample = buys_computer();
    let tree = TreeBuilder::new()
        .criterion(Criterion::Gini)
        .build(&sample)
        .unwrap();

    let domain = sample.target_domain();
    check_paths(tree.root(), Vec::new(), 4, &domain);
}


#[test]
fn rules_agree_with_tree_traversal() {
    let sample = buys_computer();
    for criterion in [Criterion::InformationGain, Criterion::Gini] {
        let tree = TreeBuilder::new()
            .criterion(criterion)
            .build(&sample)
            .unwrap();

        let rules = tree.rules(sample.target_name());

        // One rule per leaf.
        assert_eq!(rules.len(), tree.n_leaves());

        // Every training row is classified identically
        // by the matching rule and by walking the tree.
        let n_sample = sample.shape().0;
        for row in 0..n_sample {
            let matching = rules.iter()
                .filter(|rule| rule.matches(&sample, row))
                .collect::<Vec<_>>();
            assert_eq!(matching.len(), 1);
            assert_eq!(
                tree.classify(&sample, row),
                Some(matching[0].label()),
            );
        }
    }
}


#[test]
fn rule_conjunctions_trace_their_leaf_path() {
    let sample = buys_computer();
    let tree = TreeBuilder::new()
        .criterion(Criterion::InformationGain)
        .build(&sample)
        .unwrap();

    for rule in tree.rules(sample.target_name()) {
        // Following the conditions from the root reaches a leaf
        // after exactly `rule.len()` steps.
        let mut node = tree.root();
        for (feature, predicate) in rule.conditions() {
            assert_eq!(node.feature(), Some(feature.as_str()));
            let (_, child) = node.branches()
                .unwrap()
                .iter()
                .find(|(p, _)| p == predicate)
                .unwrap();
            node = child;
        }
        assert_eq!(node.label(), Some(rule.label()));
    }
}


#[test]
fn gini_candidate_counts_match_the_domain_sizes() {
    let sample = buys_computer();
    let mut recorder = Recorder::default();
    TreeBuilder::new()
        .criterion(Criterion::Gini)
        .trace(&mut recorder)
        .build(&sample)
        .unwrap();

    let count = |feature: &str| {
        recorder.candidates.iter()
            .filter(|(depth, f, _)| *depth == 0 && f == feature)
            .count()
    };

    // 2^(m-1) - 1 binary partitions of an m-valued domain.
    assert_eq!(count("age"), 3);
    assert_eq!(count("income"), 3);
    assert_eq!(count("student"), 1);
    assert_eq!(count("credit_rating"), 1);
}


#[test]
fn tracing_does_not_change_the_tree() {
    let sample = buys_computer();
    for criterion in [Criterion::InformationGain, Criterion::Gini] {
        let silent = TreeBuilder::new()
            .criterion(criterion)
            .build(&sample)
            .unwrap();

        let mut recorder = Recorder::default();
        let traced = TreeBuilder::new()
            .criterion(criterion)
            .trace(&mut recorder)
            .build(&sample)
            .unwrap();

        assert_eq!(silent, traced);
        assert!(!recorder.candidates.is_empty());
    }
}


#[test]
fn unknown_feature_is_reported() {
    let sample = buys_computer();
    let result = TreeBuilder::new()
        .features(["age", "shoe_size"])
        .build(&sample);
    assert!(matches!(result, Err(TreeError::UnknownColumn(name)) if name == "shoe_size"));
}


#[test]
fn id3_splits_numeric_features_per_distinct_value() {
    // Exact ages instead of age groups.
    // The numeric column determines the target,
    // so it beats the weaker categorical feature at the root
    // with one equality branch per distinct value.
    let age = Series::new("age", [25.0, 32.0, 47.0, 25.0, 32.0, 47.0]);
    let income = Series::new("income", [
        "high", "low", "high", "high", "low", "high",
    ]);
    let target = Series::new("buys_computer", [
        "no", "yes", "yes", "no", "yes", "yes",
    ]);
    let df = DataFrame::new(vec![age, income]).unwrap();
    let sample = Sample::from_dataframe(df, target).unwrap();

    let tree = TreeBuilder::new()
        .criterion(Criterion::InformationGain)
        .build(&sample)
        .unwrap();

    let root = tree.root();
    assert_eq!(root.feature(), Some("age"));

    let branches = root.branches().unwrap();
    assert_eq!(branches.len(), 3);
    for (predicate, child) in branches {
        assert!(matches!(predicate, Predicate::EqualsNumeric(_)));
        assert!(child.is_leaf());
    }

    // Every training row is classified by its own equality branch.
    for (row, label) in ["no", "yes", "yes", "no", "yes", "yes"]
        .iter()
        .enumerate()
    {
        assert_eq!(tree.classify(&sample, row), Some(*label));
    }
}


#[test]
fn exhausted_features_fall_back_to_the_parent_default() {
    let sample = buys_computer();
    let tree = TreeBuilder::new()
        .criterion(Criterion::InformationGain)
        .features(["student"])
        .build(&sample)
        .unwrap();

    // After consuming `student` both branches are impure;
    // they inherit the majority label of the root subset (`yes`).
    let branches = tree.root().branches().unwrap();
    assert_eq!(branches.len(), 2);
    for (_, child) in branches {
        assert_eq!(child.label(), Some("yes"));
    }
}
