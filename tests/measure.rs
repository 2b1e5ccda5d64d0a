use arbor::{entropy, gini, TreeError};


fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-12
}


#[test]
fn entropy_of_pure_labels_is_zero() {
    let labels = ["yes"; 10];
    assert!(close(entropy(&labels).unwrap(), 0.0));
}


#[test]
fn entropy_of_uniform_labels_is_log2_k() {
    let labels = ["yes", "no", "yes", "no"];
    assert!(close(entropy(&labels).unwrap(), 1.0));

    let labels = ["a", "b", "c", "d", "a", "b", "c", "d"];
    assert!(close(entropy(&labels).unwrap(), 2.0));
}


#[test]
fn entropy_of_empty_input_fails() {
    let labels: [&str; 0] = [];
    assert!(matches!(entropy(&labels), Err(TreeError::EmptyInput)));
}


#[test]
fn gini_of_pure_labels_is_zero() {
    let labels = ["no"; 7];
    assert!(close(gini(&labels).unwrap(), 0.0));
}


#[test]
fn gini_of_uniform_labels_is_maximal() {
    // 1 - 1/k for a k-way uniform distribution.
    let labels = ["yes", "no"];
    assert!(close(gini(&labels).unwrap(), 0.5));

    let labels = ["a", "b", "c"];
    assert!(close(gini(&labels).unwrap(), 2.0 / 3.0));
}


#[test]
fn gini_grows_as_balance_moves_toward_uniform() {
    // Two classes over ten rows, from pure to balanced.
    let mut previous = 0.0;
    for n_pos in 1..=5 {
        let labels = (0..10)
            .map(|i| if i < n_pos { "yes" } else { "no" })
            .collect::<Vec<_>>();
        let value = gini(&labels).unwrap();
        assert!(value > previous);
        previous = value;
    }
}


#[test]
fn gini_of_empty_input_fails() {
    let labels: [&str; 0] = [];
    assert!(matches!(gini(&labels), Err(TreeError::EmptyInput)));
}


#[test]
fn measures_accept_owned_labels() {
    let labels = vec![String::from("yes"), String::from("no")];
    assert!(close(entropy(&labels).unwrap(), 1.0));
    assert!(close(gini(&labels).unwrap(), 0.5));
}
