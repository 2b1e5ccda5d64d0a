use std::fs;
use std::path::PathBuf;

use arbor::prelude::*;
use arbor::sample::NumericFeature;


const CSV: &str = "\
outlook,temperature,windy,play
sunny,85,false,no
sunny,80,true,no
overcast,83,false,yes
rainy,70,false,yes
rainy,68,true,no
";


fn write_csv(name: &str, content: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("arbor-{}-{name}", std::process::id()));
    fs::write(&path, content).unwrap();
    path
}


#[test]
fn csv_columns_get_their_natural_types() {
    let path = write_csv("types.csv", CSV);
    let sample = SampleReader::new()
        .file(&path)
        .has_header(true)
        .target_feature("play")
        .read()
        .unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(sample.shape(), (5, 3));
    assert_eq!(sample.target_name(), "play");
    assert_eq!(sample.target_domain(), vec!["no", "yes"]);

    assert!(!sample["outlook"].is_numeric());
    assert!(sample["temperature"].is_numeric());
    // `false`/`true` do not parse as numbers.
    assert!(!sample["windy"].is_numeric());

    assert_eq!(sample["temperature"].len(), 5);
    assert!(!sample["temperature"].is_empty());

    assert_eq!(
        sample.feature_names(),
        vec!["outlook", "temperature", "windy"],
    );
}


#[test]
fn unknown_target_column_is_reported() {
    let path = write_csv("unknown.csv", CSV);
    let result = SampleReader::new()
        .file(&path)
        .has_header(true)
        .target_feature("humidity")
        .read();
    fs::remove_file(&path).unwrap();

    assert!(matches!(
        result,
        Err(TreeError::UnknownColumn(name)) if name == "humidity"
    ));
}


#[test]
fn missing_file_is_reported() {
    let result = SampleReader::new()
        .file("/no/such/file.csv")
        .has_header(true)
        .target_feature("play")
        .read();
    assert!(matches!(result, Err(TreeError::Io(_))));
}


#[test]
fn an_empty_sample_cannot_grow_a_tree() {
    // A header row with no data rows.
    let path = write_csv(
        "empty.csv",
        "outlook,temperature,windy,play\n",
    );
    let sample = SampleReader::new()
        .file(&path)
        .has_header(true)
        .target_feature("play")
        .read()
        .unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(sample.shape(), (0, 3));
    let result = TreeBuilder::new().build(&sample);
    assert!(matches!(result, Err(TreeError::EmptyInput)));
}


#[test]
fn distinct_numeric_values_sort_nan_last() {
    // The token `nan` parses as `f64`,
    // so such a column becomes a numeric feature.
    let feature = NumericFeature {
        name: String::from("ratio"),
        sample: vec![0.5, f64::NAN, 0.25, 0.5],
    };

    let distinct = feature.distinct(&[0, 1, 2, 3]);
    assert_eq!(distinct.len(), 3);
    assert_eq!(distinct[0], 0.25);
    assert_eq!(distinct[1], 0.5);
    assert!(distinct[2].is_nan());
}


#[test]
fn rows_expose_name_value_pairs() {
    let path = write_csv("rows.csv", CSV);
    let sample = SampleReader::new()
        .file(&path)
        .has_header(true)
        .target_feature("play")
        .read()
        .unwrap();
    fs::remove_file(&path).unwrap();

    let row = sample.row(2);
    assert_eq!(
        row[0],
        ("outlook", Value::Categorical("overcast".into())),
    );
    assert_eq!(row[1], ("temperature", Value::Numeric(83.0)));
}
