use std::path::Path;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::collections::HashMap;
use std::ops::Index;

use polars::prelude::*;
use rayon::prelude::*;

use crate::error::TreeError;
use super::feature_struct::*;


/// Struct `Sample` holds a labeled tabular dataset
/// in column-oriented form.
/// Every row has a value for every declared column.
/// The designated target column holds the class labels;
/// all other columns are candidate features.
#[derive(Debug)]
pub struct Sample {
    pub(super) name_to_index: HashMap<String, usize>,
    pub(super) features: Vec<Feature>,
    pub(super) target: Vec<String>,
    pub(super) target_name: String,
    pub(super) n_sample: usize,
    pub(super) n_feature: usize,
}


impl Sample {
    /// Convert `polars::DataFrame` and `polars::Series` into `Sample`.
    /// This method takes the ownership for the given pair
    /// `data` and `target`.
    /// Utf8 columns become categorical features;
    /// any other column is cast to `f64` and becomes numeric.
    pub fn from_dataframe(data: DataFrame, target: Series)
        -> Result<Self, TreeError>
    {
        let (n_sample, n_feature) = data.shape();

        let target_name = target.name().to_string();
        let target = series_to_labels(&target);

        let features = data.get_columns()
            .iter()
            .map(series_to_feature)
            .collect::<Vec<_>>();

        let name_to_index = features.iter()
            .enumerate()
            .map(|(i, f)| (f.name().to_string(), i))
            .collect::<HashMap<_, _>>();

        let sample = Self {
            name_to_index, features, target, target_name,
            n_sample, n_feature,
        };
        Ok(sample)
    }


    /// Read a CSV format file to `Sample` type.
    /// Each column whose every entry parses as `f64` becomes
    /// a numeric feature; any other column becomes categorical.
    /// The target column is not set;
    /// use [`Sample::set_target`] afterwards.
    pub fn from_csv<P>(file: P, has_header: bool) -> Result<Self, TreeError>
        where P: AsRef<Path>,
    {
        // Open the given `file`.
        let file = File::open(file)?;
        let mut lines = BufReader::new(file).lines();

        let mut names = Vec::new();
        if has_header {
            if let Some(line) = lines.next() {
                names = line?.split(',')
                    .map(|name| name.trim().to_string())
                    .collect::<Vec<_>>();
            }
        }

        let mut columns: Vec<Vec<String>> = names.iter()
            .map(|_| Vec::new())
            .collect();
        let mut n_sample = 0_usize;

        // For each line of the file
        for line in lines {
            let line = line?;
            let tokens = line.split(',')
                .map(|token| token.trim().to_string())
                .collect::<Vec<_>>();

            // If the header does not exist,
            // construct a dummy header from the first row.
            if names.is_empty() {
                names = (1..=tokens.len())
                    .map(|i| format!("Feat. [{i}]"))
                    .collect();
                columns = names.iter().map(|_| Vec::new()).collect();
            }

            for (column, token) in columns.iter_mut().zip(tokens) {
                column.push(token);
            }
            n_sample += 1;
        }

        let features = names.into_par_iter()
            .zip(columns)
            .map(|(name, tokens)| feature_from_tokens(name, tokens))
            .collect::<Vec<_>>();

        let n_feature = features.len();
        let name_to_index = features.iter()
            .enumerate()
            .map(|(i, f)| (f.name().to_string(), i))
            .collect::<HashMap<_, _>>();

        let sample = Self {
            name_to_index, features,
            target: Vec::with_capacity(0),
            target_name: String::new(),
            n_sample, n_feature,
        };

        Ok(sample)
    }


    /// Set the feature of name `target` to `self.target`.
    /// The old value assigned to `self.target` will be dropped.
    /// Returns [`TreeError::UnknownColumn`]
    /// if no feature of that name exists.
    pub fn set_target<S: AsRef<str>>(mut self, target: S)
        -> Result<Self, TreeError>
    {
        let target = target.as_ref();
        let pos = self.features.iter()
            .position(|feat| feat.name() == target)
            .ok_or_else(|| TreeError::UnknownColumn(target.to_string()))?;

        self.target_name = target.to_string();
        self.target = self.features.remove(pos).into_target();
        self.n_feature -= 1;

        self.name_to_index = self.features.iter()
            .enumerate()
            .map(|(i, f)| (f.name().to_string(), i))
            .collect::<HashMap<_, _>>();

        Ok(self)
    }


    /// Returns a slice of the target labels.
    pub fn target(&self) -> &[String] {
        &self.target[..]
    }


    /// Returns the name of the target column.
    pub fn target_name(&self) -> &str {
        &self.target_name
    }


    /// Distinct target labels over the full sample,
    /// sorted in ascending order.
    pub fn target_domain(&self) -> Vec<String> {
        let mut domain = self.target.clone();
        domain.sort_unstable();
        domain.dedup();
        domain
    }


    /// Returns a slice of type `Feature`.
    pub fn features(&self) -> &[Feature] {
        &self.features[..]
    }


    /// Returns the feature column names in declared order.
    pub fn feature_names(&self) -> Vec<&str> {
        self.features.iter()
            .map(|feat| feat.name())
            .collect()
    }


    /// Returns the feature named `name`, if it exists.
    pub fn feature<S: AsRef<str>>(&self, name: S)
        -> Result<&Feature, TreeError>
    {
        let name = name.as_ref();
        self.name_to_index.get(name)
            .map(|&k| &self.features[k])
            .ok_or_else(|| TreeError::UnknownColumn(name.to_string()))
    }


    /// Returns the pair of the number of rows and
    /// the number of feature columns.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_sample, self.n_feature)
    }


    /// Returns the `idx`-th row as pairs of column name and value.
    pub fn row(&self, idx: usize) -> Vec<(&str, Value)> {
        self.features.iter()
            .map(|feat| (feat.name(), feat.at(idx)))
            .collect()
    }
}


impl<S> Index<S> for Sample
    where S: AsRef<str>
{
    type Output = Feature;


    fn index(&self, name: S) -> &Self::Output {
        let name: &str = name.as_ref();
        let k = *self.name_to_index.get(name)
            .expect("The feature of the given name does not exist");
        &self.features[k]
    }
}


/// Convert a `polars::Series` into a `Feature`.
fn series_to_feature(series: &Series) -> Feature {
    let name = series.name().to_string();
    match series.dtype() {
        DataType::Utf8 => {
            let sample = series.utf8()
                .expect("The Utf8 series cannot be read as strings")
                .into_iter()
                .map(|v| v.unwrap_or_default().to_string())
                .collect::<Vec<_>>();
            Feature::Categorical(CategoricalFeature { name, sample, })
        },
        _ => {
            let series = series.cast(&DataType::Float64)
                .expect("The series is not castable to f64");
            let sample = series.f64()
                .expect("The series is not a dtype f64")
                .into_iter()
                .map(|v| v.unwrap_or_default())
                .collect::<Vec<_>>();
            Feature::Numeric(NumericFeature { name, sample, })
        },
    }
}


/// Convert a `polars::Series` into target labels.
fn series_to_labels(series: &Series) -> Vec<String> {
    match series.dtype() {
        DataType::Utf8 => {
            series.utf8()
                .expect("The Utf8 series cannot be read as strings")
                .into_iter()
                .map(|v| v.unwrap_or_default().to_string())
                .collect()
        },
        _ => {
            series.cast(&DataType::Utf8)
                .expect("The target is not castable to Utf8")
                .utf8()
                .expect("The target cannot be read as strings")
                .into_iter()
                .map(|v| v.unwrap_or_default().to_string())
                .collect()
        },
    }
}
