use std::fmt;


/// A single cell value of a [`Sample`](crate::Sample).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A categorical value.
    Categorical(String),
    /// A numeric value.
    Numeric(f64),
}


impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Categorical(v) => write!(f, "{v}"),
            Self::Numeric(v) => write!(f, "{v}"),
        }
    }
}


/// Categorical representation of a feature.
/// The domain of a categorical feature is
/// the set of strings appearing in its column.
#[derive(Debug, Clone)]
pub struct CategoricalFeature {
    /// Feature name
    pub name: String,
    /// Feature values.
    pub sample: Vec<String>,
}


impl CategoricalFeature {
    /// Distinct values over the rows in `indices`,
    /// sorted in ascending order.
    pub fn distinct(&self, indices: &[usize]) -> Vec<&str> {
        let mut values = indices.iter()
            .map(|&i| self.sample[i].as_str())
            .collect::<Vec<_>>();
        values.sort_unstable();
        values.dedup();
        values
    }
}


/// Numeric representation of a feature.
#[derive(Debug, Clone)]
pub struct NumericFeature {
    /// Feature name
    pub name: String,
    /// Feature values.
    pub sample: Vec<f64>,
}


impl NumericFeature {
    /// Distinct values over the rows in `indices`,
    /// sorted in ascending order.
    /// A total order over floats keeps the sort safe
    /// when a column contains NaN; NaN sorts last.
    pub fn distinct(&self, indices: &[usize]) -> Vec<f64> {
        let mut values = indices.iter()
            .map(|&i| self.sample[i])
            .collect::<Vec<_>>();
        values.sort_unstable_by(|a, b| a.total_cmp(b));
        values.dedup();
        values
    }
}


/// An enumeration of categorical/numeric feature.
#[derive(Debug, Clone)]
pub enum Feature {
    /// Categorical representation of a feature
    Categorical(CategoricalFeature),
    /// Numeric representation of a feature
    Numeric(NumericFeature),
}


impl Feature {
    /// Returns `true` if this feature is numeric.
    pub fn is_numeric(&self) -> bool {
        match self {
            Self::Categorical(_) => false,
            Self::Numeric(_) => true,
        }
    }


    /// Get the feature name.
    pub fn name(&self) -> &str {
        match self {
            Self::Categorical(feat) => &feat.name,
            Self::Numeric(feat) => &feat.name,
        }
    }


    /// Returns the number of items in this feature.
    pub fn len(&self) -> usize {
        match self {
            Self::Categorical(feat) => feat.sample.len(),
            Self::Numeric(feat) => feat.sample.len(),
        }
    }


    /// Returns `true` if this feature has no items.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }


    /// Returns the value at row `idx`.
    pub fn at(&self, idx: usize) -> Value {
        match self {
            Self::Categorical(feat) => {
                Value::Categorical(feat.sample[idx].clone())
            },
            Self::Numeric(feat) => Value::Numeric(feat.sample[idx]),
        }
    }


    pub(crate) fn into_target(self) -> Vec<String> {
        match self {
            Self::Categorical(feat) => feat.sample,
            Self::Numeric(feat) => {
                feat.sample.into_iter()
                    .map(|v| v.to_string())
                    .collect()
            },
        }
    }
}


/// Build a feature from raw string tokens.
/// The column becomes numeric if and only if
/// every token parses as `f64`.
pub(crate) fn feature_from_tokens(name: String, tokens: Vec<String>) -> Feature {
    let numeric = tokens.iter()
        .map(|token| token.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>();

    match numeric {
        Ok(sample) if !tokens.is_empty() => {
            Feature::Numeric(NumericFeature { name, sample, })
        },
        _ => {
            let sample = tokens.into_iter()
                .map(|token| token.trim().to_string())
                .collect();
            Feature::Categorical(CategoricalFeature { name, sample, })
        },
    }
}
