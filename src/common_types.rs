//! This module contains the data structures shared by the model, the dataset generator and the controller.

use std::fmt;

use num_traits::Float;

use crate::error::{PerceptronError, PerceptronResult};

/// Represents a single data point, with features and a label.
///
/// - `F`: The type of the features (e.g., `f64`, `f32`).
/// - `L`: The type of the label.
#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint<F, L> {
    pub features: Vec<F>,
    pub label: L,
}

impl<F, L> DataPoint<F, L> {
    pub fn new(features: Vec<F>, label: L) -> Self {
        DataPoint { features, label }
    }

    pub fn dimensionality(&self) -> usize {
        self.features.len()
    }
}

/// A point with a perceptron class label.
pub type LabeledPoint<F> = DataPoint<F, Label>;

/// Binary class label. `Positive` is +1, `Negative` is -1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Positive,
    Negative,
}

impl Label {
    /// Boundary-inclusive sign rule: a decision value of exactly zero is `Positive`.
    pub fn from_decision_value<F: Float>(value: F) -> Self {
        if value >= F::zero() {
            Label::Positive
        } else {
            Label::Negative
        }
    }

    pub fn as_i8(self) -> i8 {
        match self {
            Label::Positive => 1,
            Label::Negative => -1,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Positive => write!(f, "+1"),
            Label::Negative => write!(f, "-1"),
        }
    }
}

/// Number of coordinates per point. Lines live in 2D, planes in 3D.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimensionality {
    Two,
    Three,
}

impl Dimensionality {
    pub fn get(self) -> usize {
        match self {
            Dimensionality::Two => 2,
            Dimensionality::Three => 3,
        }
    }
}

impl TryFrom<usize> for Dimensionality {
    type Error = PerceptronError;

    fn try_from(value: usize) -> PerceptronResult<Self> {
        match value {
            2 => Ok(Dimensionality::Two),
            3 => Ok(Dimensionality::Three),
            other => Err(PerceptronError::UnsupportedDimensionality(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_decision_value_is_positive() {
        assert_eq!(Label::from_decision_value(0.0_f64), Label::Positive);
        assert_eq!(Label::from_decision_value(-0.0_f64), Label::Positive);
        assert_eq!(Label::from_decision_value(1e-12_f64), Label::Positive);
        assert_eq!(Label::from_decision_value(-1e-12_f32), Label::Negative);
    }

    #[test]
    fn test_label_values() {
        assert_eq!(Label::Positive.as_i8(), 1);
        assert_eq!(Label::Negative.as_i8(), -1);
        assert_eq!(Label::Negative.to_string(), "-1");
    }

    #[test]
    fn test_dimensionality_conversion() {
        assert_eq!(Dimensionality::try_from(2).unwrap(), Dimensionality::Two);
        assert_eq!(Dimensionality::try_from(3).unwrap().get(), 3);
        assert!(matches!(
            Dimensionality::try_from(4),
            Err(PerceptronError::UnsupportedDimensionality(4))
        ));
        assert!(Dimensionality::try_from(0).is_err());
    }

    #[test]
    fn test_data_point_dimensionality() {
        let point = DataPoint::new(vec![0.5, -0.25, 1.0], Label::Negative);
        assert_eq!(point.dimensionality(), 3);
    }
}
