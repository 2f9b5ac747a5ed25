//! Affine decision boundary `w·x + b = 0` shared by the ground truth and the learned model.

use std::fmt;

use num_traits::Float;

use crate::common_types::Label;
use crate::error::{PerceptronError, PerceptronResult};

/// Calculates the dot product of two vectors of equal length.
fn dot_product<F: Float>(a: &[F], b: &[F]) -> F {
    a.iter().zip(b.iter()).fold(F::zero(), |acc, (&x, &y)| acc + x * y)
}

/// A weight vector plus a scalar bias.
///
/// Points with `w·x + b >= 0` are on the positive side, everything else is on
/// the negative side.
#[derive(Debug, Clone, PartialEq)]
pub struct Hyperplane<F> {
    weights: Vec<F>,
    bias: F,
}

impl<F: Float> Hyperplane<F> {
    pub fn new(weights: Vec<F>, bias: F) -> Self {
        Hyperplane { weights, bias }
    }

    /// All-zero weights and bias. Every point lands on the positive side.
    pub fn zeros(dimensionality: usize) -> Self {
        Hyperplane {
            weights: vec![F::zero(); dimensionality],
            bias: F::zero(),
        }
    }

    /// Target line `y = slope * x + intercept`; points above the line are positive.
    pub fn from_line(slope: F, intercept: F) -> Self {
        Hyperplane {
            weights: vec![-slope, F::one()],
            bias: -intercept,
        }
    }

    /// Target plane `z = a * x + b * y + c`; points above the plane are positive.
    pub fn from_plane(a: F, b: F, c: F) -> Self {
        Hyperplane {
            weights: vec![-a, -b, F::one()],
            bias: -c,
        }
    }

    pub fn weights(&self) -> &[F] {
        &self.weights
    }

    pub fn bias(&self) -> F {
        self.bias
    }

    pub fn dimensionality(&self) -> usize {
        self.weights.len()
    }

    /// Signed (unnormalized) distance `w·x + b`.
    pub fn decision_value(&self, point: &[F]) -> PerceptronResult<F> {
        self.check_dimensionality(point.len(), "decision value")?;
        Ok(dot_product(&self.weights, point) + self.bias)
    }

    pub fn side(&self, point: &[F]) -> PerceptronResult<Label> {
        self.decision_value(point).map(Label::from_decision_value)
    }

    /// Slope and intercept of the 2D boundary solved for `y`.
    ///
    /// `None` for non-2D hyperplanes and for vertical (or degenerate) lines where `w[1] == 0`.
    pub fn as_line(&self) -> Option<(F, F)> {
        match self.weights.as_slice() {
            [wx, wy] if *wy != F::zero() => Some((-*wx / *wy, -self.bias / *wy)),
            _ => None,
        }
    }

    /// All weights zero: `w·x + b = 0` describes no boundary at all.
    pub fn is_degenerate(&self) -> bool {
        self.weights.iter().all(|w| *w == F::zero())
    }

    pub(crate) fn check_dimensionality(&self, got: usize, context: &str) -> PerceptronResult<()> {
        if got != self.weights.len() {
            return Err(PerceptronError::dimension_mismatch(
                self.weights.len(),
                got,
                context,
            ));
        }
        Ok(())
    }

    /// Moves the boundary by `step * x` on the weights and `step` on the bias.
    /// Callers must have checked the dimensionality already.
    pub(crate) fn shift(&mut self, point: &[F], step: F) {
        for (w, &x) in self.weights.iter_mut().zip(point.iter()) {
            *w = *w + step * x;
        }
        self.bias = self.bias + step;
    }

    pub(crate) fn set_zero(&mut self) {
        self.weights.iter_mut().for_each(|w| *w = F::zero());
        self.bias = F::zero();
    }
}

impl<F: Float + fmt::Display> fmt::Display for Hyperplane<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, w) in self.weights.iter().enumerate() {
            if k > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{:.3}*x{}", w, k + 1)?;
        }
        write!(f, " + {:.3} = 0", self.bias)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_hyperplane_classifies_everything_positive() {
        let plane = Hyperplane::<f64>::zeros(3);
        assert_eq!(plane.side(&[-1.0, -1.0, -1.0]).unwrap(), Label::Positive);
        assert_eq!(plane.decision_value(&[0.3, 0.2, 0.1]).unwrap(), 0.0);
    }

    #[test]
    fn test_from_line_sides() {
        let line = Hyperplane::from_line(0.5, 0.2);
        // Line passes through (0, 0.2).
        assert_eq!(line.side(&[0.0, 0.9]).unwrap(), Label::Positive);
        assert_eq!(line.side(&[0.0, -0.9]).unwrap(), Label::Negative);
        assert_eq!(line.side(&[0.0, 0.2]).unwrap(), Label::Positive);
    }

    #[test]
    fn test_from_plane_sides() {
        let plane = Hyperplane::from_plane(1.0, -1.0, 0.0);
        assert_eq!(plane.dimensionality(), 3);
        assert_eq!(plane.side(&[0.5, 0.5, 0.1]).unwrap(), Label::Positive);
        assert_eq!(plane.side(&[0.5, -0.5, 0.5]).unwrap(), Label::Negative);
    }

    #[test]
    fn test_is_degenerate() {
        assert!(Hyperplane::<f64>::zeros(2).is_degenerate());
        assert!(Hyperplane::new(vec![0.0, 0.0, 0.0], 0.4).is_degenerate());
        assert!(!Hyperplane::new(vec![0.0, 0.1], 0.0).is_degenerate());
        assert!(!Hyperplane::from_line(0.0, 0.0).is_degenerate());
    }

    #[test]
    fn test_as_line_round_trips_line_form() {
        let line = Hyperplane::from_line(0.5, 0.2);
        let (slope, intercept) = line.as_line().unwrap();
        assert_relative_eq!(slope, 0.5);
        assert_relative_eq!(intercept, 0.2);

        assert!(Hyperplane::<f64>::zeros(2).as_line().is_none());
        assert!(Hyperplane::from_plane(0.1, 0.2, 0.3).as_line().is_none());
    }

    #[test]
    fn test_decision_value_rejects_wrong_dimensionality() {
        let line = Hyperplane::from_line(1.0, 0.0);
        let err = line.decision_value(&[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(
            err,
            PerceptronError::DimensionMismatch { expected: 2, got: 3, .. }
        ));
    }

    #[test]
    fn test_shift_and_set_zero() {
        let mut plane = Hyperplane::<f64>::zeros(2);
        plane.shift(&[1.0, -2.0], 0.2);
        assert_relative_eq!(plane.weights()[0], 0.2);
        assert_relative_eq!(plane.weights()[1], -0.4);
        assert_relative_eq!(plane.bias(), 0.2);

        plane.set_zero();
        assert_eq!(plane, Hyperplane::zeros(2));
    }

    #[test]
    fn test_display() {
        let plane = Hyperplane::new(vec![0.25, -1.0], 0.5);
        assert_eq!(plane.to_string(), "0.250*x1 + -1.000*x2 + 0.500 = 0");
    }
}
