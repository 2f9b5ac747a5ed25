//! The perceptron classifier: prediction rule, online update rule, and reset.

use num_traits::Float;

use crate::common_types::{Dimensionality, Label, LabeledPoint};
use crate::error::{validate_learning_rate, PerceptronError, PerceptronResult};
use crate::perceptron::hyperplane::Hyperplane;

/// Outcome of one pass over the training points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpochReport {
    /// Number of misclassified points, each of which triggered exactly one update.
    pub mistakes: usize,
    pub points_seen: usize,
}

impl EpochReport {
    pub fn is_perfect(&self) -> bool {
        self.mistakes == 0
    }
}

/// Correct/wrong counts of a model over a set of labeled points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccuracyReport {
    pub correct: usize,
    pub wrong: usize,
    /// Percentage in `[0, 100]`; `0` when there are no points.
    pub percent: f64,
}

/// How a single prediction was computed: one `w[k] * x[k]` term per dimension plus the bias.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionBreakdown<F> {
    pub terms: Vec<F>,
    pub bias: F,
    pub sum: F,
    pub prediction: Label,
}

/// Single-layer perceptron over `D`-dimensional points.
#[derive(Debug, Clone, PartialEq)]
pub struct Perceptron<F> {
    boundary: Hyperplane<F>,
}

impl<F: Float> Perceptron<F> {
    /// A fresh model with zero weights and zero bias.
    pub fn new(dimensionality: Dimensionality) -> Self {
        Perceptron {
            boundary: Hyperplane::zeros(dimensionality.get()),
        }
    }

    pub fn dimensionality(&self) -> usize {
        self.boundary.dimensionality()
    }

    /// The learned decision boundary.
    pub fn hyperplane(&self) -> &Hyperplane<F> {
        &self.boundary
    }

    pub fn weights(&self) -> &[F] {
        self.boundary.weights()
    }

    pub fn bias(&self) -> F {
        self.boundary.bias()
    }

    pub fn decision_value(&self, point: &[F]) -> PerceptronResult<F> {
        self.boundary.decision_value(point)
    }

    /// `+1` if `w·x + b >= 0`, `-1` otherwise. A point exactly on the boundary is `+1`.
    pub fn predict(&self, point: &[F]) -> PerceptronResult<Label> {
        self.boundary.side(point)
    }

    pub fn explain(&self, point: &[F]) -> PerceptronResult<PredictionBreakdown<F>> {
        // Same evaluation order as `predict`, so the shown sum never contradicts the label.
        let sum = self.boundary.decision_value(point)?;
        let terms: Vec<F> = self
            .boundary
            .weights()
            .iter()
            .zip(point.iter())
            .map(|(&w, &x)| w * x)
            .collect();
        Ok(PredictionBreakdown {
            terms,
            bias: self.boundary.bias(),
            sum,
            prediction: Label::from_decision_value(sum),
        })
    }

    /// Runs one online perceptron epoch over `points` in their stored order.
    ///
    /// Each misclassified point moves the boundary immediately, so later points
    /// in the same epoch are classified with the updated weights. Inputs are
    /// validated up front; on error the model is left untouched.
    pub fn train_epoch(
        &mut self,
        points: &[LabeledPoint<F>],
        learning_rate: F,
    ) -> PerceptronResult<EpochReport> {
        validate_learning_rate(learning_rate.to_f64().unwrap_or(f64::NAN))?;
        for point in points {
            self.boundary
                .check_dimensionality(point.dimensionality(), "training point")?;
        }

        let two = F::one() + F::one();
        let mut mistakes = 0;
        for point in points {
            let prediction = self.predict(&point.features)?;
            // label - prediction is one of -2, 0, +2
            let error = point.label.as_i8() - prediction.as_i8();
            if error != 0 {
                let step = if error > 0 {
                    learning_rate * two
                } else {
                    -(learning_rate * two)
                };
                self.boundary.shift(&point.features, step);
                mistakes += 1;
            }
        }

        Ok(EpochReport {
            mistakes,
            points_seen: points.len(),
        })
    }

    pub fn accuracy(&self, points: &[LabeledPoint<F>]) -> PerceptronResult<AccuracyReport> {
        let mut correct = 0;
        for point in points {
            if self.predict(&point.features)? == point.label {
                correct += 1;
            }
        }
        let total = points.len();
        let percent = if total > 0 {
            correct as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        Ok(AccuracyReport {
            correct,
            wrong: total - correct,
            percent,
        })
    }

    pub fn reset(&mut self) {
        self.boundary.set_zero();
    }

    /// Replaces the boundary wholesale, keeping the dimensionality.
    pub fn set_hyperplane(&mut self, hyperplane: Hyperplane<F>) -> PerceptronResult<()> {
        if hyperplane.dimensionality() != self.dimensionality() {
            return Err(PerceptronError::dimension_mismatch(
                self.dimensionality(),
                hyperplane.dimensionality(),
                "learned hyperplane",
            ));
        }
        self.boundary = hyperplane;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn lp(features: Vec<f64>, label: Label) -> LabeledPoint<f64> {
        LabeledPoint::new(features, label)
    }

    fn diagonal_points() -> Vec<LabeledPoint<f64>> {
        vec![
            lp(vec![0.5, 0.5], Label::Positive),
            lp(vec![-0.5, -0.5], Label::Negative),
            lp(vec![0.9, 0.9], Label::Positive),
            lp(vec![-0.9, -0.1], Label::Negative),
        ]
    }

    #[test]
    fn test_untrained_model_predicts_positive_everywhere() {
        let model = Perceptron::<f64>::new(Dimensionality::Two);
        assert_eq!(model.predict(&[-0.7, -0.3]).unwrap(), Label::Positive);
        assert_eq!(model.predict(&[0.0, 0.0]).unwrap(), Label::Positive);
    }

    #[test]
    fn test_point_on_boundary_is_positive() {
        let mut model = Perceptron::new(Dimensionality::Two);
        model
            .set_hyperplane(Hyperplane::new(vec![1.0, -1.0], 0.0))
            .unwrap();
        assert_eq!(model.predict(&[0.3, 0.3]).unwrap(), Label::Positive);
        assert_eq!(model.predict(&[0.3, 0.31]).unwrap(), Label::Negative);
    }

    #[test]
    fn test_predict_is_deterministic() {
        let mut model = Perceptron::new(Dimensionality::Three);
        model
            .set_hyperplane(Hyperplane::new(vec![0.2, -0.7, 0.1], -0.05))
            .unwrap();
        let point = [0.4, 0.1, -0.9];
        let first = model.predict(&point).unwrap();
        for _ in 0..10 {
            assert_eq!(model.predict(&point).unwrap(), first);
        }
    }

    #[test]
    fn test_predict_rejects_wrong_dimensionality() {
        let model = Perceptron::<f64>::new(Dimensionality::Two);
        assert!(matches!(
            model.predict(&[1.0]),
            Err(PerceptronError::DimensionMismatch { expected: 2, got: 1, .. })
        ));
    }

    #[test]
    fn test_single_misclassified_update() {
        let mut model = Perceptron::new(Dimensionality::Two);
        model.set_hyperplane(Hyperplane::new(vec![0.1, 0.0], 0.0)).unwrap();
        let point = lp(vec![-1.0, 0.0], Label::Positive);
        assert_eq!(model.predict(&point.features).unwrap(), Label::Negative);

        let report = model.train_epoch(std::slice::from_ref(&point), 0.1).unwrap();

        assert_eq!(report.mistakes, 1);
        assert_relative_eq!(model.weights()[0], -0.1);
        assert_relative_eq!(model.weights()[1], 0.0);
        assert_relative_eq!(model.bias(), 0.2);
        assert_eq!(model.predict(&point.features).unwrap(), Label::Positive);
    }

    #[test]
    fn test_correct_points_cause_no_update() {
        let mut model = Perceptron::new(Dimensionality::Two);
        model.set_hyperplane(Hyperplane::new(vec![0.1, 0.0], 0.0)).unwrap();
        let before = model.clone();
        let report = model
            .train_epoch(&[lp(vec![-1.0, 0.0], Label::Negative)], 0.1)
            .unwrap();
        assert_eq!(report.mistakes, 0);
        assert!(report.is_perfect());
        assert_eq!(model, before);
    }

    #[test]
    fn test_updates_apply_within_the_epoch() {
        let mut model = Perceptron::new(Dimensionality::Two);
        let report = model.train_epoch(&diagonal_points(), 0.1).unwrap();

        // (-0.5,-0.5) and (0.9,0.9) are misclassified in turn; the others are not.
        assert_eq!(report.mistakes, 2);
        assert_eq!(report.points_seen, 4);
        assert_relative_eq!(model.weights()[0], 0.28, epsilon = 1e-12);
        assert_relative_eq!(model.weights()[1], 0.28, epsilon = 1e-12);
        assert_relative_eq!(model.bias(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_diagonal_dataset_converges() {
        let mut model = Perceptron::new(Dimensionality::Two);
        let points = diagonal_points();
        let mut converged_at = None;
        for epoch in 1..=100 {
            if model.train_epoch(&points, 0.1).unwrap().is_perfect() {
                converged_at = Some(epoch);
                break;
            }
        }
        assert_eq!(converged_at, Some(2));
        assert_eq!(model.accuracy(&points).unwrap().wrong, 0);
        // Stays at zero mistakes once converged.
        assert_eq!(model.train_epoch(&points, 0.1).unwrap().mistakes, 0);
    }

    #[test]
    fn test_train_epoch_rejects_bad_learning_rate() {
        let mut model = Perceptron::new(Dimensionality::Two);
        for rate in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            let err = model.train_epoch(&diagonal_points(), rate).unwrap_err();
            assert!(matches!(err, PerceptronError::InvalidLearningRate(_)));
        }
        assert_eq!(model, Perceptron::new(Dimensionality::Two));
    }

    #[test]
    fn test_train_epoch_rejects_mismatched_points_without_mutation() {
        let mut model = Perceptron::new(Dimensionality::Two);
        let points = vec![
            lp(vec![-0.5, -0.5], Label::Negative),
            lp(vec![0.1, 0.2, 0.3], Label::Positive),
        ];
        let err = model.train_epoch(&points, 0.1).unwrap_err();
        assert!(matches!(
            err,
            PerceptronError::DimensionMismatch { expected: 2, got: 3, .. }
        ));
        assert_eq!(model, Perceptron::new(Dimensionality::Two));
    }

    #[test]
    fn test_explain_matches_decision_value() {
        let mut model = Perceptron::new(Dimensionality::Two);
        model.set_hyperplane(Hyperplane::new(vec![0.5, -0.25], 0.1)).unwrap();
        let breakdown = model.explain(&[0.4, 0.8]).unwrap();
        assert_relative_eq!(breakdown.terms[0], 0.2);
        assert_relative_eq!(breakdown.terms[1], -0.2);
        assert_relative_eq!(breakdown.bias, 0.1);
        assert_relative_eq!(breakdown.sum, model.decision_value(&[0.4, 0.8]).unwrap());
        assert_eq!(breakdown.prediction, Label::Positive);
    }

    #[test]
    fn test_explain_agrees_with_predict_on_boundary() {
        let mut model = Perceptron::new(Dimensionality::Two);
        model.set_hyperplane(Hyperplane::new(vec![1.0, 0.3], -0.28)).unwrap();
        let point = [0.1, 0.6];
        // w·x + b evaluates to exactly zero here, but b + w0*x0 + w1*x1 does not.
        assert_eq!(model.decision_value(&point).unwrap(), 0.0);

        let breakdown = model.explain(&point).unwrap();
        assert_eq!(breakdown.sum, model.decision_value(&point).unwrap());
        assert_eq!(breakdown.prediction, model.predict(&point).unwrap());
        assert_eq!(breakdown.prediction, Label::Positive);
    }

    #[test]
    fn test_accuracy_report() {
        let model = Perceptron::<f64>::new(Dimensionality::Two);
        let report = model.accuracy(&diagonal_points()).unwrap();
        assert_eq!(report.correct, 2);
        assert_eq!(report.wrong, 2);
        assert_relative_eq!(report.percent, 50.0);

        let empty = model.accuracy(&[]).unwrap();
        assert_eq!(empty.correct, 0);
        assert_eq!(empty.percent, 0.0);
    }

    #[test]
    fn test_reset_zeroes_weights() {
        let mut model = Perceptron::new(Dimensionality::Three);
        model
            .set_hyperplane(Hyperplane::new(vec![1.0, 2.0, 3.0], 4.0))
            .unwrap();
        model.reset();
        assert_eq!(model.weights(), &[0.0, 0.0, 0.0]);
        assert_eq!(model.bias(), 0.0);
        assert_eq!(model.dimensionality(), 3);
    }

    #[test]
    fn test_set_hyperplane_keeps_dimensionality() {
        let mut model = Perceptron::<f64>::new(Dimensionality::Two);
        assert!(model.set_hyperplane(Hyperplane::zeros(3)).is_err());
    }
}
