//! Error types shared by the model, the dataset generator and the controller.

use std::io;

/// Result alias used throughout the crate.
pub type PerceptronResult<T> = Result<T, PerceptronError>;

/// Configuration errors surfaced synchronously to the caller.
///
/// The core performs no I/O during training, so every variant except `Io`
/// describes a caller mistake that is never retried or silently repaired.
#[derive(Debug, thiserror::Error)]
pub enum PerceptronError {
    #[error("dimension mismatch in {context}: expected {expected} dimensions, got {got}")]
    DimensionMismatch {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("invalid learning rate {0}: must be finite and strictly positive")]
    InvalidLearningRate(f64),

    #[error("invalid point count {0}: must be a non-negative integer")]
    InvalidPointCount(i64),

    #[error("unsupported dimensionality {0}: only 2 and 3 are supported")]
    UnsupportedDimensionality(usize),

    #[error("invalid coordinate range [{min}, {max}]: bounds must be finite with min < max")]
    InvalidCoordinateRange { min: f64, max: f64 },

    #[error("no decision boundary yet: train the perceptron before testing new points")]
    NoDecisionBoundary,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl PerceptronError {
    pub fn dimension_mismatch(expected: usize, got: usize, context: impl Into<String>) -> Self {
        PerceptronError::DimensionMismatch {
            expected,
            got,
            context: context.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        PerceptronError::Config(message.into())
    }
}

/// Checks that `rate` is usable as a perceptron step size.
pub(crate) fn validate_learning_rate(rate: f64) -> PerceptronResult<()> {
    if rate.is_finite() && rate > 0.0 {
        Ok(())
    } else {
        Err(PerceptronError::InvalidLearningRate(rate))
    }
}

/// Converts a possibly negative count coming from an untyped source.
pub fn point_count_from_i64(count: i64) -> PerceptronResult<usize> {
    usize::try_from(count).map_err(|_| PerceptronError::InvalidPointCount(count))
}
