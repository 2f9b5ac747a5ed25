//! Perceptron classifier and the training loop that drives it.

pub mod controller;
pub mod hyperplane;
pub mod model;

pub use controller::{TestPointOutcome, TickOutcome, TrainingController, TrainingPhase, TrainingSnapshot};
pub use hyperplane::Hyperplane;
pub use model::{AccuracyReport, EpochReport, Perceptron, PredictionBreakdown};
