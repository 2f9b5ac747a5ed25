//! Perceptron learning playground.
//!
//! Trains a single perceptron on synthetic points labeled by a ground-truth
//! line (2D) or plane (3D), one epoch per clock tick, so a front end can
//! animate the decision boundary as it moves toward the target.
//!
//! ```
//! use perceptron_playground::{PlaygroundConfig, TickOutcome};
//!
//! let config = PlaygroundConfig { seed: Some(7), ..PlaygroundConfig::default() };
//! let mut controller = config.build_controller::<f64>().unwrap();
//! controller.start().unwrap();
//! loop {
//!     if let TickOutcome::Converged { epoch } = controller.on_tick().unwrap() {
//!         println!("perfect accuracy after {epoch} epochs");
//!         break;
//!     }
//! }
//! ```

pub mod common_types;
pub mod config;
pub mod dataset;
pub mod error;
pub mod perceptron;

#[cfg(feature = "python")]
mod python;

pub use common_types::{DataPoint, Dimensionality, Label, LabeledPoint};
pub use config::{PlaygroundConfig, TargetConfig};
pub use dataset::{CoordinateRange, Dataset, DatasetGenerator};
pub use error::{point_count_from_i64, PerceptronError, PerceptronResult};
pub use perceptron::{
    AccuracyReport, EpochReport, Hyperplane, Perceptron, PredictionBreakdown, TestPointOutcome,
    TickOutcome, TrainingController, TrainingPhase, TrainingSnapshot,
};
