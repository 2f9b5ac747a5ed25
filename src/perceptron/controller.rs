//! Tick-driven training lifecycle around a [`Perceptron`] and its dataset.
//!
//! The host owns the clock and calls [`TrainingController::on_tick`] on every
//! tick. Each tick runs at most one full epoch; because every mutating method
//! takes `&mut self`, two epochs can never overlap and `stop`/`reset` take
//! effect before the next tick.

use num_traits::Float;
use rand::distributions::uniform::SampleUniform;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::common_types::{Dimensionality, Label, LabeledPoint};
use crate::dataset::{CoordinateRange, Dataset, DatasetGenerator};
use crate::error::{validate_learning_rate, PerceptronError, PerceptronResult};
use crate::perceptron::hyperplane::Hyperplane;
use crate::perceptron::model::{AccuracyReport, Perceptron, PredictionBreakdown};

// --- Lifecycle and reporting types ---

/// Lifecycle phase of a training run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingPhase {
    Idle,
    Running,
    /// Last epoch had zero mistakes. Left only through `reset` or new data.
    Converged,
    Stopped,
}

/// What a single clock tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; nothing changed.
    Idle,
    Trained { epoch: usize, mistakes: usize },
    /// Emitted exactly once per convergence, on the tick whose epoch had zero mistakes.
    Converged { epoch: usize },
}

/// Read-only view of the controller for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSnapshot<F> {
    pub weights: Vec<F>,
    pub bias: F,
    pub epoch_count: usize,
    pub is_running: bool,
    pub phase: TrainingPhase,
    pub mistakes_last_epoch: Option<usize>,
}

/// Result of classifying an ad hoc point against both the model and the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestPointOutcome {
    pub predicted: Label,
    pub expected: Label,
    pub correct: bool,
}

// --- Controller ---

#[derive(Debug, Clone)]
pub struct TrainingController<F> {
    model: Perceptron<F>,
    /// Ground truth; training never touches it.
    target: Hyperplane<F>,
    generator: DatasetGenerator<F>,
    dataset: Dataset<F>,
    learning_rate: F,
    point_count: usize, // Reused when the target changes and data is regenerated
    epoch_count: usize, // Zeroed together with the model and on every new dataset
    mistakes_last_epoch: Option<usize>,
    phase: TrainingPhase,
    rng: StdRng, // Seeded once; every regeneration continues the same stream
}

impl<F> TrainingController<F>
where
    F: Float + SampleUniform,
{
    /// Builds a controller with a freshly generated dataset.
    ///
    /// With `seed: None` the dataset source is seeded from OS entropy.
    pub fn new(
        dimensionality: Dimensionality,
        target: Hyperplane<F>,
        range: CoordinateRange<F>,
        point_count: usize,
        learning_rate: F,
        seed: Option<u64>,
    ) -> PerceptronResult<Self> {
        validate_learning_rate(learning_rate.to_f64().unwrap_or(f64::NAN))?;
        // A fixed seed makes the whole sequence of generated datasets reproducible
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let generator = DatasetGenerator::new(dimensionality, range);
        let dataset = generator.generate(point_count, &target, &mut rng)?;

        Ok(TrainingController {
            model: Perceptron::new(dimensionality),
            target,
            generator,
            dataset,
            learning_rate,
            point_count,
            epoch_count: 0,
            mistakes_last_epoch: None,
            phase: TrainingPhase::Idle,
            rng,
        })
    }

    // --- Read-only accessors for the display layer ---

    pub fn phase(&self) -> TrainingPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == TrainingPhase::Running
    }

    pub fn epoch_count(&self) -> usize {
        self.epoch_count
    }

    pub fn learning_rate(&self) -> F {
        self.learning_rate
    }

    pub fn model(&self) -> &Perceptron<F> {
        &self.model
    }

    pub fn target(&self) -> &Hyperplane<F> {
        &self.target
    }

    pub fn dataset(&self) -> &Dataset<F> {
        &self.dataset
    }

    pub fn points(&self) -> &[LabeledPoint<F>] {
        self.dataset.points()
    }

    pub fn dimensionality(&self) -> Dimensionality {
        self.generator.dimensionality()
    }

    pub fn snapshot(&self) -> TrainingSnapshot<F> {
        TrainingSnapshot {
            weights: self.model.weights().to_vec(),
            bias: self.model.bias(),
            epoch_count: self.epoch_count,
            is_running: self.is_running(),
            phase: self.phase,
            mistakes_last_epoch: self.mistakes_last_epoch,
        }
    }

    // --- Lifecycle ---

    /// Begins issuing epochs on subsequent ticks.
    ///
    /// Ignored while already running, and after convergence until `reset` or new data.
    pub fn start(&mut self) -> PerceptronResult<()> {
        // The rate may have been valid at construction but is checked again on every start
        validate_learning_rate(self.learning_rate.to_f64().unwrap_or(f64::NAN))?;
        match self.phase {
            TrainingPhase::Running => {
                tracing::warn!("start() ignored: training is already running");
            }
            TrainingPhase::Converged => {
                tracing::warn!(
                    "start() ignored: already converged after {} epochs; reset or regenerate data first",
                    self.epoch_count
                );
            }
            TrainingPhase::Idle | TrainingPhase::Stopped => {
                tracing::info!(
                    epoch = self.epoch_count,
                    points = self.dataset.len(),
                    "training started"
                );
                self.phase = TrainingPhase::Running;
            }
        }
        Ok(())
    }

    /// Halts scheduling. The learned hyperplane and epoch count are kept.
    pub fn stop(&mut self) {
        if self.phase == TrainingPhase::Running {
            tracing::info!(epoch = self.epoch_count, "training stopped");
            self.phase = TrainingPhase::Stopped;
        }
    }

    /// Runs one epoch if running. Called by the host on each clock tick.
    pub fn on_tick(&mut self) -> PerceptronResult<TickOutcome> {
        if self.phase != TrainingPhase::Running {
            return Ok(TickOutcome::Idle);
        }

        // One full pass per tick; an epoch never spans two ticks
        let report = self
            .model
            .train_epoch(self.dataset.points(), self.learning_rate)?;
        self.epoch_count += 1;
        self.mistakes_last_epoch = Some(report.mistakes);
        tracing::debug!(
            epoch = self.epoch_count,
            mistakes = report.mistakes,
            "epoch complete"
        );

        if report.is_perfect() {
            // Leaving Running here is what makes the notification fire only once
            self.phase = TrainingPhase::Converged;
            tracing::info!(
                epoch = self.epoch_count,
                "perfect accuracy achieved, all points classified correctly"
            );
            Ok(TickOutcome::Converged {
                epoch: self.epoch_count,
            })
        } else {
            Ok(TickOutcome::Trained {
                epoch: self.epoch_count,
                mistakes: report.mistakes,
            })
        }
    }

    /// Headless driver: starts training and ticks until convergence or `max_epochs` epochs.
    pub fn run_until_converged(&mut self, max_epochs: usize) -> PerceptronResult<TickOutcome> {
        self.start()?;
        let mut last = TickOutcome::Idle;
        for _ in 0..max_epochs {
            last = self.on_tick()?;
            // Idle means something stopped us between ticks (e.g. an invalid start)
            if matches!(last, TickOutcome::Converged { .. } | TickOutcome::Idle) {
                break;
            }
        }
        Ok(last)
    }

    /// Zeroes the model and the epoch counter together and returns to `Idle`.
    pub fn reset(&mut self) {
        self.model.reset();
        self.epoch_count = 0;
        self.mistakes_last_epoch = None;
        self.phase = TrainingPhase::Idle;
        tracing::info!("perceptron reset");
    }

    // --- Data and target changes ---

    /// Replaces the dataset with `count` new points. Weights are kept; the epoch counter is not.
    pub fn regenerate_data(&mut self, count: usize) -> PerceptronResult<()> {
        let dataset = self.generator.generate(count, &self.target, &mut self.rng)?;
        self.point_count = count;
        self.install_dataset(dataset);
        tracing::info!(points = count, "training data regenerated");
        Ok(())
    }

    /// Changes the ground truth and regenerates the data against it. Weights are kept.
    pub fn set_target_hyperplane(&mut self, target: Hyperplane<F>) -> PerceptronResult<()> {
        let dims = self.dimensionality().get();
        if target.dimensionality() != dims {
            return Err(PerceptronError::dimension_mismatch(
                dims,
                target.dimensionality(),
                "target hyperplane",
            ));
        }
        // Generate before assigning so a failure leaves the old target and data in place
        let dataset = self
            .generator
            .generate(self.point_count, &target, &mut self.rng)?;
        self.target = target;
        self.install_dataset(dataset);
        tracing::info!(points = self.point_count, "target hyperplane changed");
        Ok(())
    }

    /// Uses caller-supplied points instead of generated ones. Labels are taken as given.
    pub fn replace_dataset(&mut self, dataset: Dataset<F>) -> PerceptronResult<()> {
        let dims = self.dimensionality();
        if dataset.dimensionality() != dims {
            return Err(PerceptronError::dimension_mismatch(
                dims.get(),
                dataset.dimensionality().get(),
                "replacement dataset",
            ));
        }
        self.point_count = dataset.len();
        self.install_dataset(dataset);
        Ok(())
    }

    pub fn set_learning_rate(&mut self, rate: F) -> PerceptronResult<()> {
        validate_learning_rate(rate.to_f64().unwrap_or(f64::NAN))?;
        self.learning_rate = rate;
        Ok(())
    }

    // --- Queries on the learned boundary ---

    pub fn predict(&self, point: &[F]) -> PerceptronResult<Label> {
        self.model.predict(point)
    }

    pub fn explain(&self, point: &[F]) -> PerceptronResult<PredictionBreakdown<F>> {
        self.model.explain(point)
    }

    /// Classifies a user-supplied point and checks the answer against the target.
    ///
    /// Refused with `NoDecisionBoundary` while the learned weights are all zero.
    pub fn classify_test_point(&self, point: &[F]) -> PerceptronResult<TestPointOutcome> {
        if self.model.hyperplane().is_degenerate() {
            return Err(PerceptronError::NoDecisionBoundary);
        }
        let predicted = self.model.predict(point)?;
        let expected = self.target.side(point)?;
        Ok(TestPointOutcome {
            predicted,
            expected,
            correct: predicted == expected,
        })
    }

    pub fn accuracy(&self) -> PerceptronResult<AccuracyReport> {
        self.model.accuracy(self.dataset.points())
    }

    /// Learned 2D boundary as `(slope, intercept)`, if it can be written as `y = m*x + c`.
    pub fn decision_boundary_line(&self) -> Option<(F, F)> {
        self.model.hyperplane().as_line()
    }

    /// Swaps in new data and returns to Idle. The model's weights are left alone.
    fn install_dataset(&mut self, dataset: Dataset<F>) {
        self.dataset = dataset;
        self.epoch_count = 0;
        self.mistakes_last_epoch = None;
        self.phase = TrainingPhase::Idle;
    }
}
