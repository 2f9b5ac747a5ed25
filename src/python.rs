//! Python bindings, built with the `python` feature.
//!
//! A notebook or web front end owns the timer and the chart; it calls `tick()`
//! every `tick_interval_ms` and redraws from `state()` and `points()`.

use pyo3::exceptions::{PyOSError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::common_types::Label;
use crate::config::PlaygroundConfig;
use crate::error::{point_count_from_i64, PerceptronError};
use crate::perceptron::{Hyperplane, TickOutcome, TrainingController, TrainingPhase};

impl From<PerceptronError> for PyErr {
    fn from(err: PerceptronError) -> PyErr {
        match err {
            PerceptronError::Io(io_err) => PyOSError::new_err(io_err.to_string()),
            other => PyValueError::new_err(other.to_string()),
        }
    }
}

fn phase_name(phase: TrainingPhase) -> &'static str {
    match phase {
        TrainingPhase::Idle => "idle",
        TrainingPhase::Running => "running",
        TrainingPhase::Converged => "converged",
        TrainingPhase::Stopped => "stopped",
    }
}

#[pyclass(name = "PerceptronPlayground")]
struct PyPerceptronPlayground {
    controller: TrainingController<f64>,
    tick_interval_ms: u64,
}

#[pymethods]
impl PyPerceptronPlayground {
    /// Builds a playground from a TOML file, or from defaults when no path is given.
    #[new]
    #[pyo3(signature = (config_path = None))]
    fn new(config_path: Option<&str>) -> PyResult<Self> {
        let config = match config_path {
            Some(path) => PlaygroundConfig::load_from_file(path)?,
            None => PlaygroundConfig::default(),
        };
        Ok(PyPerceptronPlayground {
            controller: config.build_controller()?,
            tick_interval_ms: config.tick_interval_ms,
        })
    }

    #[getter]
    fn tick_interval_ms(&self) -> u64 {
        self.tick_interval_ms
    }

    fn start(&mut self) -> PyResult<()> {
        Ok(self.controller.start()?)
    }

    fn stop(&mut self) {
        self.controller.stop();
    }

    fn reset(&mut self) {
        self.controller.reset();
    }

    /// Runs one epoch. Returns `"converged"` exactly once, on the epoch that reached perfect accuracy.
    fn tick(&mut self) -> PyResult<&'static str> {
        Ok(match self.controller.on_tick()? {
            TickOutcome::Idle => "idle",
            TickOutcome::Trained { .. } => "trained",
            TickOutcome::Converged { .. } => "converged",
        })
    }

    fn regenerate_data(&mut self, count: i64) -> PyResult<()> {
        let count = point_count_from_i64(count)?;
        Ok(self.controller.regenerate_data(count)?)
    }

    fn set_target_line(&mut self, slope: f64, intercept: f64) -> PyResult<()> {
        Ok(self
            .controller
            .set_target_hyperplane(Hyperplane::from_line(slope, intercept))?)
    }

    fn set_target_plane(&mut self, a: f64, b: f64, c: f64) -> PyResult<()> {
        Ok(self
            .controller
            .set_target_hyperplane(Hyperplane::from_plane(a, b, c))?)
    }

    fn set_target_hyperplane(&mut self, weights: Vec<f64>, bias: f64) -> PyResult<()> {
        Ok(self
            .controller
            .set_target_hyperplane(Hyperplane::new(weights, bias))?)
    }

    fn set_learning_rate(&mut self, rate: f64) -> PyResult<()> {
        Ok(self.controller.set_learning_rate(rate)?)
    }

    fn predict(&self, point: Vec<f64>) -> PyResult<i8> {
        Ok(self.controller.predict(&point)?.as_i8())
    }

    /// Returns a dict with the prediction, the target's label, and the per-dimension terms.
    fn classify_test_point<'py>(&self, py: Python<'py>, point: Vec<f64>) -> PyResult<Bound<'py, PyDict>> {
        let outcome = self.controller.classify_test_point(&point)?;
        let breakdown = self.controller.explain(&point)?;
        let dict = PyDict::new_bound(py);
        dict.set_item("predicted", outcome.predicted.as_i8())?;
        dict.set_item("expected", outcome.expected.as_i8())?;
        dict.set_item("correct", outcome.correct)?;
        dict.set_item("terms", breakdown.terms)?;
        dict.set_item("bias", breakdown.bias)?;
        dict.set_item("sum", breakdown.sum)?;
        Ok(dict)
    }

    fn state<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let snapshot = self.controller.snapshot();
        let dict = PyDict::new_bound(py);
        dict.set_item("weights", snapshot.weights)?;
        dict.set_item("bias", snapshot.bias)?;
        dict.set_item("epoch_count", snapshot.epoch_count)?;
        dict.set_item("is_running", snapshot.is_running)?;
        dict.set_item("phase", phase_name(snapshot.phase))?;
        dict.set_item("mistakes_last_epoch", snapshot.mistakes_last_epoch)?;
        Ok(dict)
    }

    fn points(&self) -> Vec<(Vec<f64>, i8)> {
        self.controller
            .points()
            .iter()
            .map(|p| (p.features.clone(), p.label.as_i8()))
            .collect()
    }

    /// `(correct, wrong, percent)` of the learned boundary on the current data.
    fn accuracy(&self) -> PyResult<(usize, usize, f64)> {
        let report = self.controller.accuracy()?;
        Ok((report.correct, report.wrong, report.percent))
    }

    fn boundary_line(&self) -> Option<(f64, f64)> {
        self.controller.decision_boundary_line()
    }

    fn target_line(&self) -> Option<(f64, f64)> {
        self.controller.target().as_line()
    }
}

/// Label values exposed as module constants so Python code does not hard-code them.
fn add_label_constants(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("POSITIVE", Label::Positive.as_i8())?;
    m.add("NEGATIVE", Label::Negative.as_i8())?;
    Ok(())
}

#[pymodule]
fn perceptron_playground(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    add_label_constants(m)?;
    m.add_class::<PyPerceptronPlayground>()?;
    Ok(())
}
