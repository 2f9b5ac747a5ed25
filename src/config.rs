//! Playground configuration loaded from TOML.
//!
//! ```toml
//! dimensionality = 2
//! point_count = 50
//! learning_rate = 0.1
//! tick_interval_ms = 500
//! coordinate_range = [-1.0, 1.0]
//!
//! [target]
//! kind = "line"
//! slope = 0.5
//! intercept = 0.2
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use num_traits::Float;
use rand::distributions::uniform::SampleUniform;
use serde::{Deserialize, Serialize};

use crate::common_types::Dimensionality;
use crate::dataset::CoordinateRange;
use crate::error::{point_count_from_i64, validate_learning_rate, PerceptronError, PerceptronResult};
use crate::perceptron::{Hyperplane, TrainingController};

fn cast<F: Float>(value: f64) -> PerceptronResult<F> {
    num_traits::cast(value)
        .ok_or_else(|| PerceptronError::config(format!("value {value} is not representable")))
}

/// Ground-truth boundary as the user enters it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TargetConfig {
    /// `y = slope * x + intercept` (2D)
    Line { slope: f64, intercept: f64 },
    /// `z = a * x + b * y + c` (3D)
    Plane { a: f64, b: f64, c: f64 },
    /// Raw `w·x + b = 0` form of any supported dimensionality.
    Weights { weights: Vec<f64>, bias: f64 },
}

impl TargetConfig {
    pub fn to_hyperplane<F: Float>(&self) -> PerceptronResult<Hyperplane<F>> {
        Ok(match self {
            TargetConfig::Line { slope, intercept } => {
                Hyperplane::from_line(cast(*slope)?, cast(*intercept)?)
            }
            TargetConfig::Plane { a, b, c } => Hyperplane::from_plane(cast(*a)?, cast(*b)?, cast(*c)?),
            TargetConfig::Weights { weights, bias } => Hyperplane::new(
                weights.iter().map(|&w| cast(w)).collect::<PerceptronResult<Vec<F>>>()?,
                cast(*bias)?,
            ),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlaygroundConfig {
    /// 2 for lines, 3 for planes
    pub dimensionality: usize,
    /// Signed so that negative values from hand-edited files are reported, not wrapped.
    pub point_count: i64,
    pub learning_rate: f64,
    pub coordinate_range: [f64; 2],
    /// Fixed seed for reproducible datasets; unseeded when absent.
    pub seed: Option<u64>,
    /// Cadence at which the host should call `on_tick`.
    pub tick_interval_ms: u64,
    pub target: TargetConfig,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        PlaygroundConfig {
            dimensionality: 2,
            point_count: 50,
            learning_rate: 0.1,
            coordinate_range: [-1.0, 1.0],
            seed: None,
            tick_interval_ms: 500,
            target: TargetConfig::Line {
                slope: 0.5,
                intercept: 0.2,
            },
        }
    }
}

impl PlaygroundConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> PerceptronResult<Self> {
        let contents = fs::read_to_string(&path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(toml_str: &str) -> PerceptronResult<Self> {
        let config: PlaygroundConfig =
            toml::from_str(toml_str).map_err(|err| PerceptronError::config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Renders the configuration back to TOML, e.g. to save the current playground settings.
    pub fn to_toml_string(&self) -> PerceptronResult<String> {
        toml::to_string(self).map_err(|err| PerceptronError::config(err.to_string()))
    }

    pub fn validate(&self) -> PerceptronResult<()> {
        let dims = Dimensionality::try_from(self.dimensionality)?;
        point_count_from_i64(self.point_count)?;
        validate_learning_rate(self.learning_rate)?;
        CoordinateRange::new(self.coordinate_range[0], self.coordinate_range[1])?;
        let target = self.target.to_hyperplane::<f64>()?;
        if target.dimensionality() != dims.get() {
            return Err(PerceptronError::dimension_mismatch(
                dims.get(),
                target.dimensionality(),
                "configured target",
            ));
        }
        if self.tick_interval_ms == 0 {
            return Err(PerceptronError::config("tick_interval_ms must be greater than 0"));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Validates the configuration and builds a controller with a freshly generated dataset.
    pub fn build_controller<F>(&self) -> PerceptronResult<TrainingController<F>>
    where
        F: Float + SampleUniform,
    {
        self.validate()?;
        let range = CoordinateRange::new(cast(self.coordinate_range[0])?, cast(self.coordinate_range[1])?)?;
        TrainingController::new(
            Dimensionality::try_from(self.dimensionality)?,
            self.target.to_hyperplane()?,
            range,
            point_count_from_i64(self.point_count)?,
            cast(self.learning_rate)?,
            self.seed,
        )
    }
}
