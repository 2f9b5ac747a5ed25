//! Synthetic labeled datasets sampled around a ground-truth hyperplane.

use num_traits::Float;
use rand::distributions::uniform::SampleUniform;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::common_types::{Dimensionality, LabeledPoint};
use crate::error::{PerceptronError, PerceptronResult};
use crate::perceptron::hyperplane::Hyperplane;

// --- Sampling range ---

/// Half-open interval `[min, max)` that every coordinate is drawn from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateRange<F> {
    min: F,
    max: F,
}

impl<F: Float> CoordinateRange<F> {
    pub fn new(min: F, max: F) -> PerceptronResult<Self> {
        // gen_range panics on an empty range, so reject it here
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(PerceptronError::InvalidCoordinateRange {
                min: min.to_f64().unwrap_or(f64::NAN),
                max: max.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(CoordinateRange { min, max })
    }

    pub fn min(&self) -> F {
        self.min
    }

    pub fn max(&self) -> F {
        self.max
    }
}

impl<F: Float> Default for CoordinateRange<F> {
    fn default() -> Self {
        CoordinateRange {
            min: -F::one(),
            max: F::one(),
        }
    }
}

// --- Dataset ---

/// An ordered, immutable collection of labeled points of one dimensionality.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset<F> {
    dimensionality: Dimensionality,
    points: Vec<LabeledPoint<F>>,
}

impl<F: Float> Dataset<F> {
    /// Wraps externally supplied points, checking that each has the right number of coordinates.
    pub fn new(dimensionality: Dimensionality, points: Vec<LabeledPoint<F>>) -> PerceptronResult<Self> {
        let expected = dimensionality.get();
        // Report the first offending point; labels are taken as given
        if let Some(bad) = points.iter().find(|p| p.dimensionality() != expected) {
            return Err(PerceptronError::dimension_mismatch(
                expected,
                bad.dimensionality(),
                "dataset point",
            ));
        }
        Ok(Dataset {
            dimensionality,
            points,
        })
    }

    pub fn empty(dimensionality: Dimensionality) -> Self {
        Dataset {
            dimensionality,
            points: Vec::new(),
        }
    }

    pub fn dimensionality(&self) -> Dimensionality {
        self.dimensionality
    }

    pub fn points(&self) -> &[LabeledPoint<F>] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LabeledPoint<F>> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// True when every stored label matches the side of `target` the point lies on.
    pub fn labels_agree_with(&self, target: &Hyperplane<F>) -> PerceptronResult<bool> {
        for point in &self.points {
            if target.side(&point.features)? != point.label {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl<'a, F> IntoIterator for &'a Dataset<F> {
    type Item = &'a LabeledPoint<F>;
    type IntoIter = std::slice::Iter<'a, LabeledPoint<F>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

// --- Generator ---

/// Samples points uniformly from a box and labels them against a target hyperplane.
#[derive(Debug, Clone, Copy)]
pub struct DatasetGenerator<F> {
    dimensionality: Dimensionality,
    range: CoordinateRange<F>,
}

impl<F> DatasetGenerator<F>
where
    F: Float + SampleUniform,
{
    pub fn new(dimensionality: Dimensionality, range: CoordinateRange<F>) -> Self {
        DatasetGenerator {
            dimensionality,
            range,
        }
    }

    pub fn dimensionality(&self) -> Dimensionality {
        self.dimensionality
    }

    pub fn range(&self) -> CoordinateRange<F> {
        self.range
    }

    /// Draws `count` points from `rng`. Labels use the same `s >= 0 => +1` rule as prediction.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        count: usize,
        target: &Hyperplane<F>,
        rng: &mut R,
    ) -> PerceptronResult<Dataset<F>> {
        let dims = self.dimensionality.get();
        target.check_dimensionality(dims, "target hyperplane")?;

        let mut points = Vec::with_capacity(count);
        for _ in 0..count {
            // Each coordinate is drawn independently from [min, max)
            let features: Vec<F> = (0..dims)
                .map(|_| rng.gen_range(self.range.min..self.range.max))
                .collect();
            // Label by the target at generation time; later training never relabels
            let label = target.side(&features)?;
            points.push(LabeledPoint::new(features, label));
        }

        Ok(Dataset {
            dimensionality: self.dimensionality,
            points,
        })
    }

    /// Reproducible sampling: the same seed always yields the same dataset.
    pub fn generate_seeded(
        &self,
        count: usize,
        target: &Hyperplane<F>,
        seed: u64,
    ) -> PerceptronResult<Dataset<F>> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.generate(count, target, &mut rng)
    }

    pub fn generate_unseeded(&self, count: usize, target: &Hyperplane<F>) -> PerceptronResult<Dataset<F>> {
        self.generate(count, target, &mut rand::thread_rng())
    }
}
