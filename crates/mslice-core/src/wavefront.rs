//! The sampled complex wavefront.
//!
//! A [`Wavefront`] is a square, row-major grid of [`Complex64`] samples
//! with a uniform lateral pitch. Its physical support is
//! `side * step_xy`. The sample type is complex throughout the pipeline;
//! there is no real-valued view that could silently drop the phase.

use num_complex::Complex64;

use crate::error::{check_positive, OpticsError};

/// Scale applied by [`Wavefront::magnitude`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ScaleMode {
    /// `|u|`.
    #[default]
    Linear,
    /// `ln |u|`. Zero samples map to negative infinity.
    Log,
}

/// Magnitude extrema of a wavefront.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extrema {
    /// Largest `|u|`.
    pub max: f64,
    /// Smallest `|u|`.
    pub min: f64,
    /// `(row, col)` of the first sample attaining `max`.
    pub argmax: (usize, usize),
}

/// A square complex field sampled on a uniform lateral grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Wavefront {
    side: usize,
    step_xy: f64,
    samples: Vec<Complex64>,
}

impl Wavefront {
    /// Wrap `samples` (row-major, `side * side` long) as a wavefront.
    ///
    /// # Errors
    ///
    /// Returns [`OpticsError::InvalidParameter`] for a zero side or a
    /// non-positive pitch, and [`OpticsError::ShapeMismatch`] when the
    /// sample count is not `side²`.
    pub fn new(side: usize, step_xy: f64, samples: Vec<Complex64>) -> Result<Self, OpticsError> {
        if side == 0 {
            return Err(OpticsError::invalid_parameter(
                "wavefront side must be at least 1",
            ));
        }
        check_positive("step_xy", step_xy)?;
        let expected = side
            .checked_mul(side)
            .ok_or_else(|| OpticsError::invalid_parameter(format!("side {side} overflows")))?;
        OpticsError::check_len("wavefront samples", expected, samples.len())?;
        Ok(Self {
            side,
            step_xy,
            samples,
        })
    }

    /// Build a wavefront by evaluating `f(x, y)` at every sample centre.
    ///
    /// Coordinates are physical and centred: `x = (col - side/2) * step_xy`.
    pub fn from_fn(
        side: usize,
        step_xy: f64,
        mut f: impl FnMut(f64, f64) -> Complex64,
    ) -> Result<Self, OpticsError> {
        check_positive("step_xy", step_xy)?;
        let half = (side / 2) as f64;
        let mut samples = Vec::with_capacity(side * side);
        for r in 0..side {
            let y = (r as f64 - half) * step_xy;
            for c in 0..side {
                let x = (c as f64 - half) * step_xy;
                samples.push(f(x, y));
            }
        }
        Self::new(side, step_xy, samples)
    }

    /// Unit-amplitude plane wave.
    pub fn plane(side: usize, step_xy: f64) -> Result<Self, OpticsError> {
        Self::new(side, step_xy, vec![Complex64::new(1.0, 0.0); side * side])
    }

    /// Samples along one edge.
    pub fn side(&self) -> usize {
        self.side
    }

    /// Total number of samples (`side²`).
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always `false`; a wavefront has at least one sample.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Lateral sampling pitch.
    pub fn step_xy(&self) -> f64 {
        self.step_xy
    }

    /// Physical support length `L = side * step_xy`.
    pub fn support(&self) -> f64 {
        self.side as f64 * self.step_xy
    }

    /// Row-major samples.
    pub fn samples(&self) -> &[Complex64] {
        &self.samples
    }

    /// Mutable row-major samples. The shape cannot change.
    pub fn samples_mut(&mut self) -> &mut [Complex64] {
        &mut self.samples
    }

    /// Consume the wavefront and return its samples.
    pub fn into_samples(self) -> Vec<Complex64> {
        self.samples
    }

    /// Sample at `(row, col)`, or `None` out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<Complex64> {
        if row < self.side && col < self.side {
            Some(self.samples[row * self.side + col])
        } else {
            None
        }
    }

    /// A wavefront on the same grid carrying different samples.
    pub fn with_samples(&self, samples: Vec<Complex64>) -> Result<Self, OpticsError> {
        Self::new(self.side, self.step_xy, samples)
    }

    /// The same samples reinterpreted at a new pitch.
    ///
    /// Used by kernels whose output plane is sampled differently from
    /// the input plane.
    pub fn with_step_xy(self, step_xy: f64) -> Result<Self, OpticsError> {
        Self::new(self.side, step_xy, self.samples)
    }

    /// Total power `Σ |u|² · step_xy²`.
    pub fn power(&self) -> f64 {
        let cell = self.step_xy * self.step_xy;
        self.samples.iter().map(|u| u.norm_sqr()).sum::<f64>() * cell
    }

    /// Per-sample `|u|²`.
    pub fn intensity(&self) -> Vec<f64> {
        self.samples.iter().map(|u| u.norm_sqr()).collect()
    }

    /// Per-sample magnitude in the requested scale.
    pub fn magnitude(&self, mode: ScaleMode) -> Vec<f64> {
        match mode {
            ScaleMode::Linear => self.samples.iter().map(|u| u.norm()).collect(),
            ScaleMode::Log => self.samples.iter().map(|u| u.norm().ln()).collect(),
        }
    }

    /// Per-sample wrapped phase in `(-π, π]`.
    pub fn phase(&self) -> Vec<f64> {
        self.samples.iter().map(|u| u.arg()).collect()
    }

    /// Largest and smallest magnitude and the location of the maximum.
    pub fn extrema(&self) -> Extrema {
        let mut max = f64::NEG_INFINITY;
        let mut min = f64::INFINITY;
        let mut at = 0;
        for (i, u) in self.samples.iter().enumerate() {
            let m = u.norm();
            if m > max {
                max = m;
                at = i;
            }
            min = min.min(m);
        }
        Extrema {
            max,
            min,
            argmax: (at / self.side, at % self.side),
        }
    }

    /// Physical `(x_min, x_max, y_min, y_max)` extent of the sample centres,
    /// suitable for labelling a rendered image.
    pub fn extent(&self) -> (f64, f64, f64, f64) {
        let half = (self.side / 2) as f64;
        let lo = -half * self.step_xy;
        let hi = (self.side as f64 - 1.0 - half) * self.step_xy;
        (lo, hi, lo, hi)
    }
}
