//! Square 2D FFT helpers on row-major buffers.
//!
//! `rustfft` transforms rows; columns are handled by transposing in
//! place, transforming rows again, and transposing back. The inverse is
//! normalised by `1 / n²` so `inverse(forward(u)) == u` up to rounding.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use mslice_core::Complex64;
use rustfft::{Fft, FftDirection, FftPlanner};

/// Transpose a square `side × side` buffer in place.
pub fn transpose(data: &mut [Complex64], side: usize) {
    for r in 0..side {
        for c in (r + 1)..side {
            data.swap(r * side + c, c * side + r);
        }
    }
}

/// 2D FFT engine with plans cached per side length and direction.
///
/// Clones share one planner, so a kernel set plans each size once no
/// matter how many slices or batch workers use it. The lock is held only
/// while fetching a plan.
#[derive(Clone)]
pub struct Fft2 {
    planner: Arc<Mutex<FftPlanner<f64>>>,
}

impl Default for Fft2 {
    fn default() -> Self {
        Self {
            planner: Arc::new(Mutex::new(FftPlanner::new())),
        }
    }
}

impl fmt::Debug for Fft2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fft2").finish_non_exhaustive()
    }
}

impl Fft2 {
    /// Create an engine with an empty plan cache.
    pub fn new() -> Self {
        Self::default()
    }

    fn plan(&self, side: usize, direction: FftDirection) -> Arc<dyn Fft<f64>> {
        // The planner holds only cached plans, so a poisoned lock is still usable.
        let mut planner = self.planner.lock().unwrap_or_else(PoisonError::into_inner);
        planner.plan_fft(side, direction)
    }

    fn transform(&self, data: &mut [Complex64], side: usize, direction: FftDirection) {
        debug_assert_eq!(data.len(), side * side);
        let fft = self.plan(side, direction);
        let mut scratch = vec![Complex64::default(); fft.get_inplace_scratch_len()];
        // Buffer length is a multiple of `side`: every row is transformed.
        fft.process_with_scratch(data, &mut scratch);
        transpose(data, side);
        fft.process_with_scratch(data, &mut scratch);
        transpose(data, side);
    }

    /// Forward 2D FFT, unnormalised.
    pub fn forward(&self, data: &mut [Complex64], side: usize) {
        self.transform(data, side, FftDirection::Forward);
    }

    /// Inverse 2D FFT, normalised by `1 / side²`.
    pub fn inverse(&self, data: &mut [Complex64], side: usize) {
        self.transform(data, side, FftDirection::Inverse);
        let scale = 1.0 / (side * side) as f64;
        for v in data.iter_mut() {
            *v *= scale;
        }
    }

    /// Whether `self` and `other` share one plan cache.
    pub fn shares_plans_with(&self, other: &Fft2) -> bool {
        Arc::ptr_eq(&self.planner, &other.planner)
    }
}

fn roll2(data: &[Complex64], side: usize, shift: usize) -> Vec<Complex64> {
    let mut out = vec![Complex64::default(); data.len()];
    for r in 0..side {
        let dst_r = (r + shift) % side;
        for c in 0..side {
            out[dst_r * side + (c + shift) % side] = data[r * side + c];
        }
    }
    out
}

/// Move the zero-frequency sample from index 0 to the centre (`side / 2`).
pub fn fftshift2(data: &[Complex64], side: usize) -> Vec<Complex64> {
    roll2(data, side, side / 2)
}

/// Inverse of [`fftshift2`]: move the centre sample to index 0.
pub fn ifftshift2(data: &[Complex64], side: usize) -> Vec<Complex64> {
    roll2(data, side, side - side / 2)
}

/// Centred physical coordinate of index `j` on an `n`-sample axis.
pub fn centred(j: usize, n: usize, pitch: f64) -> f64 {
    (j as f64 - (n / 2) as f64) * pitch
}
