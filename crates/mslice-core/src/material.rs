//! Per-slice material arrays and lateral occupancy masks.
//!
//! A [`Material`] holds the refractive-index decrement `delta` and the
//! absorption index `beta` for every lateral sample of one slice. A
//! [`PatternMask`] holds the fraction of each sample occupied by a
//! material; a mask and its [`complement`](PatternMask::complement)
//! partition the grid.

use crate::error::OpticsError;

fn check_finite(what: &str, values: &[f64]) -> Result<(), OpticsError> {
    match values.iter().position(|v| !v.is_finite()) {
        None => Ok(()),
        Some(i) => Err(OpticsError::invalid_parameter(format!(
            "{what}[{i}] is not finite ({})",
            values[i]
        ))),
    }
}

/// Complex refractive-index decrement of one slice, `n = 1 - delta + i·beta`.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    delta: Vec<f64>,
    beta: Vec<f64>,
}

impl Material {
    /// Pair `delta` and `beta` arrays of equal length.
    ///
    /// # Errors
    ///
    /// [`OpticsError::ShapeMismatch`] if the lengths differ and
    /// [`OpticsError::InvalidParameter`] for non-finite entries.
    pub fn new(delta: Vec<f64>, beta: Vec<f64>) -> Result<Self, OpticsError> {
        OpticsError::check_len("beta", delta.len(), beta.len())?;
        check_finite("delta", &delta)?;
        check_finite("beta", &beta)?;
        Ok(Self { delta, beta })
    }

    /// The same `delta` and `beta` at every one of `len` samples.
    pub fn uniform(len: usize, delta: f64, beta: f64) -> Result<Self, OpticsError> {
        Self::new(vec![delta; len], vec![beta; len])
    }

    /// Vacuum: `delta = beta = 0`.
    pub fn vacuum(len: usize) -> Self {
        Self {
            delta: vec![0.0; len],
            beta: vec![0.0; len],
        }
    }

    /// Refractive-index decrement per sample.
    pub fn delta(&self) -> &[f64] {
        &self.delta
    }

    /// Absorption index per sample.
    pub fn beta(&self) -> &[f64] {
        &self.beta
    }

    /// Number of lateral samples.
    pub fn len(&self) -> usize {
        self.delta.len()
    }

    /// True when the material covers no samples.
    pub fn is_empty(&self) -> bool {
        self.delta.is_empty()
    }
}

/// Fractional lateral occupancy of a material, one weight per sample.
#[derive(Clone, Debug, PartialEq)]
pub struct PatternMask {
    weights: Vec<f64>,
}

impl PatternMask {
    /// Wrap per-sample occupancy weights.
    ///
    /// # Errors
    ///
    /// [`OpticsError::InvalidParameter`] for non-finite weights.
    pub fn new(weights: Vec<f64>) -> Result<Self, OpticsError> {
        check_finite("pattern", &weights)?;
        Ok(Self { weights })
    }

    /// Binary mask from a predicate over sample indices.
    pub fn from_predicate(len: usize, mut inside: impl FnMut(usize) -> bool) -> Self {
        Self {
            weights: (0..len).map(|i| if inside(i) { 1.0 } else { 0.0 }).collect(),
        }
    }

    /// Mask with no occupied samples.
    pub fn empty(len: usize) -> Self {
        Self {
            weights: vec![0.0; len],
        }
    }

    /// Mask with every sample fully occupied.
    pub fn full(len: usize) -> Self {
        Self {
            weights: vec![1.0; len],
        }
    }

    /// `1 - self` per sample. Together with `self` this partitions the grid.
    pub fn complement(&self) -> Self {
        Self {
            weights: self.weights.iter().map(|w| 1.0 - w).collect(),
        }
    }

    /// Per-sample weights.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// True when the mask covers no samples.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// True when `self + other == 1` at every sample, within `tol`.
    pub fn partitions_with(&self, other: &PatternMask, tol: f64) -> bool {
        self.weights.len() == other.weights.len()
            && self
                .weights
                .iter()
                .zip(&other.weights)
                .all(|(a, b)| (a + b - 1.0).abs() <= tol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn material_rejects_length_mismatch() {
        let err = Material::new(vec![0.0; 4], vec![0.0; 3]).unwrap_err();
        assert!(matches!(err, OpticsError::ShapeMismatch { what: "beta", .. }));
    }

    #[test]
    fn material_rejects_nan() {
        let err = Material::new(vec![0.0, f64::NAN], vec![0.0, 0.0]).unwrap_err();
        assert!(err.to_string().contains("delta[1]"));
    }

    #[test]
    fn vacuum_is_zero() {
        let m = Material::vacuum(9);
        assert_eq!(m.len(), 9);
        assert!(m.delta().iter().all(|&d| d == 0.0));
        assert!(m.beta().iter().all(|&b| b == 0.0));
    }

    #[test]
    fn complement_partitions() {
        let p = PatternMask::new(vec![0.0, 0.25, 1.0, 0.5]).unwrap();
        let q = p.complement();
        assert_eq!(q.weights(), &[1.0, 0.75, 0.0, 0.5]);
        assert!(p.partitions_with(&q, 0.0));
        assert!(!p.partitions_with(&p, 1e-12));
    }

    #[test]
    fn from_predicate_is_binary() {
        let p = PatternMask::from_predicate(6, |i| i % 2 == 0);
        assert_eq!(p.weights(), &[1.0, 0.0, 1.0, 0.0, 1.0, 0.0]);
        assert!(PatternMask::empty(3).partitions_with(&PatternMask::full(3), 0.0));
    }
}
