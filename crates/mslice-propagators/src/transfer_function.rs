//! Fresnel transfer-function propagator.
//!
//! Multiplies the angular spectrum by the paraxial transfer function
//! ```text
//! H(fx, fy) = exp(-iπλz (fx² + fy²)),   fx = (j - n/2) / L
//! u2 = fftshift(ifft2(ifftshift(H) · fft2(ifftshift(u1))))
//! ```
//! `|H| = 1`, so the kernel conserves power. The output plane keeps the
//! input pitch.

use std::f64::consts::PI;

use mslice_core::{Complex64, OpticsError, Wavefront};
use mslice_propagator::Propagator;

use crate::fft2::{centred, fftshift2, ifftshift2, Fft2};
use crate::kernels::validate_call;

/// Transfer-function (convolution) Fresnel propagator.
#[derive(Clone, Debug, Default)]
pub struct TransferFunction {
    fft: Fft2,
}

impl TransferFunction {
    /// Kernel with its own plan cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Kernel planning through `fft`, typically shared with other kernels.
    pub fn with_fft(fft: Fft2) -> Self {
        Self { fft }
    }

    /// The plan cache this kernel uses.
    pub fn fft(&self) -> &Fft2 {
        &self.fft
    }
}

impl Propagator for TransferFunction {
    fn name(&self) -> &str {
        "TransferFunction"
    }

    fn propagate(
        &self,
        wavefront: &Wavefront,
        sampling: f64,
        support: f64,
        wavelength: f64,
        distance: f64,
    ) -> Result<Wavefront, OpticsError> {
        validate_call(sampling, support, wavelength, distance)?;
        let n = wavefront.side();
        let df = 1.0 / support;
        let chirp = -PI * wavelength * distance;

        let mut h = Vec::with_capacity(n * n);
        for r in 0..n {
            let fy = centred(r, n, df);
            for c in 0..n {
                let fx = centred(c, n, df);
                h.push(Complex64::cis(chirp * (fx * fx + fy * fy)));
            }
        }
        let h = ifftshift2(&h, n);

        let mut spectrum = ifftshift2(wavefront.samples(), n);
        self.fft.forward(&mut spectrum, n);
        for (u, t) in spectrum.iter_mut().zip(&h) {
            *u *= *t;
        }
        self.fft.inverse(&mut spectrum, n);
        wavefront.with_samples(fftshift2(&spectrum, n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mslice_test_utils::fixtures::gaussian_beam;

    const WAVEL: f64 = 1e-10;

    #[test]
    fn preserves_shape_and_pitch() {
        let w = gaussian_beam(32, 1e-8, 4e-8);
        let out = TransferFunction::new()
            .propagate(&w, 1e-8, w.support(), WAVEL, 1e-6)
            .unwrap();
        assert_eq!(out.side(), w.side());
        assert_eq!(out.step_xy(), w.step_xy());
    }

    #[test]
    fn conserves_power() {
        let w = gaussian_beam(64, 1e-8, 5e-8);
        let out = TransferFunction::new()
            .propagate(&w, 1e-8, w.support(), WAVEL, 5e-6)
            .unwrap();
        let rel = (out.power() - w.power()).abs() / w.power();
        assert!(rel < 1e-9, "relative power change {rel}");
    }

    #[test]
    fn plane_wave_is_unchanged_up_to_rounding() {
        let w = Wavefront::plane(16, 1e-8).unwrap();
        let out = TransferFunction::new()
            .propagate(&w, 1e-8, w.support(), WAVEL, 1e-4)
            .unwrap();
        for u in out.samples() {
            assert!((u - Complex64::new(1.0, 0.0)).norm() < 1e-9);
        }
    }

    #[test]
    fn does_not_mutate_input() {
        let w = gaussian_beam(16, 1e-8, 3e-8);
        let before = w.clone();
        let _ = TransferFunction::new()
            .propagate(&w, 1e-8, w.support(), WAVEL, 1e-6)
            .unwrap();
        assert_eq!(w, before);
    }

    #[test]
    fn rejects_zero_distance() {
        let w = Wavefront::plane(4, 1e-8).unwrap();
        assert!(matches!(
            TransferFunction::new().propagate(&w, 1e-8, w.support(), WAVEL, 0.0),
            Err(OpticsError::InvalidDistance { .. })
        ));
    }
}
