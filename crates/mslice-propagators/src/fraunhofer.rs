//! Fraunhofer (far-field) propagator.
//!
//! The input-plane quadratic phase is negligible when the Fresnel number
//! is small, leaving a single scaled Fourier transform:
//!
//! ```text
//! u2(x2) = exp(ik x2² / 2z) / (iλz) · FT[u1](x2 / λz) · dx1²
//! ```

use mslice_core::{OpticsError, Wavefront};
use mslice_propagator::Propagator;

use crate::fft2::Fft2;
use crate::kernels::{single_fft_plane, validate_call};

/// Far-field propagator.
#[derive(Clone, Debug, Default)]
pub struct Fraunhofer {
    fft: Fft2,
}

impl Fraunhofer {
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

impl Propagator for Fraunhofer {
    fn name(&self) -> &str {
        "Fraunhofer"
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
        single_fft_plane(
            &self.fft,
            wavefront,
            wavefront.samples().to_vec(),
            sampling,
            support,
            wavelength,
            distance,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mslice_core::Complex64;

    const WAVEL: f64 = 1e-10;

    #[test]
    fn point_source_spreads_uniformly() {
        let n = 16;
        let mut w = Wavefront::new(n, 1e-6, vec![Complex64::default(); n * n]).unwrap();
        w.samples_mut()[(n / 2) * n + n / 2] = Complex64::new(1.0, 0.0);
        let out = Fraunhofer::new()
            .propagate(&w, 1e-6, w.support(), WAVEL, 1e3)
            .unwrap();
        let mags = out.magnitude(mslice_core::ScaleMode::Linear);
        let first = mags[0];
        assert!(first > 0.0);
        assert!(mags.iter().all(|m| (m - first).abs() <= 1e-9 * first));
    }

    #[test]
    fn aperture_peak_is_on_axis() {
        let n = 32;
        let w = Wavefront::from_fn(n, 1e-6, |x, y| {
            if x.abs() <= 4e-6 && y.abs() <= 4e-6 {
                Complex64::new(1.0, 0.0)
            } else {
                Complex64::default()
            }
        })
        .unwrap();
        let out = Fraunhofer::new()
            .propagate(&w, 1e-6, w.support(), WAVEL, 1e3)
            .unwrap();
        assert_eq!(out.extrema().argmax, (n / 2, n / 2));
    }

    #[test]
    fn conserves_power() {
        let w = mslice_test_utils::fixtures::gaussian_beam(32, 1e-6, 4e-6);
        let out = Fraunhofer::new()
            .propagate(&w, 1e-6, w.support(), WAVEL, 1e3)
            .unwrap();
        let rel = (out.power() - w.power()).abs() / w.power();
        assert!(rel < 1e-9, "relative power change {rel}");
    }
}
