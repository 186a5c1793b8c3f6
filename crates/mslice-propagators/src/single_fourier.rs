//! One-step (single-FFT) Fresnel propagator.
//!
//! ```text
//! u1'(x1) = u1(x1) · exp(ik x1² / 2z)
//! u2(x2)  = exp(ik x2² / 2z) / (iλz) · FT[u1'](x2 / λz) · dx1²
//! ```
//!
//! Valid in the near/intermediate field when the sampling is fine relative
//! to `λz / L`. The output plane is sampled at `λz / L`.

use std::f64::consts::PI;

use mslice_core::{Complex64, OpticsError, Wavefront};
use mslice_propagator::Propagator;

use crate::fft2::{centred, Fft2};
use crate::kernels::{single_fft_plane, validate_call};

/// Single-Fourier-transform Fresnel propagator.
#[derive(Clone, Debug, Default)]
pub struct SingleFourierTransform {
    fft: Fft2,
}

impl SingleFourierTransform {
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

impl Propagator for SingleFourierTransform {
    fn name(&self) -> &str {
        "SingleFourierTransform"
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
        let k = 2.0 * PI / wavelength;
        let chirp = k / (2.0 * distance);

        let samples = wavefront.samples();
        let mut prepared = Vec::with_capacity(n * n);
        for r in 0..n {
            let y = centred(r, n, sampling);
            for c in 0..n {
                let x = centred(c, n, sampling);
                prepared.push(samples[r * n + c] * Complex64::cis(chirp * (x * x + y * y)));
            }
        }
        single_fft_plane(
            &self.fft,
            wavefront,
            prepared,
            sampling,
            support,
            wavelength,
            distance,
        )
    }
}
