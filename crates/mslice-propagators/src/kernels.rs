//! [`FourierKernels`] and the helpers shared by the single-FFT kernels.

use std::f64::consts::PI;

use mslice_core::error::{check_distance, check_positive, check_wavelength};
use mslice_core::{Complex64, OpticsError, Regime, Wavefront};
use mslice_propagator::{KernelSet, Propagator};

use crate::fft2::{centred, fftshift2, ifftshift2, Fft2};
use crate::{Fraunhofer, SingleFourierTransform, TransferFunction};

/// Reject calls that would divide by zero or produce NaNs.
pub(crate) fn validate_call(
    sampling: f64,
    support: f64,
    wavelength: f64,
    distance: f64,
) -> Result<(), OpticsError> {
    check_distance(distance)?;
    check_wavelength(wavelength)?;
    check_positive("sampling", sampling)?;
    check_positive("support", support)
}

/// Evaluate the single-FFT Fresnel/Fraunhofer integral
///
/// ```text
/// u2(x2) = exp(ik x2² / 2z) / (iλz) · FT[u1'](x2 / λz) · dx1²
/// ```
///
/// where `u1'` is the input field, already multiplied by any input-plane
/// chirp. The output pitch is `λz / L`.
pub(crate) fn single_fft_plane(
    fft: &Fft2,
    input: &Wavefront,
    prepared: Vec<Complex64>,
    sampling: f64,
    support: f64,
    wavelength: f64,
    distance: f64,
) -> Result<Wavefront, OpticsError> {
    let n = input.side();
    let k = 2.0 * PI / wavelength;
    let dx2 = wavelength * distance / support;

    let mut spectrum = ifftshift2(&prepared, n);
    fft.forward(&mut spectrum, n);
    let spectrum = fftshift2(&spectrum, n);

    let prefactor = Complex64::new(0.0, -1.0 / (wavelength * distance)) * (sampling * sampling);
    let mut out = Vec::with_capacity(n * n);
    for r in 0..n {
        let y = centred(r, n, dx2);
        for c in 0..n {
            let x = centred(c, n, dx2);
            let phase = Complex64::cis(k / (2.0 * distance) * (x * x + y * y));
            out.push(prefactor * phase * spectrum[r * n + c]);
        }
    }
    Wavefront::new(n, dx2, out)
}

/// The three reference FFT kernels, one per [`Regime`].
///
/// All three plan through one shared [`Fft2`], so each grid size is
/// planned once per kernel set.
#[derive(Clone, Debug)]
pub struct FourierKernels {
    transfer_function: TransferFunction,
    single_fourier: SingleFourierTransform,
    fraunhofer: Fraunhofer,
}

impl FourierKernels {
    /// Create the kernel set.
    pub fn new() -> Self {
        let fft = Fft2::new();
        Self {
            transfer_function: TransferFunction::with_fft(fft.clone()),
            single_fourier: SingleFourierTransform::with_fft(fft.clone()),
            fraunhofer: Fraunhofer::with_fft(fft),
        }
    }

    /// The plan cache shared by the three kernels.
    pub fn fft(&self) -> &Fft2 {
        self.transfer_function.fft()
    }
}

impl Default for FourierKernels {
    fn default() -> Self {
        Self::new()
    }
}

impl KernelSet for FourierKernels {
    fn kernel(&self, regime: Regime) -> &dyn Propagator {
        match regime {
            Regime::TransferFunction => &self.transfer_function,
            Regime::SingleFourierTransform => &self.single_fourier,
            Regime::Fraunhofer => &self.fraunhofer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_regime_maps_to_its_kernel() {
        let k = FourierKernels::new();
        assert_eq!(k.kernel(Regime::TransferFunction).name(), "TransferFunction");
        assert_eq!(
            k.kernel(Regime::SingleFourierTransform).name(),
            "SingleFourierTransform"
        );
        assert_eq!(k.kernel(Regime::Fraunhofer).name(), "Fraunhofer");
    }

    #[test]
    fn kernels_share_one_plan_cache() {
        let k = FourierKernels::new();
        assert!(k.fft().shares_plans_with(k.single_fourier.fft()));
        assert!(k.fft().shares_plans_with(k.fraunhofer.fft()));
        assert!(!k.fft().shares_plans_with(FourierKernels::new().fft()));
    }

    #[test]
    fn validate_call_orders_checks() {
        assert!(matches!(
            validate_call(1.0, 1.0, -1.0, 0.0),
            Err(OpticsError::InvalidDistance { .. })
        ));
        assert!(matches!(
            validate_call(1.0, 1.0, -1.0, 1.0),
            Err(OpticsError::InvalidWavelength { .. })
        ));
        assert!(matches!(
            validate_call(0.0, 1.0, 1.0, 1.0),
            Err(OpticsError::InvalidParameter { .. })
        ));
    }
}
