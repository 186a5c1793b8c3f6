//! The [`Propagator`] and [`KernelSet`] traits.
//!
//! A propagator advances a wavefront through free space by a fixed
//! distance. Kernels are stateless numerical primitives: the engine
//! selects one per stage and calls it with the stage's distance.

use mslice_core::{OpticsError, Regime, Wavefront};

/// A free-space diffraction kernel.
///
/// # Contract
///
/// - The returned wavefront has the same side length as the input and is
///   complex-valued; only its pitch may differ (output-plane sampling).
/// - The input is never mutated.
/// - `propagate()` is deterministic: same inputs produce identical
///   outputs, bit for bit.
///
/// # Object safety
///
/// This trait is object-safe; kernel sets hand out `&dyn Propagator`.
///
/// # Examples
///
/// A kernel that ignores diffraction entirely:
///
/// ```
/// use mslice_core::{OpticsError, Wavefront};
/// use mslice_propagator::Propagator;
///
/// struct Passthrough;
///
/// impl Propagator for Passthrough {
///     fn name(&self) -> &str { "passthrough" }
///
///     fn propagate(
///         &self,
///         wavefront: &Wavefront,
///         _sampling: f64,
///         _support: f64,
///         _wavelength: f64,
///         _distance: f64,
///     ) -> Result<Wavefront, OpticsError> {
///         Ok(wavefront.clone())
///     }
/// }
///
/// let w = Wavefront::plane(4, 1e-6).unwrap();
/// let out = Passthrough.propagate(&w, 1e-6, 4e-6, 1e-10, 1e-3).unwrap();
/// assert_eq!(out, w);
/// ```
pub trait Propagator: Send + Sync {
    /// Human-readable name for diagnostics.
    fn name(&self) -> &str;

    /// Propagate `wavefront` by `distance`.
    ///
    /// `sampling` and `support` describe the input plane; they are passed
    /// explicitly so callers control the frame the kernel works in.
    fn propagate(
        &self,
        wavefront: &Wavefront,
        sampling: f64,
        support: f64,
        wavelength: f64,
        distance: f64,
    ) -> Result<Wavefront, OpticsError>;
}

/// Maps each [`Regime`] to the kernel implementing it.
pub trait KernelSet: Send + Sync {
    /// The kernel for `regime`.
    fn kernel(&self, regime: Regime) -> &dyn Propagator;
}

impl<K: KernelSet + ?Sized> KernelSet for std::sync::Arc<K> {
    fn kernel(&self, regime: Regime) -> &dyn Propagator {
        (**self).kernel(regime)
    }
}

impl<K: KernelSet + ?Sized> KernelSet for &K {
    fn kernel(&self, regime: Regime) -> &dyn Propagator {
        (**self).kernel(regime)
    }
}
