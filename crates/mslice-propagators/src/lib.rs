//! Reference diffraction kernels for the mslice multislice simulator.
//!
//! Provides FFT implementations of the three free-space kernels the
//! regime selector chooses between, and [`FourierKernels`], the
//! [`KernelSet`](mslice_propagator::KernelSet) that wires them up:
//!
//! | Regime | Kernel | Output pitch |
//! |--------|--------|--------------|
//! | `TransferFunction` | [`TransferFunction`] | unchanged |
//! | `SingleFourierTransform` | [`SingleFourierTransform`] | `λz / L` |
//! | `Fraunhofer` | [`Fraunhofer`] | `λz / L` |
//!
//! All kernels use centred coordinates (`x = (j - n/2) · dx`) and the
//! `exp(-iωt)` convention, with the constant phase `exp(ikz)` omitted.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fft2;
pub mod fraunhofer;
pub mod kernels;
pub mod single_fourier;
pub mod transfer_function;

pub use fft2::Fft2;
pub use fraunhofer::Fraunhofer;
pub use kernels::FourierKernels;
pub use single_fourier::SingleFourierTransform;
pub use transfer_function::TransferFunction;
