//! Propagator kernel contract and diffraction regime selection.
//!
//! The [`Propagator`] trait is the fixed call contract every free-space
//! kernel implements; [`KernelSet`] maps each [`Regime`](mslice_core::Regime)
//! to a kernel. [`decide`] picks the regime that is numerically valid for
//! a distance/sampling/support/wavelength tuple.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod propagator;
pub mod selector;

pub use propagator::{KernelSet, Propagator};
pub use selector::{decide, decide_and_report, RegimeDecision, FRESNEL_THRESHOLD};
