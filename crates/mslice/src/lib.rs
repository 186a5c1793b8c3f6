//! mslice: multislice simulation of coherent waves through thick optics.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all mslice sub-crates. For most users, adding `mslice` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use mslice::prelude::*;
//!
//! // A 64×64 plane wave at 10 nm pitch.
//! let input = Wavefront::plane(64, 1e-8).unwrap();
//!
//! // A 1 µm thick disk of material, vacuum elsewhere.
//! let pattern = PatternMask::from_predicate(64 * 64, |i| {
//!     let (x, y) = ((i % 64) as f64 - 32.0, (i / 64) as f64 - 32.0);
//!     x * x + y * y < 100.0
//! });
//! let material = Material::uniform(64 * 64, 3e-5, 2e-6).unwrap();
//! let element = OpticalElement::new(pattern, material, 1e-6).unwrap();
//!
//! let engine = MultisliceEngine::new(EngineConfig::default(), FourierKernels::new());
//! let setup = PropagationSetup {
//!     wavelength: 1e-10,
//!     steps: StepCount::Auto,
//!     pre_distance: 0.0,
//!     post_distance: 1e-4,
//! };
//! let out = engine.run(&input, &element, &setup).unwrap();
//! assert_eq!(out.wavefront.side(), 64);
//! assert_eq!(out.metrics.stages_run().count(), 2);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `mslice-core` | Wavefront, materials, regimes, errors, diagnostics |
//! | [`propagator`] | `mslice-propagator` | Kernel trait and regime selection |
//! | [`propagators`] | `mslice-propagators` | Reference FFT kernels |
//! | [`engine`] | `mslice-engine` | Modulation, step planning, the multislice engine, batches |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, errors and diagnostics (`mslice-core`).
///
/// Contains [`types::Wavefront`], [`types::Material`],
/// [`types::PatternMask`], [`types::OpticsError`] and the
/// [`types::DiagnosticSink`] trait.
pub use mslice_core as types;

/// Kernel contract and regime selection (`mslice-propagator`).
///
/// The [`propagator::Propagator`] trait is the extension point for
/// user-supplied diffraction kernels; [`propagator::decide`] picks the
/// regime for a distance.
pub use mslice_propagator as propagator;

/// Reference FFT kernels (`mslice-propagators`).
///
/// [`propagators::FourierKernels`] bundles [`propagators::TransferFunction`],
/// [`propagators::SingleFourierTransform`] and [`propagators::Fraunhofer`].
pub use mslice_propagators as propagators;

/// Slice modulation, step planning and the engine (`mslice-engine`).
///
/// [`engine::MultisliceEngine`] for single runs,
/// [`engine::BatchRunner`] for many independent runs in parallel.
pub use mslice_engine as engine;

/// Common imports for typical mslice usage.
///
/// ```rust
/// use mslice::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use mslice_core::{
        Complex64, Material, PatternMask, Regime, ScaleMode, Stage, Wavefront,
    };

    // Errors and diagnostics
    pub use mslice_core::{DiagnosticEvent, DiagnosticSink, LogSink, NullSink, OpticsError};

    // Kernels
    pub use mslice_propagator::{decide, KernelSet, Propagator};
    pub use mslice_propagators::FourierKernels;

    // Engine
    pub use mslice_engine::{
        BatchConfig, BatchJob, BatchRunner, EngineConfig, MultisliceEngine, OpticalElement,
        PropagationSetup, ReportingMode, RunMetrics, RunOutput, StepCount, StepPlanner,
    };
}
