//! Core types and diagnostics for the mslice multislice simulator.
//!
//! This is the leaf crate of the workspace. It defines the sampled
//! [`Wavefront`], the per-slice [`Material`] and [`PatternMask`] arrays,
//! the propagation [`Regime`] and pipeline [`Stage`] enums, the
//! [`OpticsError`] taxonomy, and the [`DiagnosticSink`] through which the
//! numeric core reports what it decided.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod event;
pub mod material;
pub mod regime;
pub mod wavefront;

pub use error::OpticsError;
pub use event::{DiagnosticEvent, DiagnosticSink, LogSink, NullSink};
pub use material::{Material, PatternMask};
pub use num_complex::Complex64;
pub use regime::{Regime, Stage};
pub use wavefront::{Extrema, ScaleMode, Wavefront};
