//! Multislice propagation engine.
//!
//! Provides the [`MultisliceEngine`] that drives a wavefront through a
//! thick [`OpticalElement`], the [`modulate`] functions for thin-slice
//! transmission, the [`StepPlanner`] that sizes the slice stack, and a
//! [`BatchRunner`] for running independent propagations in parallel.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod batched;
pub mod config;
pub mod metrics;
pub mod modulate;
pub mod multislice;
pub mod plan;
pub mod planner;

pub use batched::{BatchError, BatchJob, BatchRunner};
pub use config::{
    BatchConfig, ConfigError, EngineConfig, PropagationSetup, ReportingMode, StepCount,
};
pub use metrics::RunMetrics;
pub use modulate::{
    modify, modify_two_materials_axial, modify_two_materials_lateral, SliceTransmission,
};
pub use multislice::{MultisliceEngine, OpticalElement, RunOutput};
pub use plan::{PlannedStage, StagePlan};
pub use planner::{StepPlanner, StepsPlan};
