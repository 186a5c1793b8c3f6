//! Structured diagnostic events and the sink they are routed through.
//!
//! The numeric core never writes to the console. Regime decisions, step
//! planning, stage transitions and per-step progress are reported as
//! [`DiagnosticEvent`]s to an injected [`DiagnosticSink`], so the core
//! runs headless inside batch workers.

use crate::regime::{Regime, Stage};

/// A structured record emitted by the numeric core.
#[derive(Clone, Debug, PartialEq)]
pub enum DiagnosticEvent {
    /// The selector chose a diffraction regime.
    RegimeSelected {
        /// Propagation distance the decision was made for.
        distance: f64,
        /// `support² / (wavelength · distance)`.
        fresnel_number: f64,
        /// `wavelength · distance / support`.
        critical_sampling: f64,
        /// The chosen regime.
        regime: Regime,
    },
    /// The step planner sized the through-object stage.
    StepsPlanned {
        /// Suggested axial step `Δz`.
        suggested_step: f64,
        /// Number of slices, including the safety margin.
        steps: usize,
    },
    /// The engine entered a stage.
    StageEntered {
        /// Which stage.
        stage: Stage,
        /// Label of the object being propagated through.
        object_label: String,
        /// Per-step distance for this stage.
        distance: f64,
        /// Number of propagation steps the stage will run.
        steps: usize,
    },
    /// One through-object step completed (verbose reporting only).
    StepProgress {
        /// 1-based index of the completed step.
        index: usize,
        /// Total steps in the stage.
        total: usize,
    },
}

/// Receiver for [`DiagnosticEvent`]s.
///
/// Implementations must not influence control flow; the engine ignores
/// anything a sink does. `Send + Sync` so one sink can be shared by every
/// worker of a batch.
pub trait DiagnosticSink: Send + Sync {
    /// Handle one event.
    fn record(&self, event: &DiagnosticEvent);
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn record(&self, _event: &DiagnosticEvent) {}
}

/// Forwards events to the [`log`] facade.
///
/// Decisions and stage transitions log at `info`; per-step progress logs
/// at `debug`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn record(&self, event: &DiagnosticEvent) {
        match event {
            DiagnosticEvent::RegimeSelected {
                distance,
                fresnel_number,
                regime,
                ..
            } => log::info!(
                target: "mslice",
                "propagator for dz={distance:e}: {regime} (Fresnel number {fresnel_number:e})"
            ),
            DiagnosticEvent::StepsPlanned {
                suggested_step,
                steps,
            } => log::info!(
                target: "mslice",
                "suggested step size {suggested_step:e}, {steps} steps through object"
            ),
            DiagnosticEvent::StageEntered {
                stage,
                object_label,
                distance,
                steps,
            } => log::info!(
                target: "mslice",
                "{stage} propagation ({object_label}): {steps} x {distance:e}"
            ),
            DiagnosticEvent::StepProgress { index, total } => {
                log::debug!(target: "mslice", "step {index}/{total}")
            }
        }
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for std::sync::Arc<S> {
    fn record(&self, event: &DiagnosticEvent) {
        (**self).record(event)
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    fn record(&self, event: &DiagnosticEvent) {
        (**self).record(event)
    }
}
