//! The multislice engine.
//!
//! [`MultisliceEngine::run`] propagates a wavefront through an
//! [`OpticalElement`] as a linear state machine:
//!
//! ```text
//! Pre ──▶ Through[N] ──▶ Post ──▶ Done
//! ```
//!
//! `Pre` and `Post` are single free-space steps and are skipped when
//! their distance is zero. `Through` alternates slice modulation with a
//! free-space step of `thickness / N`, N times. Every stage's regime is
//! fixed in the [`StagePlan`] before the first step runs.
//!
//! The engine holds no per-run state. One engine can serve many runs, in
//! sequence or from several threads at once.

use std::sync::Arc;
use std::time::Instant;

use mslice_core::error::check_positive;
use mslice_core::{
    DiagnosticEvent, DiagnosticSink, Material, NullSink, OpticsError, PatternMask, Stage,
    Wavefront,
};
use mslice_propagator::KernelSet;

use crate::config::{EngineConfig, PropagationSetup, ReportingMode, StepCount};
use crate::metrics::RunMetrics;
use crate::modulate::SliceTransmission;
use crate::plan::{PlannedStage, StagePlan};

// ── OpticalElement ─────────────────────────────────────────────────

/// A thick element: where the material is, what it is, how thick it is.
///
/// The material occupies `pattern`; the complement is vacuum.
#[derive(Clone, Debug, PartialEq)]
pub struct OpticalElement {
    pattern: PatternMask,
    material: Material,
    thickness: f64,
}

impl OpticalElement {
    /// # Errors
    ///
    /// [`OpticsError::ShapeMismatch`] if `pattern` and `material` cover
    /// different grids; [`OpticsError::InvalidParameter`] for a
    /// non-positive thickness.
    pub fn new(
        pattern: PatternMask,
        material: Material,
        thickness: f64,
    ) -> Result<Self, OpticsError> {
        OpticsError::check_len("material", pattern.len(), material.len())?;
        check_positive("thickness", thickness)?;
        Ok(Self {
            pattern,
            material,
            thickness,
        })
    }

    /// Occupancy of the material.
    pub fn pattern(&self) -> &PatternMask {
        &self.pattern
    }

    /// Optical constants of the material.
    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Thickness along the optical axis, in metres.
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    /// Number of grid samples covered.
    pub fn len(&self) -> usize {
        self.pattern.len()
    }

    /// Whether the element covers no samples.
    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }

    /// Transmission of one slice of thickness `distance`.
    fn slice_transmission(
        &self,
        distance: f64,
        wavelength: f64,
    ) -> Result<SliceTransmission, OpticsError> {
        SliceTransmission::two_materials_lateral(
            distance,
            wavelength,
            &self.pattern,
            &self.material,
            &self.pattern.complement(),
            &Material::vacuum(self.len()),
        )
    }
}

// ── RunOutput ──────────────────────────────────────────────────────

/// Everything a run produces.
#[derive(Clone, Debug)]
pub struct RunOutput {
    /// The propagated field. Never aliases the input.
    pub wavefront: Wavefront,
    /// The plan that was executed.
    pub plan: StagePlan,
    /// Timing and work counts.
    pub metrics: RunMetrics,
}

// ── EngineState ────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EngineState {
    Pre,
    Through,
    Post,
    Done,
}

impl EngineState {
    fn stage(self) -> Option<Stage> {
        match self {
            Self::Pre => Some(Stage::Pre),
            Self::Through => Some(Stage::Through),
            Self::Post => Some(Stage::Post),
            Self::Done => None,
        }
    }

    fn next(self) -> Self {
        match self {
            Self::Pre => Self::Through,
            Self::Through => Self::Post,
            Self::Post | Self::Done => Self::Done,
        }
    }
}

// ── MultisliceEngine ───────────────────────────────────────────────

/// Runs multislice propagations with a fixed kernel set and config.
pub struct MultisliceEngine<K> {
    config: EngineConfig,
    kernels: K,
    sink: Arc<dyn DiagnosticSink>,
}

impl<K: KernelSet> MultisliceEngine<K> {
    /// Engine that discards diagnostics.
    pub fn new(config: EngineConfig, kernels: K) -> Self {
        Self {
            config,
            kernels,
            sink: Arc::new(NullSink),
        }
    }

    /// Route diagnostics to `sink`.
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// The engine's configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The kernel set.
    pub fn kernels(&self) -> &K {
        &self.kernels
    }

    /// Plan a run without executing it.
    ///
    /// The grid pitch is `input.step_xy()` and the support is
    /// `input.support()`. With [`StepCount::Auto`] the slice count comes
    /// from the configured [`StepPlanner`](crate::planner::StepPlanner)
    /// and a [`DiagnosticEvent::StepsPlanned`] is recorded.
    ///
    /// # Errors
    ///
    /// Setup validation errors, a shape mismatch between `input` and
    /// `element`, and any planner or selector error.
    pub fn plan(
        &self,
        input: &Wavefront,
        element: &OpticalElement,
        setup: &PropagationSetup,
    ) -> Result<StagePlan, OpticsError> {
        setup.validate()?;
        OpticsError::check_len("optical element", input.len(), element.len())?;
        let sampling = input.step_xy();
        let steps = match setup.steps {
            StepCount::Fixed(n) => n,
            StepCount::Auto => {
                self.config
                    .planner
                    .plan_and_report(sampling, setup.wavelength, element.thickness(), &*self.sink)?
                    .steps
            }
        };
        StagePlan::build(
            sampling,
            input.support(),
            setup.wavelength,
            setup.pre_distance,
            element.thickness(),
            steps,
            setup.post_distance,
        )
    }

    /// Propagate `input` through `element`.
    ///
    /// `input` is never modified; the returned wavefront is a new buffer.
    /// Quiet and verbose reporting produce bit-identical results.
    ///
    /// # Errors
    ///
    /// Any planning error (before the first step), or the first error a
    /// kernel returns, unchanged.
    pub fn run(
        &self,
        input: &Wavefront,
        element: &OpticalElement,
        setup: &PropagationSetup,
    ) -> Result<RunOutput, OpticsError> {
        let run_start = Instant::now();
        let plan = self.plan(input, element, setup)?;
        let mut metrics = RunMetrics::default();
        let mut field = input.clone();

        let mut state = EngineState::Pre;
        while let Some(stage) = state.stage() {
            if let Some(planned) = plan.stage(stage) {
                let stage_start = Instant::now();
                field = self.run_stage(planned, field, element, input, setup, &mut metrics)?;
                metrics
                    .stage_us
                    .insert(stage, stage_start.elapsed().as_micros() as u64);
            }
            state = state.next();
        }
        debug_assert_eq!(state, EngineState::Done);

        metrics.total_us = run_start.elapsed().as_micros() as u64;
        Ok(RunOutput {
            wavefront: field,
            plan,
            metrics,
        })
    }

    fn run_stage(
        &self,
        planned: &PlannedStage,
        mut field: Wavefront,
        element: &OpticalElement,
        input: &Wavefront,
        setup: &PropagationSetup,
        metrics: &mut RunMetrics,
    ) -> Result<Wavefront, OpticsError> {
        let sink = &*self.sink;
        sink.record(&DiagnosticEvent::StageEntered {
            stage: planned.stage,
            object_label: self.config.object_label.clone(),
            distance: planned.distance,
            steps: planned.steps,
        });
        sink.record(&planned.decision.event(planned.distance));

        let slice = match planned.stage {
            Stage::Through => Some(element.slice_transmission(planned.distance, setup.wavelength)?),
            Stage::Pre | Stage::Post => None,
        };
        let kernel = self.kernels.kernel(planned.regime());
        let verbose = self.config.reporting_mode == ReportingMode::Verbose;

        for index in 1..=planned.steps {
            if let Some(slice) = &slice {
                field = slice.apply(&field)?;
                metrics.modulations += 1;
            }
            field = kernel.propagate(
                &field,
                input.step_xy(),
                input.support(),
                setup.wavelength,
                planned.distance,
            )?;
            metrics.kernel_calls += 1;
            if verbose && slice.is_some() {
                sink.record(&DiagnosticEvent::StepProgress {
                    index,
                    total: planned.steps,
                });
            }
        }
        Ok(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mslice_core::Complex64;
    use mslice_core::Regime;
    use mslice_test_utils::fixtures::{disk_pattern, gaussian_beam};
    use mslice_test_utils::{MockKernels, RecordingSink, ScaleKernel};

    const N: usize = 16;
    const DX: f64 = 1e-8;
    const WAVEL: f64 = 1e-10;

    fn element() -> OpticalElement {
        OpticalElement::new(
            disk_pattern(N, 4.0),
            Material::uniform(N * N, 1e-6, 1e-8).unwrap(),
            1e-6,
        )
        .unwrap()
    }

    #[test]
    fn state_machine_visits_every_state_once() {
        let mut state = EngineState::Pre;
        let mut seen = vec![];
        while let Some(stage) = state.stage() {
            seen.push(stage);
            state = state.next();
        }
        assert_eq!(seen, vec![Stage::Pre, Stage::Through, Stage::Post]);
        assert_eq!(EngineState::Done.next(), EngineState::Done);
    }

    #[test]
    fn element_rejects_mismatched_material() {
        let err =
            OpticalElement::new(PatternMask::empty(4), Material::vacuum(5), 1e-6).unwrap_err();
        assert!(matches!(err, OpticsError::ShapeMismatch { .. }));
        assert!(OpticalElement::new(PatternMask::empty(4), Material::vacuum(4), 0.0).is_err());
    }

    #[test]
    fn through_only_calls_kernel_n_times() {
        let engine = MultisliceEngine::new(EngineConfig::default(), MockKernels::identity());
        let input = gaussian_beam(N, DX, 4.0 * DX);
        let setup = PropagationSetup::through_only(WAVEL, StepCount::Fixed(5));
        let out = engine.run(&input, &element(), &setup).unwrap();
        let calls = engine.kernels().calls();
        assert_eq!(calls.len(), 5);
        assert!(calls.iter().all(|c| c.distance == 1e-6 / 5.0));
        assert_eq!(out.metrics.kernel_calls, 5);
        assert_eq!(out.metrics.modulations, 5);
        assert_eq!(out.metrics.stages_run().collect::<Vec<_>>(), vec![Stage::Through]);
    }

    #[test]
    fn free_space_stages_do_not_modulate() {
        let kernels = MockKernels::identity().with_kernel(
            Regime::Fraunhofer,
            ScaleKernel::new("ff", Complex64::new(2.0, 0.0)),
        );
        let engine = MultisliceEngine::new(EngineConfig::default(), kernels);
        let input = gaussian_beam(N, DX, 4.0 * DX);
        let setup = PropagationSetup {
            wavelength: WAVEL,
            steps: StepCount::Fixed(2),
            pre_distance: 1.0,
            post_distance: 1.0,
        };
        let out = engine.run(&input, &element(), &setup).unwrap();
        assert_eq!(out.metrics.kernel_calls, 4);
        assert_eq!(out.metrics.modulations, 2);
        let regimes: Vec<_> = engine.kernels().calls().iter().map(|c| c.regime).collect();
        assert_eq!(
            regimes,
            vec![
                Regime::Fraunhofer,
                Regime::TransferFunction,
                Regime::TransferFunction,
                Regime::Fraunhofer,
            ]
        );
    }

    #[test]
    fn stage_events_come_before_progress() {
        let sink = Arc::new(RecordingSink::new());
        let engine = MultisliceEngine::new(
            EngineConfig::default().with_reporting(ReportingMode::Verbose),
            MockKernels::identity(),
        )
        .with_sink(sink.clone());
        let input = gaussian_beam(N, DX, 4.0 * DX);
        let setup = PropagationSetup::through_only(WAVEL, StepCount::Fixed(2));
        engine.run(&input, &element(), &setup).unwrap();
        let events = sink.events();
        assert!(matches!(
            events[0],
            DiagnosticEvent::StageEntered { stage: Stage::Through, steps: 2, .. }
        ));
        assert!(matches!(
            events[1],
            DiagnosticEvent::RegimeSelected { regime: Regime::TransferFunction, .. }
        ));
        assert_eq!(
            &events[2..],
            &[
                DiagnosticEvent::StepProgress { index: 1, total: 2 },
                DiagnosticEvent::StepProgress { index: 2, total: 2 },
            ]
        );
    }

    #[test]
    fn mismatched_element_rejected_before_any_kernel_call() {
        let engine = MultisliceEngine::new(EngineConfig::default(), MockKernels::identity());
        let input = gaussian_beam(8, DX, 4.0 * DX);
        let setup = PropagationSetup::through_only(WAVEL, StepCount::Fixed(2));
        let err = engine.run(&input, &element(), &setup).unwrap_err();
        assert!(matches!(err, OpticsError::ShapeMismatch { what: "optical element", .. }));
        assert!(engine.kernels().calls().is_empty());
    }
}
