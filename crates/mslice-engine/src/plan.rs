//! Stage planning.
//!
//! A [`StagePlan`] fixes everything about a run before any field is
//! touched: which stages execute, their per-step distance, step count,
//! and regime. Regimes are chosen once per stage, so every step of a
//! stage uses the same kernel. Planning fails fast, so an invalid
//! geometry is rejected before the first FFT.

use mslice_core::error::check_positive;
use mslice_core::{OpticsError, Regime, Stage};
use mslice_propagator::{decide, RegimeDecision};
use smallvec::SmallVec;

/// One stage of a planned run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlannedStage {
    /// Which stage.
    pub stage: Stage,
    /// Propagation distance of one step.
    pub distance: f64,
    /// Number of steps; 1 for the free-space stages.
    pub steps: usize,
    /// Regime chosen for `distance`.
    pub decision: RegimeDecision,
}

impl PlannedStage {
    /// Shortcut for `decision.regime`.
    pub fn regime(&self) -> Regime {
        self.decision.regime
    }
}

/// The ordered stages of one run. Skipped stages are absent.
#[derive(Clone, Debug, PartialEq)]
pub struct StagePlan {
    stages: SmallVec<[PlannedStage; 3]>,
}

impl StagePlan {
    /// Plan a pre / through / post run on a grid of the given pitch and
    /// support.
    ///
    /// A zero `pre_distance` or `post_distance` skips that stage. The
    /// through stage always runs with `thickness / steps` per step.
    ///
    /// # Errors
    ///
    /// Whatever [`decide`] reports for any stage, and
    /// [`OpticsError::InvalidParameter`] for a non-positive thickness or
    /// zero steps.
    pub fn build(
        sampling: f64,
        support: f64,
        wavelength: f64,
        pre_distance: f64,
        thickness: f64,
        steps: usize,
        post_distance: f64,
    ) -> Result<Self, OpticsError> {
        check_positive("thickness", thickness)?;
        if steps == 0 {
            return Err(OpticsError::invalid_parameter(
                "number of slices must be at least 1",
            ));
        }

        let mut stages: SmallVec<[PlannedStage; 3]> = SmallVec::new();
        let mut push = |stage: Stage, distance: f64, steps: usize| -> Result<(), OpticsError> {
            let decision = decide(distance, sampling, support, wavelength)?;
            stages.push(PlannedStage {
                stage,
                distance,
                steps,
                decision,
            });
            Ok(())
        };

        if pre_distance != 0.0 {
            push(Stage::Pre, pre_distance, 1)?;
        }
        push(Stage::Through, thickness / steps as f64, steps)?;
        if post_distance != 0.0 {
            push(Stage::Post, post_distance, 1)?;
        }

        Ok(Self { stages })
    }

    /// All planned stages, in execution order.
    pub fn stages(&self) -> &[PlannedStage] {
        &self.stages
    }

    /// The planned entry for `stage`, if it runs.
    pub fn stage(&self, stage: Stage) -> Option<&PlannedStage> {
        self.stages.iter().find(|s| s.stage == stage)
    }

    /// Total kernel invocations the run will make.
    pub fn kernel_calls(&self) -> usize {
        self.stages.iter().map(|s| s.steps).sum()
    }
}
