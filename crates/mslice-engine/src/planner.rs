//! Slice-count planning.
//!
//! The axial step must be short enough that a transverse feature of one
//! pixel does not diffract significantly within one slice. With two
//! accuracy parameters the suggested step is
//!
//! ```text
//! Δz = eps2 · dx² / (eps1² · λ)
//! ```
//!
//! and an element of thickness `T` gets `ceil(T / Δz) + 1` slices.

use mslice_core::error::{check_positive, check_wavelength};
use mslice_core::{DiagnosticEvent, DiagnosticSink, OpticsError};

/// Planner accuracy parameters. Both default to `0.1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepPlanner {
    eps1: f64,
    eps2: f64,
}

impl Default for StepPlanner {
    fn default() -> Self {
        Self {
            eps1: 0.1,
            eps2: 0.1,
        }
    }
}

impl StepPlanner {
    /// Planner with explicit accuracy parameters.
    ///
    /// # Errors
    ///
    /// [`OpticsError::InvalidParameter`] if either parameter is not a
    /// finite positive number.
    pub fn new(eps1: f64, eps2: f64) -> Result<Self, OpticsError> {
        check_positive("eps1", eps1)?;
        check_positive("eps2", eps2)?;
        Ok(Self { eps1, eps2 })
    }

    /// Transverse accuracy parameter.
    pub fn eps1(&self) -> f64 {
        self.eps1
    }

    /// Axial accuracy parameter.
    pub fn eps2(&self) -> f64 {
        self.eps2
    }

    /// Suggested axial step for the given transverse pitch.
    pub fn suggested_step(&self, sampling: f64, wavelength: f64) -> Result<f64, OpticsError> {
        check_positive("sampling", sampling)?;
        check_wavelength(wavelength)?;
        let step = self.eps2 * sampling * sampling / (self.eps1 * self.eps1 * wavelength);
        if step.is_finite() && step > 0.0 {
            Ok(step)
        } else {
            Err(OpticsError::invalid_parameter(format!(
                "suggested step is not representable (sampling {sampling}, wavelength {wavelength})"
            )))
        }
    }

    /// Number of slices for an element of the given thickness. Always `>= 1`.
    ///
    /// # Errors
    ///
    /// [`OpticsError::InvalidParameter`] for a non-positive pitch or
    /// thickness, or when the count does not fit in `usize`.
    /// [`OpticsError::InvalidWavelength`] for a bad wavelength.
    pub fn number_of_steps(
        &self,
        sampling: f64,
        wavelength: f64,
        thickness: f64,
    ) -> Result<usize, OpticsError> {
        self.plan(sampling, wavelength, thickness).map(|p| p.steps)
    }

    /// Suggested step and slice count together.
    pub fn plan(
        &self,
        sampling: f64,
        wavelength: f64,
        thickness: f64,
    ) -> Result<StepsPlan, OpticsError> {
        check_positive("thickness", thickness)?;
        let suggested_step = self.suggested_step(sampling, wavelength)?;
        let ratio = (thickness / suggested_step).ceil();
        // usize::MAX as f64 rounds up, so compare with >=.
        if !ratio.is_finite() || ratio >= usize::MAX as f64 {
            return Err(OpticsError::invalid_parameter(format!(
                "slice count for thickness {thickness} overflows"
            )));
        }
        let steps = (ratio as usize).checked_add(1).ok_or_else(|| {
            OpticsError::invalid_parameter(format!(
                "slice count for thickness {thickness} overflows"
            ))
        })?;
        Ok(StepsPlan {
            suggested_step,
            steps,
        })
    }

    /// [`plan`](Self::plan), recording a
    /// [`DiagnosticEvent::StepsPlanned`] on success.
    pub fn plan_and_report(
        &self,
        sampling: f64,
        wavelength: f64,
        thickness: f64,
        sink: &dyn DiagnosticSink,
    ) -> Result<StepsPlan, OpticsError> {
        let plan = self.plan(sampling, wavelength, thickness)?;
        sink.record(&DiagnosticEvent::StepsPlanned {
            suggested_step: plan.suggested_step,
            steps: plan.steps,
        });
        Ok(plan)
    }
}

/// Output of [`StepPlanner::plan`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepsPlan {
    /// Suggested axial step in metres.
    pub suggested_step: f64,
    /// Slice count, `ceil(thickness / suggested_step) + 1`.
    pub steps: usize,
}
