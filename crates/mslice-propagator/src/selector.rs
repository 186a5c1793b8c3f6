//! Diffraction regime selection.
//!
//! The choice is a pure function of `(distance, sampling, support,
//! wavelength)`:
//!
//! ```text
//! N_F      = support² / (wavelength · distance)
//! critical = wavelength · distance / support
//!
//! N_F > 0.1 and sampling > critical  → TransferFunction
//! N_F > 0.1 and sampling <= critical → SingleFourierTransform
//! otherwise                          → Fraunhofer
//! ```
//!
//! Nothing is cached; every call recomputes the decision.

use mslice_core::error::{check_distance, check_positive, check_wavelength};
use mslice_core::{DiagnosticEvent, DiagnosticSink, OpticsError, Regime};

/// Fresnel number above which the near/intermediate-field kernels apply.
pub const FRESNEL_THRESHOLD: f64 = 0.1;

/// The outcome of [`decide`]: the regime plus the quantities it was
/// derived from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegimeDecision {
    /// The selected regime.
    pub regime: Regime,
    /// `support² / (wavelength · distance)`.
    pub fresnel_number: f64,
    /// `wavelength · distance / support`.
    pub critical_sampling: f64,
}

impl RegimeDecision {
    /// The diagnostic record for this decision.
    pub fn event(&self, distance: f64) -> DiagnosticEvent {
        DiagnosticEvent::RegimeSelected {
            distance,
            fresnel_number: self.fresnel_number,
            critical_sampling: self.critical_sampling,
            regime: self.regime,
        }
    }
}

/// Choose the diffraction regime for one propagation distance.
///
/// # Errors
///
/// - [`OpticsError::InvalidDistance`] if `distance` is zero, negative or
///   not finite. A zero distance means "skip the stage" and must not
///   reach the selector.
/// - [`OpticsError::InvalidWavelength`] if `wavelength <= 0`.
/// - [`OpticsError::InvalidParameter`] if `sampling` or `support` is not
///   strictly positive.
pub fn decide(
    distance: f64,
    sampling: f64,
    support: f64,
    wavelength: f64,
) -> Result<RegimeDecision, OpticsError> {
    check_distance(distance)?;
    check_wavelength(wavelength)?;
    check_positive("sampling", sampling)?;
    check_positive("support", support)?;

    let fresnel_number = support * support / (wavelength * distance);
    let critical_sampling = wavelength * distance / support;

    let regime = if fresnel_number > FRESNEL_THRESHOLD {
        if sampling > critical_sampling {
            Regime::TransferFunction
        } else {
            Regime::SingleFourierTransform
        }
    } else {
        Regime::Fraunhofer
    };

    Ok(RegimeDecision {
        regime,
        fresnel_number,
        critical_sampling,
    })
}

/// [`decide`], then report the decision to `sink`.
///
/// Nothing is recorded when validation fails.
pub fn decide_and_report(
    distance: f64,
    sampling: f64,
    support: f64,
    wavelength: f64,
    sink: &dyn DiagnosticSink,
) -> Result<RegimeDecision, OpticsError> {
    let decision = decide(distance, sampling, support, wavelength)?;
    sink.record(&decision.event(distance));
    Ok(decision)
}
