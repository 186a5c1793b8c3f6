//! Error types for the mslice numeric core.
//!
//! Every pure function in the workspace validates its inputs at the
//! boundary and reports contract violations through [`OpticsError`].
//! None of these errors are transient: callers should not retry them.

use std::error::Error;
use std::fmt;

/// Validation failures raised by the selector, modulators, planner,
/// kernels and engine.
#[derive(Clone, Debug, PartialEq)]
pub enum OpticsError {
    /// Wavelength is zero, negative, or not finite.
    InvalidWavelength {
        /// The rejected wavelength.
        value: f64,
    },
    /// A propagation distance is zero where a nonzero distance is
    /// required, negative, or not finite.
    InvalidDistance {
        /// The rejected distance.
        value: f64,
    },
    /// A scalar parameter (thickness, sampling, support, step count,
    /// accuracy target, axial fraction) is out of range.
    InvalidParameter {
        /// Description of the violated constraint.
        reason: String,
    },
    /// A material, pattern, or wavefront array does not match the
    /// lateral grid it is combined with.
    ShapeMismatch {
        /// Which array was rejected.
        what: &'static str,
        /// Number of samples the grid requires.
        expected: usize,
        /// Number of samples supplied.
        actual: usize,
    },
}

impl OpticsError {
    /// Shorthand for an [`OpticsError::InvalidParameter`] with a message.
    pub fn invalid_parameter(reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            reason: reason.into(),
        }
    }

    /// Reject `actual` unless it equals `expected`.
    pub fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<(), Self> {
        if expected == actual {
            Ok(())
        } else {
            Err(Self::ShapeMismatch {
                what,
                expected,
                actual,
            })
        }
    }
}

impl fmt::Display for OpticsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidWavelength { value } => {
                write!(f, "wavelength must be finite and positive, got {value}")
            }
            Self::InvalidDistance { value } => {
                write!(f, "distance must be finite and positive, got {value}")
            }
            Self::InvalidParameter { reason } => write!(f, "invalid parameter: {reason}"),
            Self::ShapeMismatch {
                what,
                expected,
                actual,
            } => write!(
                f,
                "{what} has {actual} samples, grid requires {expected}"
            ),
        }
    }
}

impl Error for OpticsError {}

/// Validate a wavelength: finite and strictly positive.
pub fn check_wavelength(wavelength: f64) -> Result<(), OpticsError> {
    if wavelength.is_finite() && wavelength > 0.0 {
        Ok(())
    } else {
        Err(OpticsError::InvalidWavelength { value: wavelength })
    }
}

/// Validate a propagation distance: finite and strictly positive.
pub fn check_distance(distance: f64) -> Result<(), OpticsError> {
    if distance.is_finite() && distance > 0.0 {
        Ok(())
    } else {
        Err(OpticsError::InvalidDistance { value: distance })
    }
}

/// Validate a named scalar: finite and strictly positive.
pub fn check_positive(name: &str, value: f64) -> Result<(), OpticsError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(OpticsError::invalid_parameter(format!(
            "{name} must be finite and positive, got {value}"
        )))
    }
}
