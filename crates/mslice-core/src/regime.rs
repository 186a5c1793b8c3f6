//! Diffraction regimes and multislice pipeline stages.

use std::fmt;

/// Which approximation of the scalar diffraction integral is valid for a
/// given distance, sampling, and support.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Regime {
    /// Fourier-domain transfer function (near field, coarse sampling).
    TransferFunction,
    /// Single-FFT Fresnel integral (near/intermediate field, fine sampling).
    SingleFourierTransform,
    /// Far-field Fraunhofer integral.
    Fraunhofer,
}

impl Regime {
    /// All regimes, in selection-preference order.
    pub const ALL: [Regime; 3] = [
        Regime::TransferFunction,
        Regime::SingleFourierTransform,
        Regime::Fraunhofer,
    ];

    /// Human-readable name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::TransferFunction => "Transfer Function",
            Self::SingleFourierTransform => "Single Fourier Transform",
            Self::Fraunhofer => "Fraunhofer",
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One stage of a multislice run.
///
/// Stages always execute in declaration order: `Pre`, `Through`, `Post`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    /// Free-space propagation before the object.
    Pre,
    /// Alternating slice modulation and propagation through the object.
    Through,
    /// Free-space propagation after the object.
    Post,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pre => write!(f, "pre-object"),
            Self::Through => write!(f, "through-object"),
            Self::Post => write!(f, "post-object"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regime_names_are_distinct() {
        let names: Vec<_> = Regime::ALL.iter().map(|r| r.name()).collect();
        assert_eq!(names.len(), 3);
        assert_ne!(names[0], names[1]);
        assert_ne!(names[1], names[2]);
        assert_eq!(Regime::Fraunhofer.to_string(), "Fraunhofer");
    }

    #[test]
    fn stages_order_pre_through_post() {
        assert!(Stage::Pre < Stage::Through);
        assert!(Stage::Through < Stage::Post);
    }
}
