//! Thin-slice modulation.
//!
//! A slice of thickness `dz` made of a material with decrement `delta`
//! and absorption `beta` multiplies the field by
//!
//! ```text
//! t = exp(i·kz·delta) · exp(-kz·beta),   kz = 2π·dz / λ
//! ```
//!
//! Two-material slices compose either axially (the materials fill
//! fractions of the slice thickness one after the other, so their
//! transmissions multiply) or laterally (each pixel belongs to one
//! material, so the masked transmissions add).
//!
//! [`SliceTransmission`] holds a precomputed per-sample transmission so
//! the engine can apply the same slice N times without recomputing it.

use std::f64::consts::PI;

use mslice_core::error::check_wavelength;
use mslice_core::{Complex64, Material, OpticsError, PatternMask, Wavefront};

fn check_finite(name: &str, value: f64) -> Result<(), OpticsError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(OpticsError::invalid_parameter(format!(
            "{name} must be finite, got {value}"
        )))
    }
}

fn wavenumber_depth(distance: f64, wavelength: f64) -> Result<f64, OpticsError> {
    check_wavelength(wavelength)?;
    check_finite("slice distance", distance)?;
    Ok(2.0 * PI * distance / wavelength)
}

#[inline]
fn transmission(kz: f64, delta: f64, beta: f64) -> Complex64 {
    Complex64::cis(kz * delta) * (-kz * beta).exp()
}

/// Per-sample complex transmission of one slice.
#[derive(Clone, Debug, PartialEq)]
pub struct SliceTransmission {
    factors: Vec<Complex64>,
}

impl SliceTransmission {
    /// Single material filling the whole slice.
    pub fn single(
        material: &Material,
        distance: f64,
        wavelength: f64,
    ) -> Result<Self, OpticsError> {
        let kz = wavenumber_depth(distance, wavelength)?;
        let factors = material
            .delta()
            .iter()
            .zip(material.beta())
            .map(|(&d, &b)| transmission(kz, d, b))
            .collect();
        Ok(Self { factors })
    }

    /// Two materials stacked along the beam, occupying `frac_1` and
    /// `frac_2` of the slice thickness.
    ///
    /// `frac_1 + frac_2 == 1` is the physical case but is not enforced.
    pub fn two_materials_axial(
        distance: f64,
        wavelength: f64,
        frac_1: f64,
        frac_2: f64,
        material_1: &Material,
        material_2: &Material,
    ) -> Result<Self, OpticsError> {
        check_finite("frac_1", frac_1)?;
        check_finite("frac_2", frac_2)?;
        OpticsError::check_len("material_2", material_1.len(), material_2.len())?;
        let kz_1 = wavenumber_depth(distance * frac_1, wavelength)?;
        let kz_2 = wavenumber_depth(distance * frac_2, wavelength)?;
        let factors = (0..material_1.len())
            .map(|i| {
                transmission(kz_1, material_1.delta()[i], material_1.beta()[i])
                    * transmission(kz_2, material_2.delta()[i], material_2.beta()[i])
            })
            .collect();
        Ok(Self { factors })
    }

    /// Two materials occupying complementary lateral regions of the slice.
    ///
    /// Each sample's transmission is `p1·t1 + p2·t2`. With binary masks
    /// that partition the grid, every sample sees exactly one material.
    pub fn two_materials_lateral(
        distance: f64,
        wavelength: f64,
        pattern_1: &PatternMask,
        material_1: &Material,
        pattern_2: &PatternMask,
        material_2: &Material,
    ) -> Result<Self, OpticsError> {
        let n = material_1.len();
        OpticsError::check_len("pattern_1", n, pattern_1.len())?;
        OpticsError::check_len("pattern_2", n, pattern_2.len())?;
        OpticsError::check_len("material_2", n, material_2.len())?;
        let kz = wavenumber_depth(distance, wavelength)?;
        let (p1, p2) = (pattern_1.weights(), pattern_2.weights());
        let factors = (0..n)
            .map(|i| {
                transmission(kz, material_1.delta()[i], material_1.beta()[i]) * p1[i]
                    + transmission(kz, material_2.delta()[i], material_2.beta()[i]) * p2[i]
            })
            .collect();
        Ok(Self { factors })
    }

    /// Per-sample factors.
    pub fn factors(&self) -> &[Complex64] {
        &self.factors
    }

    /// `wavefront ⊙ t` as a new wavefront.
    ///
    /// # Errors
    ///
    /// [`OpticsError::ShapeMismatch`] if the transmission was built for a
    /// different grid.
    pub fn apply(&self, wavefront: &Wavefront) -> Result<Wavefront, OpticsError> {
        OpticsError::check_len("slice transmission", wavefront.len(), self.factors.len())?;
        let samples = wavefront
            .samples()
            .iter()
            .zip(&self.factors)
            .map(|(u, t)| u * t)
            .collect();
        wavefront.with_samples(samples)
    }
}

/// Modulate `wavefront` by one slice of a single material.
pub fn modify(
    wavefront: &Wavefront,
    material: &Material,
    distance: f64,
    wavelength: f64,
) -> Result<Wavefront, OpticsError> {
    OpticsError::check_len("material", wavefront.len(), material.len())?;
    SliceTransmission::single(material, distance, wavelength)?.apply(wavefront)
}

/// Modulate `wavefront` by a slice of two axially stacked materials.
pub fn modify_two_materials_axial(
    wavefront: &Wavefront,
    distance: f64,
    wavelength: f64,
    frac_1: f64,
    frac_2: f64,
    material_1: &Material,
    material_2: &Material,
) -> Result<Wavefront, OpticsError> {
    OpticsError::check_len("material_1", wavefront.len(), material_1.len())?;
    SliceTransmission::two_materials_axial(
        distance, wavelength, frac_1, frac_2, material_1, material_2,
    )?
    .apply(wavefront)
}

/// Modulate `wavefront` by a slice of two laterally stacked materials.
pub fn modify_two_materials_lateral(
    wavefront: &Wavefront,
    distance: f64,
    wavelength: f64,
    pattern_1: &PatternMask,
    material_1: &Material,
    pattern_2: &PatternMask,
    material_2: &Material,
) -> Result<Wavefront, OpticsError> {
    OpticsError::check_len("material_1", wavefront.len(), material_1.len())?;
    SliceTransmission::two_materials_lateral(
        distance, wavelength, pattern_1, material_1, pattern_2, material_2,
    )?
    .apply(wavefront)
}
