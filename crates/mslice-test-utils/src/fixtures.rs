//! Reusable wavefront and pattern fixtures.
//!
//! - [`gaussian_beam`]: centred Gaussian amplitude, flat phase.
//! - [`random_phase_screen`]: unit amplitude with seeded random phase.
//! - [`zone_plate_pattern`]: binary Fresnel zone plate occupancy mask.
//! - [`disk_pattern`]: binary disk occupancy mask.

use std::f64::consts::PI;

use mslice_core::{Complex64, PatternMask, Wavefront};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Gaussian beam `exp(-(x² + y²) / w²)` on a `side × side` grid.
pub fn gaussian_beam(side: usize, step_xy: f64, waist: f64) -> Wavefront {
    Wavefront::from_fn(side, step_xy, |x, y| {
        Complex64::new((-(x * x + y * y) / (waist * waist)).exp(), 0.0)
    })
    .unwrap()
}

/// Unit-amplitude field with a uniformly random phase per sample.
///
/// Deterministic for a given `seed`.
pub fn random_phase_screen(side: usize, step_xy: f64, seed: u64) -> Wavefront {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let samples = (0..side * side)
        .map(|_| Complex64::cis(2.0 * PI * rng.random::<f64>()))
        .collect();
    Wavefront::new(side, step_xy, samples).unwrap()
}

/// Binary Fresnel zone plate: odd zones (`r² / (λf)` in `[2k+1, 2k+2)`)
/// are occupied, out to `outer_radius`.
pub fn zone_plate_pattern(
    side: usize,
    step_xy: f64,
    wavelength: f64,
    focal_length: f64,
    outer_radius: f64,
) -> PatternMask {
    let half = (side / 2) as f64;
    PatternMask::from_predicate(side * side, |i| {
        let x = ((i % side) as f64 - half) * step_xy;
        let y = ((i / side) as f64 - half) * step_xy;
        let r2 = x * x + y * y;
        if r2 > outer_radius * outer_radius {
            return false;
        }
        let zone = (r2 / (wavelength * focal_length)).floor() as u64;
        zone % 2 == 1
    })
}

/// Binary disk of `radius` samples around the grid centre.
pub fn disk_pattern(side: usize, radius: f64) -> PatternMask {
    let half = (side / 2) as f64;
    PatternMask::from_predicate(side * side, |i| {
        let x = (i % side) as f64 - half;
        let y = (i / side) as f64 - half;
        x * x + y * y <= radius * radius
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_screen_is_seeded() {
        let a = random_phase_screen(8, 1e-6, 7);
        let b = random_phase_screen(8, 1e-6, 7);
        let c = random_phase_screen(8, 1e-6, 8);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.samples().iter().all(|u| (u.norm() - 1.0).abs() < 1e-12));
    }

    #[test]
    fn zone_plate_centre_is_open() {
        let p = zone_plate_pattern(64, 1e-8, 1e-10, 1e-4, 3e-7);
        // Zone 0 (centre) is vacuum.
        assert_eq!(p.weights()[32 * 64 + 32], 0.0);
        assert!(p.weights().iter().any(|&w| w == 1.0));
    }

    #[test]
    fn disk_contains_centre_only_when_small() {
        let p = disk_pattern(9, 0.0);
        assert_eq!(p.weights().iter().filter(|&&w| w == 1.0).count(), 1);
        assert_eq!(p.weights()[4 * 9 + 4], 1.0);
    }
}
