//! Benchmark profiles and utilities for the mslice multislice simulator.
//!
//! Provides pre-built [`Profile`]s for benchmarks and examples:
//!
//! - [`reference_profile`]: 256x256 hard X-ray zone plate, focused to its
//!   first-order focal plane
//! - [`stress_profile`]: the same optic sampled at 1024x1024

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use mslice_core::{Material, Wavefront};
use mslice_engine::{OpticalElement, PropagationSetup, StepCount};
use mslice_test_utils::fixtures::zone_plate_pattern;

/// Wavelength of the profiles: 12.4 keV.
pub const WAVELENGTH: f64 = 1e-10;

/// Refractive index decrement of gold at 12.4 keV.
pub const GOLD_DELTA: f64 = 2.9e-5;
/// Absorption index of gold at 12.4 keV.
pub const GOLD_BETA: f64 = 2.2e-6;

/// Everything needed for one engine run.
#[derive(Clone, Debug)]
pub struct Profile {
    /// Illumination entering the optic.
    pub input: Wavefront,
    /// The zone plate.
    pub element: OpticalElement,
    /// Geometry: auto-planned slices, then propagate to the focus.
    pub setup: PropagationSetup,
    /// First-order focal length of the zone plate.
    pub focal_length: f64,
}

/// Build a zone plate profile on a `side x side` grid of pitch `step_xy`.
///
/// The plate radius is 47% of the support and its outermost zone is
/// `outer_zone` wide. The post-object stage propagates to the first-order
/// focus `f = 2·R·Δr / λ`.
pub fn zone_plate_profile(side: usize, step_xy: f64, outer_zone: f64, thickness: f64) -> Profile {
    let radius = 0.47 * side as f64 * step_xy;
    let focal_length = 2.0 * radius * outer_zone / WAVELENGTH;
    let pattern = zone_plate_pattern(side, step_xy, WAVELENGTH, focal_length, radius);
    let material = Material::uniform(side * side, GOLD_DELTA, GOLD_BETA).unwrap();
    Profile {
        input: Wavefront::plane(side, step_xy).unwrap(),
        element: OpticalElement::new(pattern, material, thickness).unwrap(),
        setup: PropagationSetup {
            wavelength: WAVELENGTH,
            steps: StepCount::Auto,
            pre_distance: 0.0,
            post_distance: focal_length,
        },
        focal_length,
    }
}

/// 256x256, 5 nm pitch, 20 nm outer zones, 1 µm thick.
pub fn reference_profile() -> Profile {
    zone_plate_profile(256, 5e-9, 2e-8, 1e-6)
}

/// 1024x1024, 1.25 nm pitch, same optic as [`reference_profile`].
pub fn stress_profile() -> Profile {
    zone_plate_profile(1024, 1.25e-9, 2e-8, 1e-6)
}
