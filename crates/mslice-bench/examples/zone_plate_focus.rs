//! Focus a plane wave with a hard X-ray zone plate.
//!
//! Demonstrates: build profile → engine with a printing sink → run →
//! inspect the focal spot.

use std::sync::Arc;

use mslice_bench::reference_profile;
use mslice_core::{DiagnosticEvent, DiagnosticSink, ScaleMode};
use mslice_engine::{EngineConfig, MultisliceEngine, ReportingMode};
use mslice_propagators::FourierKernels;

struct PrintSink;

impl DiagnosticSink for PrintSink {
    fn record(&self, event: &DiagnosticEvent) {
        match event {
            DiagnosticEvent::RegimeSelected {
                fresnel_number,
                critical_sampling,
                regime,
                ..
            } => println!(
                "  N_F = {fresnel_number:.3e}, critical = {critical_sampling:.3e} m → {regime}"
            ),
            DiagnosticEvent::StepsPlanned {
                suggested_step,
                steps,
            } => println!("Planned {steps} slices (Δz ≤ {suggested_step:.3e} m)"),
            DiagnosticEvent::StageEntered {
                stage,
                object_label,
                distance,
                steps,
            } => println!("{stage} ({object_label}): {steps} × {distance:.3e} m"),
            DiagnosticEvent::StepProgress { index, total } => {
                println!("    slice {index}/{total}")
            }
        }
    }
}

fn main() {
    println!("=== mslice zone plate focus ===\n");

    let profile = reference_profile();
    println!(
        "grid {}², pitch {:.2e} m, focal length {:.3e} m\n",
        profile.input.side(),
        profile.input.step_xy(),
        profile.focal_length
    );

    let engine = MultisliceEngine::new(
        EngineConfig::default().with_reporting(ReportingMode::Verbose),
        FourierKernels::new(),
    )
    .with_sink(Arc::new(PrintSink));

    let out = engine
        .run(&profile.input, &profile.element, &profile.setup)
        .unwrap();

    let focus = &out.wavefront;
    let extrema = focus.extrema();
    let log_mag = focus.magnitude(ScaleMode::Log);
    let (row, col) = extrema.argmax;
    println!("\nfocal plane pitch: {:.3e} m", focus.step_xy());
    println!(
        "peak |u| = {:.3e} at ({row}, {col}), ln = {:.2}",
        extrema.max,
        log_mag[row * focus.side() + col]
    );
    println!(
        "power in: {:.3e}, power at focus: {:.3e}",
        profile.input.power(),
        focus.power()
    );
    println!(
        "\n{} kernel calls, {} modulations, {} µs",
        out.metrics.kernel_calls, out.metrics.modulations, out.metrics.total_us
    );
    for (stage, us) in &out.metrics.stage_us {
        println!("  {stage}: {us} µs");
    }
}
