//! Integration test: a Monte Carlo batch over random illuminations gives
//! the same fields regardless of worker count, and the same fields as
//! running each job on its own.

use std::sync::Arc;

use mslice_core::Material;
use mslice_engine::{
    BatchConfig, BatchJob, BatchRunner, EngineConfig, MultisliceEngine, OpticalElement,
    PropagationSetup, StepCount,
};
use mslice_propagators::FourierKernels;
use mslice_test_utils::fixtures::{disk_pattern, random_phase_screen};
use mslice_test_utils::RecordingSink;

const N: usize = 16;
const DX: f64 = 1e-8;

fn jobs() -> Vec<BatchJob> {
    let element = Arc::new(
        OpticalElement::new(
            disk_pattern(N, 5.0),
            Material::uniform(N * N, 2e-6, 4e-8).unwrap(),
            5e-7,
        )
        .unwrap(),
    );
    (0..12)
        .map(|seed| BatchJob {
            input: random_phase_screen(N, DX, 100 + seed),
            element: element.clone(),
            setup: PropagationSetup {
                wavelength: 1e-10,
                steps: StepCount::Fixed(3),
                pre_distance: 0.0,
                post_distance: 1e-5,
            },
        })
        .collect()
}

fn runner(workers: usize) -> BatchRunner<FourierKernels> {
    BatchRunner::new(
        MultisliceEngine::new(EngineConfig::default(), FourierKernels::new()),
        BatchConfig {
            worker_count: Some(workers),
            queue_depth: 4,
        },
    )
    .unwrap()
}

#[test]
fn worker_count_does_not_change_results() {
    let one = runner(1).run_all(jobs()).unwrap();
    let four = runner(4).run_all(jobs()).unwrap();
    assert_eq!(one.len(), 12);
    for (a, b) in one.iter().zip(&four) {
        assert_eq!(a.wavefront, b.wavefront);
        assert_eq!(a.plan, b.plan);
    }
}

#[test]
fn batch_matches_sequential_runs() {
    let engine = MultisliceEngine::new(EngineConfig::default(), FourierKernels::new());
    let batch = runner(3).run_all(jobs()).unwrap();
    for (job, out) in jobs().iter().zip(&batch) {
        let single = engine.run(&job.input, &job.element, &job.setup).unwrap();
        assert_eq!(single.wavefront, out.wavefront);
    }
}

#[test]
fn shared_sink_sees_every_job() {
    let sink = Arc::new(RecordingSink::new());
    let r = BatchRunner::new(
        MultisliceEngine::new(EngineConfig::default(), FourierKernels::new())
            .with_sink(sink.clone()),
        BatchConfig {
            worker_count: Some(3),
            queue_depth: 1,
        },
    )
    .unwrap();
    r.run_all(jobs()).unwrap();
    // Two stages per job, one StageEntered and one RegimeSelected each.
    assert_eq!(sink.events().len(), 12 * 4);
}
