//! Criterion micro-benchmarks for the FFT diffraction kernels.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mslice_core::{Regime, Wavefront};
use mslice_propagator::KernelSet;
use mslice_propagators::{Fft2, FourierKernels};

const STEP: f64 = 5e-9;
const WAVEL: f64 = 1e-10;

fn field(side: usize) -> Wavefront {
    Wavefront::plane(side, STEP).unwrap()
}

fn bench_fft2(c: &mut Criterion) {
    let fft = Fft2::new();
    let mut group = c.benchmark_group("fft2");
    for side in [128, 256, 512] {
        let samples = field(side).into_samples();
        group.bench_with_input(BenchmarkId::from_parameter(side), &side, |b, &side| {
            b.iter(|| {
                let mut buf = samples.clone();
                fft.forward(&mut buf, side);
                black_box(&buf);
            });
        });
    }
    group.finish();
}

fn bench_kernels(c: &mut Criterion) {
    let kernels = FourierKernels::new();
    let input = field(256);
    let support = input.support();
    let mut group = c.benchmark_group("kernel_256");
    for (regime, distance) in [
        (Regime::TransferFunction, 1e-7),
        (Regime::SingleFourierTransform, 1e-4),
        (Regime::Fraunhofer, 1.0),
    ] {
        group.bench_function(regime.name(), |b| {
            b.iter(|| {
                let out = kernels
                    .kernel(regime)
                    .propagate(&input, STEP, support, WAVEL, distance)
                    .unwrap();
                black_box(&out);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_fft2, bench_kernels);
criterion_main!(benches);
