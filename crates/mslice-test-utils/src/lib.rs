//! Test utilities and mock types for mslice development.
//!
//! Provides a [`RecordingSink`] that captures diagnostic events, mock
//! kernels ([`ScaleKernel`], [`FailingKernel`]) and a [`MockKernels`]
//! set that logs every call, plus wavefront and pattern [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use mslice_core::{Complex64, DiagnosticEvent, DiagnosticSink, OpticsError, Regime, Wavefront};
use mslice_propagator::{KernelSet, Propagator};

/// Sink that stores every event it receives, in order.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<DiagnosticEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events.
    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Number of recorded events matching `pred`.
    pub fn count(&self, pred: impl Fn(&DiagnosticEvent) -> bool) -> usize {
        self.events.lock().unwrap().iter().filter(|e| pred(e)).count()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl DiagnosticSink for RecordingSink {
    fn record(&self, event: &DiagnosticEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

/// Multiplies every sample by a fixed factor and counts its calls.
///
/// A cheap stand-in for a real kernel when only the pipeline order
/// matters.
pub struct ScaleKernel {
    pub name: String,
    pub factor: Complex64,
    calls: AtomicUsize,
}

impl ScaleKernel {
    pub fn new(name: impl Into<String>, factor: Complex64) -> Self {
        Self {
            name: name.into(),
            factor,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl Propagator for ScaleKernel {
    fn name(&self) -> &str {
        &self.name
    }

    fn propagate(
        &self,
        wavefront: &Wavefront,
        _sampling: f64,
        _support: f64,
        _wavelength: f64,
        _distance: f64,
    ) -> Result<Wavefront, OpticsError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        let samples = wavefront.samples().iter().map(|u| u * self.factor).collect();
        wavefront.with_samples(samples)
    }
}

/// Always fails with the configured error.
pub struct FailingKernel {
    pub error: OpticsError,
}

impl Propagator for FailingKernel {
    fn name(&self) -> &str {
        "failing"
    }

    fn propagate(
        &self,
        _wavefront: &Wavefront,
        _sampling: f64,
        _support: f64,
        _wavelength: f64,
        _distance: f64,
    ) -> Result<Wavefront, OpticsError> {
        Err(self.error.clone())
    }
}

/// One logged kernel invocation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KernelCall {
    pub regime: Regime,
    pub distance: f64,
}

struct Logged {
    regime: Regime,
    inner: Box<dyn Propagator>,
    log: std::sync::Arc<Mutex<Vec<KernelCall>>>,
}

impl Propagator for Logged {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn propagate(
        &self,
        wavefront: &Wavefront,
        sampling: f64,
        support: f64,
        wavelength: f64,
        distance: f64,
    ) -> Result<Wavefront, OpticsError> {
        self.log.lock().unwrap().push(KernelCall {
            regime: self.regime,
            distance,
        });
        self.inner
            .propagate(wavefront, sampling, support, wavelength, distance)
    }
}

/// Kernel set that logs `(regime, distance)` for every call.
///
/// By default every regime is a distinct [`ScaleKernel`]; individual
/// regimes can be replaced with [`with_kernel`](MockKernels::with_kernel).
pub struct MockKernels {
    kernels: Vec<Logged>,
    log: std::sync::Arc<Mutex<Vec<KernelCall>>>,
}

impl MockKernels {
    /// Identity kernels for every regime.
    pub fn identity() -> Self {
        let log = std::sync::Arc::new(Mutex::new(Vec::new()));
        let kernels = Regime::ALL
            .iter()
            .map(|&regime| Logged {
                regime,
                inner: Box::new(ScaleKernel::new(regime.name(), Complex64::new(1.0, 0.0))),
                log: log.clone(),
            })
            .collect();
        Self { kernels, log }
    }

    /// Replace the kernel used for `regime`.
    pub fn with_kernel(mut self, regime: Regime, kernel: impl Propagator + 'static) -> Self {
        if let Some(k) = self.kernels.iter_mut().find(|k| k.regime == regime) {
            k.inner = Box::new(kernel);
        }
        self
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<KernelCall> {
        self.log.lock().unwrap().clone()
    }
}

impl KernelSet for MockKernels {
    fn kernel(&self, regime: Regime) -> &dyn Propagator {
        let idx = Regime::ALL.iter().position(|&r| r == regime).unwrap();
        &self.kernels[idx]
    }
}

/// Largest `|a - b|` over two equally sized wavefronts.
pub fn max_abs_diff(a: &Wavefront, b: &Wavefront) -> f64 {
    assert_eq!(a.len(), b.len(), "wavefront sizes differ");
    a.samples()
        .iter()
        .zip(b.samples())
        .map(|(x, y)| (x - y).norm())
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_kernel_replaces_only_its_regime() {
        let kernels = MockKernels::identity().with_kernel(
            Regime::SingleFourierTransform,
            FailingKernel {
                error: OpticsError::invalid_parameter("replaced"),
            },
        );
        let w = Wavefront::plane(2, 1e-6).unwrap();

        assert_eq!(kernels.kernel(Regime::SingleFourierTransform).name(), "failing");
        assert_eq!(
            kernels
                .kernel(Regime::SingleFourierTransform)
                .propagate(&w, 1e-6, 2e-6, 1e-10, 1.0)
                .unwrap_err(),
            OpticsError::invalid_parameter("replaced")
        );
        for regime in [Regime::TransferFunction, Regime::Fraunhofer] {
            assert_eq!(kernels.kernel(regime).name(), regime.name());
            let out = kernels
                .kernel(regime)
                .propagate(&w, 1e-6, 2e-6, 1e-10, 1.0)
                .unwrap();
            assert_eq!(out, w);
        }

        let logged: Vec<_> = kernels.calls().iter().map(|c| c.regime).collect();
        assert_eq!(
            logged,
            vec![
                Regime::SingleFourierTransform,
                Regime::TransferFunction,
                Regime::Fraunhofer
            ]
        );
    }

    #[test]
    fn recording_sink_keeps_order() {
        let sink = RecordingSink::new();
        sink.record(&DiagnosticEvent::StepProgress { index: 1, total: 2 });
        sink.record(&DiagnosticEvent::StepProgress { index: 2, total: 2 });
        assert_eq!(
            sink.count(|e| matches!(e, DiagnosticEvent::StepProgress { .. })),
            2
        );
        assert_eq!(
            sink.events()[1],
            DiagnosticEvent::StepProgress { index: 2, total: 2 }
        );
        sink.clear();
        assert!(sink.events().is_empty());
    }
}
