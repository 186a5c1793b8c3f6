//! Parallel execution of independent multislice runs.
//!
//! A single run is strictly sequential along the optical axis, but
//! separate runs (different illuminations, Monte Carlo material
//! realisations, wavelength sweeps) share nothing mutable. [`BatchRunner`]
//! fans them out over a pool of scoped worker threads fed by a bounded
//! crossbeam channel and collects the results in submission order.
//!
//! Results do not depend on the worker count: each job is an ordinary
//! [`MultisliceEngine::run`] call.

use std::sync::Arc;
use std::thread;

use mslice_core::{OpticsError, Wavefront};
use mslice_propagator::KernelSet;

use crate::config::{BatchConfig, ConfigError, PropagationSetup};
use crate::multislice::{MultisliceEngine, OpticalElement, RunOutput};

// ── Error type ──────────────────────────────────────────────────

/// Error from a batched operation, annotated with the failing job index.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchError {
    /// A job's run failed.
    Run {
        /// Index of the job that failed (0-based, submission order).
        job_index: usize,
        /// The underlying error.
        error: OpticsError,
    },
    /// Configuration error during construction or pool start-up.
    Config(ConfigError),
    /// A job produced no result (its worker exited early).
    WorkerFailed {
        /// Index of the job left without a result.
        job_index: usize,
    },
}

impl std::fmt::Display for BatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchError::Run { job_index, error } => {
                write!(f, "job {job_index}: run failed: {error}")
            }
            BatchError::Config(e) => write!(f, "config error: {e}"),
            BatchError::WorkerFailed { job_index } => {
                write!(f, "job {job_index}: no result from worker")
            }
        }
    }
}

impl std::error::Error for BatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BatchError::Run { error, .. } => Some(error),
            BatchError::Config(e) => Some(e),
            BatchError::WorkerFailed { .. } => None,
        }
    }
}

impl From<ConfigError> for BatchError {
    fn from(e: ConfigError) -> Self {
        BatchError::Config(e)
    }
}

// ── BatchJob ────────────────────────────────────────────────────

/// One independent run.
///
/// The element is shared behind an [`Arc`] so many jobs can reuse one
/// large pattern without copying it.
#[derive(Clone, Debug)]
pub struct BatchJob {
    /// Field entering the pre-object stage.
    pub input: Wavefront,
    /// Element to propagate through.
    pub element: Arc<OpticalElement>,
    /// Run geometry.
    pub setup: PropagationSetup,
}

type JobResult = Result<RunOutput, BatchError>;

// ── BatchRunner ─────────────────────────────────────────────────

/// Runs batches of [`BatchJob`]s on a worker pool.
///
/// Threads are created per [`run`](Self::run) call and joined before it
/// returns; nothing outlives a batch.
pub struct BatchRunner<K> {
    engine: MultisliceEngine<K>,
    config: BatchConfig,
}

impl<K: KernelSet> BatchRunner<K> {
    /// # Errors
    ///
    /// [`BatchError::Config`] if `config` fails validation.
    pub fn new(engine: MultisliceEngine<K>, config: BatchConfig) -> Result<Self, BatchError> {
        config.validate()?;
        Ok(Self { engine, config })
    }

    /// The engine each job runs on.
    pub fn engine(&self) -> &MultisliceEngine<K> {
        &self.engine
    }

    /// Run every job. The outer `Result` fails only if the pool itself
    /// could not start; per-job failures are reported in place, so the
    /// caller decides whether one bad job sinks the batch.
    pub fn run(&self, jobs: Vec<BatchJob>) -> Result<Vec<JobResult>, BatchError> {
        let job_count = jobs.len();
        if job_count == 0 {
            return Ok(Vec::new());
        }
        let worker_count = self.config.resolved_worker_count().min(job_count);

        let mut slots = thread::scope(|scope| -> Result<Vec<Option<JobResult>>, BatchError> {
            // Created inside the scope: an early return must drop `task_tx`
            // before the scope joins the workers.
            let (task_tx, task_rx) = crossbeam_channel::bounded::<(usize, BatchJob)>(
                self.config.queue_depth,
            );
            let (result_tx, result_rx) = crossbeam_channel::unbounded::<(usize, JobResult)>();

            for worker in 0..worker_count {
                let task_rx = task_rx.clone();
                let result_tx = result_tx.clone();
                let engine = &self.engine;
                thread::Builder::new()
                    .name(format!("mslice-batch-{worker}"))
                    .spawn_scoped(scope, move || {
                        while let Ok((job_index, job)) = task_rx.recv() {
                            let result = engine
                                .run(&job.input, &job.element, &job.setup)
                                .map_err(|error| BatchError::Run { job_index, error });
                            if result_tx.send((job_index, result)).is_err() {
                                break;
                            }
                        }
                    })
                    .map_err(|e| ConfigError::ThreadSpawnFailed {
                        reason: format!("batch worker {worker}: {e}"),
                    })?;
            }
            drop(task_rx);
            drop(result_tx);

            for (index, job) in jobs.into_iter().enumerate() {
                if task_tx.send((index, job)).is_err() {
                    break;
                }
            }
            drop(task_tx);

            let mut slots: Vec<Option<JobResult>> = (0..job_count).map(|_| None).collect();
            for (index, result) in result_rx.iter() {
                slots[index] = Some(result);
            }
            Ok(slots)
        })?;

        Ok(slots
            .iter_mut()
            .enumerate()
            .map(|(job_index, slot)| {
                slot.take()
                    .unwrap_or(Err(BatchError::WorkerFailed { job_index }))
            })
            .collect())
    }

    /// Run every job and return the outputs, or the error of the
    /// lowest-indexed failing job.
    pub fn run_all(&self, jobs: Vec<BatchJob>) -> Result<Vec<RunOutput>, BatchError> {
        self.run(jobs)?.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EngineConfig, StepCount};
    use mslice_core::{Material, Regime};
    use mslice_test_utils::fixtures::{disk_pattern, random_phase_screen};
    use mslice_test_utils::{FailingKernel, MockKernels};

    const N: usize = 8;

    fn jobs(count: usize) -> Vec<BatchJob> {
        let element = Arc::new(
            OpticalElement::new(
                disk_pattern(N, 2.0),
                Material::uniform(N * N, 1e-6, 1e-8).unwrap(),
                1e-6,
            )
            .unwrap(),
        );
        (0..count)
            .map(|seed| BatchJob {
                input: random_phase_screen(N, 1e-8, seed as u64),
                element: element.clone(),
                setup: PropagationSetup::through_only(1e-10, StepCount::Fixed(3)),
            })
            .collect()
    }

    fn runner(workers: usize) -> BatchRunner<MockKernels> {
        BatchRunner::new(
            MultisliceEngine::new(EngineConfig::default(), MockKernels::identity()),
            BatchConfig {
                worker_count: Some(workers),
                queue_depth: 2,
            },
        )
        .unwrap()
    }

    #[test]
    fn results_are_in_submission_order() {
        let batch = jobs(6);
        let expected: Vec<_> = batch
            .iter()
            .map(|j| {
                runner(1)
                    .engine()
                    .run(&j.input, &j.element, &j.setup)
                    .unwrap()
                    .wavefront
            })
            .collect();
        let outputs = runner(3).run_all(batch).unwrap();
        let got: Vec<_> = outputs.into_iter().map(|o| o.wavefront).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn every_job_calls_the_kernel() {
        let r = runner(4);
        r.run_all(jobs(5)).unwrap();
        assert_eq!(r.engine().kernels().calls().len(), 5 * 3);
    }

    #[test]
    fn empty_batch_is_empty() {
        assert!(runner(2).run(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn failing_job_is_reported_in_place() {
        let mut batch = jobs(3);
        batch[1].setup.wavelength = -1.0;
        let results = runner(2).run(batch).unwrap();
        assert!(results[0].is_ok());
        assert_eq!(
            results[1].as_ref().unwrap_err(),
            &BatchError::Run {
                job_index: 1,
                error: OpticsError::InvalidWavelength { value: -1.0 },
            }
        );
        assert!(results[2].is_ok());
    }

    #[test]
    fn run_all_returns_first_failure() {
        let kernels = MockKernels::identity().with_kernel(
            Regime::TransferFunction,
            FailingKernel {
                error: OpticsError::invalid_parameter("boom"),
            },
        );
        let r = BatchRunner::new(
            MultisliceEngine::new(EngineConfig::default(), kernels),
            BatchConfig::default(),
        )
        .unwrap();
        match r.run_all(jobs(4)) {
            Err(BatchError::Run { job_index: 0, error }) => {
                assert_eq!(error, OpticsError::invalid_parameter("boom"));
            }
            other => panic!("expected job 0 failure, got {other:?}"),
        }
    }

    #[test]
    fn zero_queue_depth_rejected() {
        let err = BatchRunner::new(
            MultisliceEngine::new(EngineConfig::default(), MockKernels::identity()),
            BatchConfig {
                worker_count: None,
                queue_depth: 0,
            },
        )
        .err()
        .unwrap();
        assert_eq!(err, BatchError::Config(ConfigError::QueueDepthZero));
    }
}
