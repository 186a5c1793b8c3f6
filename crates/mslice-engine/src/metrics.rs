//! Per-run performance metrics for the multislice engine.
//!
//! [`RunMetrics`] captures timing and work counts for one run. Timings
//! are wall-clock and vary between runs; the counts are deterministic.

use indexmap::IndexMap;
use mslice_core::Stage;

/// Timing and work counters collected during a single run.
///
/// All durations are in microseconds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunMetrics {
    /// Wall-clock time for the whole run, in microseconds.
    pub total_us: u64,
    /// Per-stage wall-clock time, in execution order. Skipped stages are
    /// absent.
    pub stage_us: IndexMap<Stage, u64>,
    /// Number of free-space kernel invocations.
    pub kernel_calls: u64,
    /// Number of slice modulations applied.
    pub modulations: u64,
}

impl RunMetrics {
    /// Time spent in `stage`, if it ran.
    pub fn stage(&self, stage: Stage) -> Option<u64> {
        self.stage_us.get(&stage).copied()
    }

    /// Stages that ran, in order.
    pub fn stages_run(&self) -> impl Iterator<Item = Stage> + '_ {
        self.stage_us.keys().copied()
    }
}
