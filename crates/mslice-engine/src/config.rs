//! Engine, run and batch configuration.
//!
//! [`EngineConfig`] holds settings that outlive a single run (reporting
//! mode, object label, planner accuracy). [`PropagationSetup`] holds the
//! per-run geometry. [`BatchConfig`] sizes the worker pool of
//! [`BatchRunner`](crate::batched::BatchRunner).

use std::error::Error;
use std::fmt;

use mslice_core::error::check_wavelength;
use mslice_core::OpticsError;

use crate::planner::StepPlanner;

// ── ReportingMode ──────────────────────────────────────────────────

/// How much the engine reports while running.
///
/// Reporting never changes the numeric result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ReportingMode {
    /// Stage-level events only.
    #[default]
    Quiet,
    /// Stage-level events plus one progress event per through-object step.
    Verbose,
}

// ── EngineConfig ───────────────────────────────────────────────────

/// Settings shared by every run of a [`MultisliceEngine`](crate::MultisliceEngine).
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// Label carried by stage events. Default: `"zone plate"`.
    pub object_label: String,
    /// Default: [`ReportingMode::Quiet`].
    pub reporting_mode: ReportingMode,
    /// Accuracy used when the slice count is planned automatically.
    pub planner: StepPlanner,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            object_label: "zone plate".to_string(),
            reporting_mode: ReportingMode::Quiet,
            planner: StepPlanner::default(),
        }
    }
}

impl EngineConfig {
    /// Same config with a different reporting mode.
    pub fn with_reporting(mut self, mode: ReportingMode) -> Self {
        self.reporting_mode = mode;
        self
    }

    /// Same config with a different object label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.object_label = label.into();
        self
    }
}

// ── PropagationSetup ───────────────────────────────────────────────

/// How many slices the through-object stage uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepCount {
    /// Exactly this many slices. Must be at least 1.
    Fixed(usize),
    /// Let the [`StepPlanner`] size it from pitch, wavelength and thickness.
    Auto,
}

/// Geometry of one multislice run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PropagationSetup {
    /// Wavelength in metres.
    pub wavelength: f64,
    /// Slice count for the element.
    pub steps: StepCount,
    /// Free-space distance before the element. `0` skips the stage.
    pub pre_distance: f64,
    /// Free-space distance after the element. `0` skips the stage.
    pub post_distance: f64,
}

impl PropagationSetup {
    /// Setup with no free-space stages around the element.
    pub fn through_only(wavelength: f64, steps: StepCount) -> Self {
        Self {
            wavelength,
            steps,
            pre_distance: 0.0,
            post_distance: 0.0,
        }
    }

    /// Check the parts of the setup that do not depend on the grid.
    ///
    /// # Errors
    ///
    /// - [`OpticsError::InvalidWavelength`] for a non-positive wavelength.
    /// - [`OpticsError::InvalidParameter`] for `StepCount::Fixed(0)`.
    /// - [`OpticsError::InvalidDistance`] for a negative or non-finite
    ///   pre/post distance. Zero is allowed and skips the stage.
    pub fn validate(&self) -> Result<(), OpticsError> {
        check_wavelength(self.wavelength)?;
        if self.steps == StepCount::Fixed(0) {
            return Err(OpticsError::invalid_parameter(
                "number of slices must be at least 1",
            ));
        }
        for value in [self.pre_distance, self.post_distance] {
            if !value.is_finite() || value < 0.0 {
                return Err(OpticsError::InvalidDistance { value });
            }
        }
        Ok(())
    }
}

// ── BatchConfig ────────────────────────────────────────────────────

/// Worker pool sizing for [`BatchRunner`](crate::batched::BatchRunner).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    /// Number of worker threads. `None` = `available_parallelism`,
    /// clamped to `[1, 16]`.
    pub worker_count: Option<usize>,
    /// Capacity of the job queue between the submitter and the workers.
    /// Default: 64.
    pub queue_depth: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            worker_count: None,
            queue_depth: 64,
        }
    }
}

impl BatchConfig {
    /// Resolve the actual worker count, applying auto-detection if `None`.
    ///
    /// Explicit values are clamped to `[1, 64]`.
    pub fn resolved_worker_count(&self) -> usize {
        match self.worker_count {
            Some(n) => n.clamp(1, 64),
            None => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
                .clamp(1, 16),
        }
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.queue_depth == 0 {
            return Err(ConfigError::QueueDepthZero);
        }
        Ok(())
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors from [`BatchConfig::validate`] and pool start-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Job queue capacity is zero.
    QueueDepthZero,
    /// A worker thread could not be spawned.
    ThreadSpawnFailed {
        /// Description of which thread failed.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QueueDepthZero => write!(f, "queue_depth must be at least 1"),
            Self::ThreadSpawnFailed { reason } => write!(f, "thread spawn failed: {reason}"),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> PropagationSetup {
        PropagationSetup {
            wavelength: 1e-10,
            steps: StepCount::Fixed(4),
            pre_distance: 1e-3,
            post_distance: 0.0,
        }
    }

    #[test]
    fn engine_defaults() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.object_label, "zone plate");
        assert_eq!(cfg.reporting_mode, ReportingMode::Quiet);
        assert_eq!(cfg.planner, StepPlanner::default());
    }

    #[test]
    fn builders_replace_fields() {
        let cfg = EngineConfig::default()
            .with_reporting(ReportingMode::Verbose)
            .with_label("grating");
        assert_eq!(cfg.reporting_mode, ReportingMode::Verbose);
        assert_eq!(cfg.object_label, "grating");
    }

    #[test]
    fn valid_setup_passes() {
        assert!(setup().validate().is_ok());
        assert!(PropagationSetup::through_only(1e-10, StepCount::Auto)
            .validate()
            .is_ok());
    }

    #[test]
    fn zero_slices_rejected() {
        let mut s = setup();
        s.steps = StepCount::Fixed(0);
        match s.validate() {
            Err(OpticsError::InvalidParameter { reason }) => assert!(reason.contains("at least 1")),
            other => panic!("expected InvalidParameter, got {other:?}"),
        }
    }

    #[test]
    fn bad_wavelength_rejected_first() {
        let mut s = setup();
        s.wavelength = -1.0;
        s.steps = StepCount::Fixed(0);
        assert_eq!(
            s.validate(),
            Err(OpticsError::InvalidWavelength { value: -1.0 })
        );
    }

    #[test]
    fn negative_or_nan_distance_rejected() {
        let mut s = setup();
        s.post_distance = -1e-3;
        assert_eq!(
            s.validate(),
            Err(OpticsError::InvalidDistance { value: -1e-3 })
        );
        s.post_distance = 0.0;
        s.pre_distance = f64::NAN;
        assert!(matches!(
            s.validate(),
            Err(OpticsError::InvalidDistance { .. })
        ));
    }

    #[test]
    fn batch_defaults_and_clamping() {
        let cfg = BatchConfig::default();
        assert!(cfg.validate().is_ok());
        let n = cfg.resolved_worker_count();
        assert!((1..=16).contains(&n));
        let explicit = BatchConfig {
            worker_count: Some(0),
            queue_depth: 1,
        };
        assert_eq!(explicit.resolved_worker_count(), 1);
        let big = BatchConfig {
            worker_count: Some(1000),
            queue_depth: 1,
        };
        assert_eq!(big.resolved_worker_count(), 64);
    }

    #[test]
    fn zero_queue_depth_rejected() {
        let cfg = BatchConfig {
            worker_count: Some(2),
            queue_depth: 0,
        };
        assert_eq!(cfg.validate(), Err(ConfigError::QueueDepthZero));
        assert_eq!(
            ConfigError::QueueDepthZero.to_string(),
            "queue_depth must be at least 1"
        );
    }
}
