// lib/src/config/config_structs.rs

use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};

use models::errors::{GraphError, GraphResult};

use crate::config::config_defaults::{
    default_window_mode, default_window_size, DEFAULT_TOP_K,
};

/// How the sequence of time windows is laid out over the observation
/// period.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WindowMode {
    /// Fixed-length windows advancing by `window_step` (defaults to the
    /// window size); windows overlap when the step is smaller than the
    /// size.
    Rolling,
    /// Windows share the configured start time and grow by one window
    /// size each; every snapshot aggregates all activity since the start.
    Cumulative,
    /// Consecutive non-overlapping windows of one window size each.
    Disjoint,
}

/// Windowing configuration for one builder run.
///
/// An explicit, passed structure; there is no process-wide configuration
/// state. The mode must be fixed per run, never mixed: every snapshot in
/// the resulting sequence is either window-only or cumulative.
#[derive(Clone, Debug)]
pub struct WindowConfig {
    /// Length of one window.
    pub window_size: Duration,

    /// Advance between consecutive rolling windows. `None` means one
    /// window size. Ignored outside `WindowMode::Rolling`.
    pub window_step: Option<Duration>,

    pub mode: WindowMode,

    /// Start of the observation period (inclusive).
    pub start_time: DateTime<Utc>,

    /// End of the observation period (exclusive).
    pub end_time: DateTime<Utc>,
}

impl WindowConfig {
    pub fn new(start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        Self {
            window_size: default_window_size(),
            window_step: None,
            mode: default_window_mode(),
            start_time,
            end_time,
        }
    }

    pub fn with_window_size(mut self, window_size: Duration) -> Self {
        self.window_size = window_size;
        self
    }

    pub fn with_window_step(mut self, window_step: Duration) -> Self {
        self.window_step = Some(window_step);
        self
    }

    pub fn with_mode(mut self, mode: WindowMode) -> Self {
        self.mode = mode;
        self
    }

    /// Checks the configuration before any record is processed.
    ///
    /// # Errors
    /// Returns `GraphError::InvalidWindowConfiguration` when the window
    /// size or step is not strictly positive, or when the period start
    /// lies after its end.
    pub fn validate(&self) -> GraphResult<()> {
        if self.window_size <= Duration::zero() {
            return Err(GraphError::InvalidWindowConfiguration(format!(
                "window_size must be positive, got {}",
                self.window_size
            )));
        }
        if let Some(step) = self.window_step {
            if step <= Duration::zero() {
                return Err(GraphError::InvalidWindowConfiguration(format!(
                    "window_step must be positive, got {}",
                    step
                )));
            }
        }
        if self.start_time > self.end_time {
            return Err(GraphError::InvalidWindowConfiguration(format!(
                "start_time {} lies after end_time {}",
                self.start_time, self.end_time
            )));
        }
        Ok(())
    }
}

/// Configuration of one end-to-end pipeline run: windowing plus the
/// output surface.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    pub window: WindowConfig,

    /// Size of the top-k most-central-users listings.
    pub top_k: usize,

    /// Directory for file exports. `None` disables all file output; the
    /// snapshots and statistics are still returned in memory.
    pub output_dir: Option<PathBuf>,

    /// Write the final snapshot as a GEXF file for Gephi.
    pub export_gexf: bool,

    /// Write statistics and edge-list CSV tables.
    pub export_csv: bool,

    /// Write the serialized results bundle.
    pub export_bundle: bool,
}

impl PipelineConfig {
    pub fn new(window: WindowConfig) -> Self {
        Self {
            window,
            top_k: DEFAULT_TOP_K,
            output_dir: None,
            export_gexf: true,
            export_csv: true,
            export_bundle: true,
        }
    }

    pub fn with_output_dir(mut self, output_dir: PathBuf) -> Self {
        self.output_dir = Some(output_dir);
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }
}
