// lib/src/config/config_defaults.rs

use chrono::Duration;

use crate::config::config_structs::WindowMode;

/// Default aggregation window: one day, matching the daily collection
/// cadence of the study dataset.
pub fn default_window_size() -> Duration {
    Duration::days(1)
}

/// Default window mode. Cumulative reproduces the original study's
/// "activity up to each collection date" framing; disjoint and rolling
/// remain available through the configuration.
pub fn default_window_mode() -> WindowMode {
    WindowMode::Cumulative
}

/// Default size of the top-k most-central-users listings.
pub const DEFAULT_TOP_K: usize = 10;
