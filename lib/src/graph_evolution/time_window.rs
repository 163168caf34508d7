// lib/src/graph_evolution/time_window.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use models::errors::GraphResult;

use crate::config::{WindowConfig, WindowMode};

/// A half-open time range `[start, end)` over which records are
/// aggregated into one snapshot.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        TimeWindow { start, end }
    }

    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        timestamp >= self.start && timestamp < self.end
    }
}

/// Lays the configured windows over the observation period, in
/// chronological order.
///
/// Window ends are clamped to the period end, so the last window of a
/// plan may be shorter than the configured size. The plan depends only on
/// the configuration; replanning is deterministic.
///
/// # Errors
/// Returns `GraphError::InvalidWindowConfiguration` when the
/// configuration does not validate.
pub fn plan_windows(config: &WindowConfig) -> GraphResult<Vec<TimeWindow>> {
    config.validate()?;

    let size = config.window_size;
    let mut windows = Vec::new();

    match config.mode {
        WindowMode::Cumulative => {
            let mut end = config.start_time + size;
            loop {
                windows.push(TimeWindow::new(config.start_time, end.min(config.end_time)));
                if end >= config.end_time {
                    break;
                }
                end = end + size;
            }
        }
        WindowMode::Rolling | WindowMode::Disjoint => {
            // Disjoint is rolling with the step pinned to the window size.
            let step = match config.mode {
                WindowMode::Rolling => config.window_step.unwrap_or(size),
                _ => size,
            };
            let mut start = config.start_time;
            loop {
                let natural_end = start + size;
                windows.push(TimeWindow::new(start, natural_end.min(config.end_time)));
                if natural_end >= config.end_time {
                    break;
                }
                start = start + step;
            }
        }
    }

    Ok(windows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use models::errors::GraphError;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2017, 10, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_window_contains_is_half_open() {
        let window = TimeWindow::new(at(16, 0), at(17, 0));
        assert!(window.contains(at(16, 0)));
        assert!(window.contains(at(16, 12)));
        assert!(!window.contains(at(17, 0)));
    }

    #[test]
    fn test_disjoint_plan_tiles_the_period() {
        let config = WindowConfig::new(at(16, 0), at(19, 0))
            .with_mode(WindowMode::Disjoint)
            .with_window_size(Duration::days(1));
        let windows = plan_windows(&config).unwrap();

        assert_eq!(windows.len(), 3);
        assert_eq!(windows[0], TimeWindow::new(at(16, 0), at(17, 0)));
        assert_eq!(windows[1], TimeWindow::new(at(17, 0), at(18, 0)));
        assert_eq!(windows[2], TimeWindow::new(at(18, 0), at(19, 0)));
    }

    #[test]
    fn test_cumulative_plan_shares_the_origin() {
        let config = WindowConfig::new(at(16, 0), at(19, 0))
            .with_mode(WindowMode::Cumulative)
            .with_window_size(Duration::days(1));
        let windows = plan_windows(&config).unwrap();

        assert_eq!(windows.len(), 3);
        assert_eq!(windows[0], TimeWindow::new(at(16, 0), at(17, 0)));
        assert_eq!(windows[1], TimeWindow::new(at(16, 0), at(18, 0)));
        assert_eq!(windows[2], TimeWindow::new(at(16, 0), at(19, 0)));
    }

    #[test]
    fn test_rolling_plan_overlaps_with_smaller_step() {
        let config = WindowConfig::new(at(16, 0), at(18, 0))
            .with_mode(WindowMode::Rolling)
            .with_window_size(Duration::days(1))
            .with_window_step(Duration::hours(12));
        let windows = plan_windows(&config).unwrap();

        assert_eq!(windows.len(), 3);
        assert_eq!(windows[0], TimeWindow::new(at(16, 0), at(17, 0)));
        assert_eq!(windows[1], TimeWindow::new(at(16, 12), at(17, 12)));
        assert_eq!(windows[2], TimeWindow::new(at(17, 0), at(18, 0)));
    }

    #[test]
    fn test_last_window_clamps_to_period_end() {
        let config = WindowConfig::new(at(16, 0), at(18, 12))
            .with_mode(WindowMode::Disjoint)
            .with_window_size(Duration::days(1));
        let windows = plan_windows(&config).unwrap();

        assert_eq!(windows.len(), 3);
        assert_eq!(windows[2], TimeWindow::new(at(18, 0), at(18, 12)));
    }

    #[test]
    fn test_invalid_config_fails_before_planning() {
        let config = WindowConfig::new(at(19, 0), at(16, 0));
        assert!(matches!(
            plan_windows(&config),
            Err(GraphError::InvalidWindowConfiguration(_))
        ));
    }
}
