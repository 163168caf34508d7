// lib/src/graph_evolution/mod.rs

pub mod snapshot_builder;
pub mod time_window;

pub use snapshot_builder::{build_snapshots, BuildOutput, BuildReport};
pub use time_window::{plan_windows, TimeWindow};
