// lib/src/engine/mod.rs

pub mod snapshot;

pub use snapshot::{GraphSnapshot, SnapshotTable};
