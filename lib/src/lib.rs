// lib/src/lib.rs
//
// Batch pipeline of the interaction-network toolkit: extraction from the
// study's SQLite database, record store, time-windowed snapshot building,
// network statistics and file exports. Shared plain-data types live in
// the `models` crate.

pub mod analyzer;
pub mod config;
pub mod engine;
pub mod export;
pub mod extract;
pub mod graph_evolution;
pub mod pipeline;
pub mod store;

// Re-export the shared types alongside the pipeline surface.
pub use models::{
    DegreeHistogram, GraphError, GraphResult, GrowthStats, InteractionEdge, InteractionKind,
    InteractionRecord, NodeStats, SnapshotStats, TopKChange, UserId, UserNode,
};

pub use crate::analyzer::{analyze, AnalysisOutput};
pub use crate::config::{PipelineConfig, WindowConfig, WindowMode};
pub use crate::engine::{GraphSnapshot, SnapshotTable};
pub use crate::export::{read_bundle, write_bundle, ResultsBundle};
pub use crate::extract::load_interactions;
pub use crate::graph_evolution::{build_snapshots, plan_windows, BuildOutput, TimeWindow};
pub use crate::pipeline::{init_tracing, run_pipeline, PipelineOutput, PipelineReport};
pub use crate::store::{RawInteractionRow, RecordStore};
