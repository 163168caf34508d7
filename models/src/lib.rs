// models/src/lib.rs
//
// Shared plain-data types of the interaction-network toolkit: identifiers,
// extracted interaction records, node/edge records, statistics records and
// the error taxonomy. Behavior (windowing, building, analysis, export)
// lives in the `lib` crate.

pub mod edges;
pub mod errors;
pub mod identifiers;
pub mod nodes;
pub mod records;
pub mod stats;

pub use edges::{EdgeRow, InteractionEdge};
pub use errors::{GraphError, GraphResult, ValidationError, ValidationResult};
pub use identifiers::UserId;
pub use nodes::UserNode;
pub use records::{InteractionKind, InteractionRecord, KindCounts};
pub use stats::{DegreeHistogram, GrowthStats, NodeStats, SnapshotStats, TopKChange};
