// models/src/edges.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identifiers::UserId;
use crate::records::{InteractionKind, KindCounts};

/// A directed edge accumulating all interactions from one user to another
/// within a single window.
///
/// Keyed by the `(source, target)` pair; the key itself lives in the
/// snapshot's graph structure. Created on the first occurrence of the pair
/// in a window, incremented on repeats, never removed within its window.
/// The weight is therefore a non-negative integer, monotonically
/// non-decreasing over the accumulation scope of one snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionEdge {
    /// Number of interactions folded into this edge.
    pub weight: u64,

    /// Breakdown of the weight by interaction kind.
    pub kinds: KindCounts,

    /// Timestamp of the first interaction on this edge within its window.
    pub first_seen: DateTime<Utc>,
}

impl InteractionEdge {
    /// Creates an edge from its first interaction.
    pub fn new(kind: InteractionKind, first_seen: DateTime<Utc>) -> Self {
        let mut kinds = KindCounts::new();
        kinds.record(kind);
        Self {
            weight: 1,
            kinds,
            first_seen,
        }
    }

    /// Folds one more interaction of the given kind into the edge.
    pub fn record(&mut self, kind: InteractionKind) {
        self.weight += 1;
        self.kinds.record(kind);
    }
}

/// A fully keyed edge row, used when a snapshot is flattened into tabular
/// form for export.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeRow {
    pub source: UserId,
    pub target: UserId,
    pub edge: InteractionEdge,
}
