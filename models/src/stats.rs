// models/src/stats.rs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identifiers::UserId;

/// Histogram of node degrees: degree value mapped to the number of nodes
/// holding it. Ordered keys keep serialized output deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegreeHistogram(pub BTreeMap<usize, usize>);

impl DegreeHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one node with the given degree.
    pub fn bump(&mut self, degree: usize) {
        *self.0.entry(degree).or_insert(0) += 1;
    }

    /// Number of nodes counted into the histogram.
    pub fn node_count(&self) -> usize {
        self.0.values().sum()
    }

    /// Mean degree, 0 when the histogram is empty.
    pub fn mean(&self) -> f64 {
        let nodes = self.node_count();
        if nodes == 0 {
            return 0.0;
        }
        let total: usize = self.0.iter().map(|(degree, count)| degree * count).sum();
        total as f64 / nodes as f64
    }

    /// Highest degree present, 0 when the histogram is empty.
    pub fn max(&self) -> usize {
        self.0.keys().next_back().copied().unwrap_or(0)
    }
}

/// Aggregate metrics of one snapshot. Derived, read-only; recomputed per
/// snapshot and never fed back into it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnapshotStats {
    /// Start of the window the snapshot covers.
    pub window_start: DateTime<Utc>,

    /// End of the window the snapshot covers (exclusive).
    pub window_end: DateTime<Utc>,

    pub node_count: usize,
    pub edge_count: usize,

    /// Sum of all edge weights: the number of interactions folded in.
    pub total_weight: u64,

    /// `edges / (nodes * (nodes - 1))` for a directed graph; reported as
    /// the sentinel 0 when the snapshot has fewer than two nodes.
    pub density: f64,

    /// Average in-degree (equal to the average out-degree in a directed
    /// graph); sentinel 0 when the snapshot is empty.
    pub mean_in_degree: f64,
    pub mean_out_degree: f64,

    pub in_degree_histogram: DegreeHistogram,
    pub out_degree_histogram: DegreeHistogram,

    /// Number of weakly connected components.
    pub weak_component_count: usize,

    /// Node count of the largest weakly connected component, 0 when empty.
    pub largest_weak_component: usize,

    /// Share of edges whose reverse edge also exists; 0 when there are no
    /// edges.
    pub reciprocity: f64,
}

/// Per-node metrics within one snapshot.
///
/// The centrality measure is fixed to Freeman-normalized in-degree
/// centrality: `in_degree / (node_count - 1)`, 0 when the snapshot has at
/// most one node. In a retweet/mention network a high score marks an
/// account many distinct users direct activity at.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeStats {
    pub id: UserId,
    pub in_degree: usize,
    pub out_degree: usize,

    /// In/out degree weighted by edge weights.
    pub weighted_in_degree: u64,
    pub weighted_out_degree: u64,

    /// Normalized in-degree centrality, in `[0, 1]`.
    pub centrality: f64,
}

/// Growth of node and edge counts from one snapshot to the next.
///
/// A rate is `(next - prev) / prev` and is `None` when the previous count
/// is zero, which keeps the metric well-defined without inventing a value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GrowthStats {
    /// Window start of the later snapshot of the pair.
    pub window_start: DateTime<Utc>,

    pub node_growth: Option<f64>,
    pub edge_growth: Option<f64>,
}

/// Change in the top-k most central users between consecutive snapshots.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TopKChange {
    /// Window start of the later snapshot of the pair.
    pub window_start: DateTime<Utc>,

    /// Ids in the later top-k that were absent from the earlier one.
    pub entered: Vec<UserId>,

    /// Ids in the earlier top-k that dropped out of the later one.
    pub exited: Vec<UserId>,
}
