// lib/src/analyzer/centrality.rs
//
// Per-node metrics. The centrality measure is fixed to Freeman-normalized
// in-degree centrality: in_degree / (node_count - 1), 0 when the snapshot
// has at most one node. In a retweet/mention network that score marks the
// accounts many distinct users direct activity at.

use petgraph::visit::EdgeRef;
use petgraph::Direction;

use models::identifiers::UserId;
use models::stats::NodeStats;

use crate::engine::snapshot::GraphSnapshot;

/// Computes the per-node metrics of a snapshot, in node insertion order.
pub fn node_stats(snapshot: &GraphSnapshot) -> Vec<NodeStats> {
    let graph = snapshot.graph();
    let node_count = graph.node_count();
    let norm = if node_count <= 1 {
        None
    } else {
        Some((node_count - 1) as f64)
    };

    graph
        .node_indices()
        .map(|ix| {
            let in_degree = graph.edges_directed(ix, Direction::Incoming).count();
            let out_degree = graph.edges_directed(ix, Direction::Outgoing).count();
            let weighted_in_degree = graph
                .edges_directed(ix, Direction::Incoming)
                .map(|edge| edge.weight().weight)
                .sum();
            let weighted_out_degree = graph
                .edges_directed(ix, Direction::Outgoing)
                .map(|edge| edge.weight().weight)
                .sum();
            let centrality = match norm {
                Some(norm) => in_degree as f64 / norm,
                None => 0.0,
            };
            NodeStats {
                id: graph[ix].id,
                in_degree,
                out_degree,
                weighted_in_degree,
                weighted_out_degree,
                centrality,
            }
        })
        .collect()
}

/// The ids of the `k` most central nodes, most central first.
///
/// Ties break on user id ordering so the listing is deterministic across
/// rebuilds.
pub fn top_k(stats: &[NodeStats], k: usize) -> Vec<UserId> {
    let mut ranked: Vec<&NodeStats> = stats.iter().collect();
    ranked.sort_by(|a, b| {
        b.centrality
            .partial_cmp(&a.centrality)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });
    ranked.into_iter().take(k).map(|s| s.id).collect()
}
