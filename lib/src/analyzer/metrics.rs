// lib/src/analyzer/metrics.rs
//
// Per-snapshot aggregate metrics. Read-only traversal of a snapshot;
// nothing here mutates the graph it describes.

use petgraph::unionfind::UnionFind;
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use models::errors::{GraphError, GraphResult};
use models::stats::{DegreeHistogram, SnapshotStats};

use crate::engine::snapshot::GraphSnapshot;

/// Checks a snapshot for the degenerate zero-node case.
///
/// # Errors
/// Returns `GraphError::EmptyGraph` when the snapshot has no nodes. The
/// caller recovers by reporting sentinel metric values and counting the
/// occurrence; this never aborts an analysis run.
pub fn check_nonempty(snapshot: &GraphSnapshot) -> GraphResult<()> {
    if snapshot.node_count() == 0 {
        return Err(GraphError::EmptyGraph(
            snapshot.window().start.to_rfc3339(),
        ));
    }
    Ok(())
}

/// Computes the aggregate metrics of one snapshot.
///
/// Degenerate cases resolve to sentinels rather than faults: density is 0
/// below two nodes, average degrees and reciprocity are 0 on an empty
/// edge set.
pub fn snapshot_stats(snapshot: &GraphSnapshot) -> SnapshotStats {
    let graph = snapshot.graph();
    let node_count = graph.node_count();
    let edge_count = graph.edge_count();

    let density = if node_count < 2 {
        0.0
    } else {
        edge_count as f64 / (node_count as f64 * (node_count as f64 - 1.0))
    };

    let mean_degree = if node_count == 0 {
        0.0
    } else {
        edge_count as f64 / node_count as f64
    };

    let mut in_degree_histogram = DegreeHistogram::new();
    let mut out_degree_histogram = DegreeHistogram::new();
    for ix in graph.node_indices() {
        in_degree_histogram.bump(graph.edges_directed(ix, Direction::Incoming).count());
        out_degree_histogram.bump(graph.edges_directed(ix, Direction::Outgoing).count());
    }

    let total_weight = graph.edge_indices().map(|e| graph[e].weight).sum();

    // Weakly connected components over a union-find of the node indices.
    let (weak_component_count, largest_weak_component) = weak_components(snapshot);

    let reciprocal = graph
        .edge_references()
        .filter(|edge| graph.find_edge(edge.target(), edge.source()).is_some())
        .count();
    let reciprocity = if edge_count == 0 {
        0.0
    } else {
        reciprocal as f64 / edge_count as f64
    };

    SnapshotStats {
        window_start: snapshot.window().start,
        window_end: snapshot.window().end,
        node_count,
        edge_count,
        total_weight,
        density,
        mean_in_degree: mean_degree,
        mean_out_degree: mean_degree,
        in_degree_histogram,
        out_degree_histogram,
        weak_component_count,
        largest_weak_component,
        reciprocity,
    }
}

/// Number of weakly connected components and the node count of the
/// largest one. `(0, 0)` for an empty snapshot.
fn weak_components(snapshot: &GraphSnapshot) -> (usize, usize) {
    let graph = snapshot.graph();
    if graph.node_count() == 0 {
        return (0, 0);
    }

    let mut sets: UnionFind<usize> = UnionFind::new(graph.node_count());
    for edge in graph.edge_references() {
        sets.union(edge.source().index(), edge.target().index());
    }

    let labels = sets.into_labeling();
    let mut sizes = std::collections::HashMap::new();
    for label in labels {
        *sizes.entry(label).or_insert(0usize) += 1;
    }

    let largest = sizes.values().copied().max().unwrap_or(0);
    (sizes.len(), largest)
}
