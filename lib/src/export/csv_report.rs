// lib/src/export/csv_report.rs
//
// CSV tables for the reporting side: per-snapshot statistics, per-node
// statistics and per-snapshot edge lists.

use std::io;

use models::errors::{GraphError, GraphResult};
use models::stats::{NodeStats, SnapshotStats};

use crate::engine::snapshot::SnapshotTable;

fn csv_error(err: csv::Error) -> GraphError {
    GraphError::Export(format!("csv write failed: {}", err))
}

/// Writes the per-snapshot statistics table, one row per snapshot.
pub fn write_snapshot_stats<W: io::Write>(stats: &[SnapshotStats], out: W) -> GraphResult<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer
        .write_record([
            "window_start",
            "window_end",
            "node_count",
            "edge_count",
            "total_weight",
            "density",
            "mean_in_degree",
            "mean_out_degree",
            "max_in_degree",
            "max_out_degree",
            "weak_component_count",
            "largest_weak_component",
            "reciprocity",
        ])
        .map_err(csv_error)?;

    for row in stats {
        writer
            .write_record([
                row.window_start.to_rfc3339(),
                row.window_end.to_rfc3339(),
                row.node_count.to_string(),
                row.edge_count.to_string(),
                row.total_weight.to_string(),
                row.density.to_string(),
                row.mean_in_degree.to_string(),
                row.mean_out_degree.to_string(),
                row.in_degree_histogram.max().to_string(),
                row.out_degree_histogram.max().to_string(),
                row.weak_component_count.to_string(),
                row.largest_weak_component.to_string(),
                row.reciprocity.to_string(),
            ])
            .map_err(csv_error)?;
    }
    writer.flush().map_err(GraphError::Io)?;
    Ok(())
}

/// Writes the per-node statistics of every snapshot into one long table,
/// keyed by the snapshot's window start.
pub fn write_node_stats<W: io::Write>(
    per_snapshot: &[(SnapshotStats, Vec<NodeStats>)],
    out: W,
) -> GraphResult<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer
        .write_record([
            "window_start",
            "user",
            "in_degree",
            "out_degree",
            "weighted_in_degree",
            "weighted_out_degree",
            "centrality",
        ])
        .map_err(csv_error)?;

    for (stats, nodes) in per_snapshot {
        let window_start = stats.window_start.to_rfc3339();
        for node in nodes {
            writer
                .write_record([
                    window_start.clone(),
                    node.id.to_string(),
                    node.in_degree.to_string(),
                    node.out_degree.to_string(),
                    node.weighted_in_degree.to_string(),
                    node.weighted_out_degree.to_string(),
                    node.centrality.to_string(),
                ])
                .map_err(csv_error)?;
        }
    }
    writer.flush().map_err(GraphError::Io)?;
    Ok(())
}

/// Writes one snapshot's edge list: source, target, weight and the
/// per-kind breakdown.
pub fn write_edge_list<W: io::Write>(table: &SnapshotTable, out: W) -> GraphResult<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer
        .write_record(["src", "dst", "weight", "replies", "mentions", "retweets"])
        .map_err(csv_error)?;

    for row in &table.edges {
        writer
            .write_record([
                row.source.to_string(),
                row.target.to_string(),
                row.edge.weight.to_string(),
                row.edge.kinds.replies.to_string(),
                row.edge.kinds.mentions.to_string(),
                row.edge.kinds.retweets.to_string(),
            ])
            .map_err(csv_error)?;
    }
    writer.flush().map_err(GraphError::Io)?;
    Ok(())
}
