// lib/src/analyzer/mod.rs
//
// Derives statistics records from built snapshots without mutating them.
// Per-snapshot metrics are independent and computed in parallel; the
// cross-snapshot trend metrics run as a sequential reduction over the
// ordered results afterwards.

pub mod centrality;
pub mod metrics;
pub mod trends;

use rayon::prelude::*;
use tracing::{info, warn};

use models::identifiers::UserId;
use models::stats::{GrowthStats, NodeStats, SnapshotStats, TopKChange};

use crate::engine::snapshot::GraphSnapshot;

pub use centrality::{node_stats, top_k};
pub use metrics::{check_nonempty, snapshot_stats};
pub use trends::{growth_stats, top_k_changes};

/// Everything the analyzer derives from one snapshot.
#[derive(Clone, Debug)]
pub struct SnapshotAnalysis {
    pub stats: SnapshotStats,
    pub nodes: Vec<NodeStats>,
    pub top_k: Vec<UserId>,
}

/// Data-quality tally of one analysis run.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnalysisReport {
    /// Snapshots with zero nodes, reported with sentinel metrics.
    pub empty_snapshots: u64,
}

/// The full analysis of a snapshot sequence.
#[derive(Clone, Debug)]
pub struct AnalysisOutput {
    /// Per-snapshot analyses, in snapshot order.
    pub snapshots: Vec<SnapshotAnalysis>,
    pub growth: Vec<GrowthStats>,
    pub top_k_changes: Vec<TopKChange>,
    pub report: AnalysisReport,
}

/// Analyzes an ordered snapshot sequence.
///
/// Purely functional over its inputs. Empty snapshots never fail the run:
/// they produce sentinel metrics and are counted in the report so the
/// analyst can judge input quality.
pub fn analyze(snapshots: &[GraphSnapshot], top_k_size: usize) -> AnalysisOutput {
    let analyses: Vec<SnapshotAnalysis> = snapshots
        .par_iter()
        .map(|snapshot| {
            let stats = snapshot_stats(snapshot);
            let nodes = node_stats(snapshot);
            let top = top_k(&nodes, top_k_size);
            SnapshotAnalysis {
                stats,
                nodes,
                top_k: top,
            }
        })
        .collect();

    let mut report = AnalysisReport::default();
    for (snapshot, analysis) in snapshots.iter().zip(&analyses) {
        if let Err(err) = check_nonempty(snapshot) {
            report.empty_snapshots += 1;
            warn!("{}; metrics reported as sentinels", err);
        }
        debug_assert_eq!(analysis.stats.node_count, snapshot.node_count());
    }

    let stats: Vec<SnapshotStats> = analyses.iter().map(|a| a.stats.clone()).collect();
    let tops: Vec<_> = analyses
        .iter()
        .map(|a| (a.stats.window_start, a.top_k.clone()))
        .collect();

    let output = AnalysisOutput {
        growth: growth_stats(&stats),
        top_k_changes: top_k_changes(&tops),
        snapshots: analyses,
        report,
    };

    info!(
        snapshots = output.snapshots.len(),
        empty = report.empty_snapshots,
        "analysis complete"
    );
    output
}
