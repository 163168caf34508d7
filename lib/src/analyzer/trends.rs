// lib/src/analyzer/trends.rs
//
// Cross-snapshot trend metrics. Order-sensitive: a strictly sequential
// reduction over the ordered snapshot sequence.

use chrono::{DateTime, Utc};

use models::identifiers::UserId;
use models::stats::{GrowthStats, SnapshotStats, TopKChange};

/// Growth of node and edge counts between consecutive snapshots.
///
/// The rate is `(next - prev) / prev`; when the previous count is zero
/// the rate is `None` rather than an invented value. One entry per
/// consecutive pair, keyed by the later snapshot's window start.
pub fn growth_stats(stats: &[SnapshotStats]) -> Vec<GrowthStats> {
    stats
        .windows(2)
        .map(|pair| GrowthStats {
            window_start: pair[1].window_start,
            node_growth: rate(pair[0].node_count, pair[1].node_count),
            edge_growth: rate(pair[0].edge_count, pair[1].edge_count),
        })
        .collect()
}

fn rate(prev: usize, next: usize) -> Option<f64> {
    if prev == 0 {
        return None;
    }
    Some((next as f64 - prev as f64) / prev as f64)
}

/// Appearance and disappearance of top-k users between consecutive
/// snapshots.
///
/// Takes the ordered `(window_start, top_k ids)` listings; `entered`
/// preserves the later listing's rank order, `exited` the earlier one's.
pub fn top_k_changes(tops: &[(DateTime<Utc>, Vec<UserId>)]) -> Vec<TopKChange> {
    tops.windows(2)
        .map(|pair| {
            let (_, ref earlier) = pair[0];
            let (window_start, ref later) = pair[1];
            TopKChange {
                window_start,
                entered: later
                    .iter()
                    .filter(|id| !earlier.contains(id))
                    .copied()
                    .collect(),
                exited: earlier
                    .iter()
                    .filter(|id| !later.contains(id))
                    .copied()
                    .collect(),
            }
        })
        .collect()
}
