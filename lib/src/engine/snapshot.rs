// lib/src/engine/snapshot.rs
//
// The directed graph accumulated over one time window. Thin wrapper over
// a petgraph DiGraph that enforces the toolkit's node identity and edge
// accumulation rules: nodes are keyed by user id, edges by the
// (source, target) pair, and both only ever grow within their window.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use serde::{Deserialize, Serialize};

use models::edges::{EdgeRow, InteractionEdge};
use models::identifiers::UserId;
use models::nodes::UserNode;
use models::records::InteractionRecord;

use crate::graph_evolution::time_window::TimeWindow;

/// One snapshot of the interaction network: all users and directed,
/// weight-accumulating interaction edges observed within its window.
///
/// Node and edge iteration follow insertion order, so rebuilding from the
/// same record sequence reproduces the snapshot exactly.
#[derive(Clone, Debug)]
pub struct GraphSnapshot {
    window: TimeWindow,
    graph: DiGraph<UserNode, InteractionEdge>,
    index: HashMap<UserId, NodeIndex>,
}

impl GraphSnapshot {
    pub fn new(window: TimeWindow) -> Self {
        Self {
            window,
            graph: DiGraph::new(),
            index: HashMap::new(),
        }
    }

    pub fn window(&self) -> &TimeWindow {
        &self.window
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Folds one interaction into the snapshot: both endpoint users exist
    /// afterwards (created on first sight with the record's timestamp as
    /// first-seen), their per-kind counters reflect the interaction, and
    /// the `(source, target)` edge carries one more unit of weight.
    pub fn fold_record(&mut self, record: &InteractionRecord) {
        let source = self.ensure_node(record.source, record.timestamp);
        let target = self.ensure_node(record.target, record.timestamp);

        self.graph[source].record_sent(record.kind);
        self.graph[target].record_received(record.kind);

        match self.graph.find_edge(source, target) {
            Some(edge) => self.graph[edge].record(record.kind),
            None => {
                self.graph
                    .add_edge(source, target, InteractionEdge::new(record.kind, record.timestamp));
            }
        }
    }

    fn ensure_node(&mut self, id: UserId, seen_at: DateTime<Utc>) -> NodeIndex {
        match self.index.get(&id) {
            Some(&ix) => ix,
            None => {
                let ix = self.graph.add_node(UserNode::new(id, seen_at));
                self.index.insert(id, ix);
                ix
            }
        }
    }

    pub fn contains_user(&self, id: &UserId) -> bool {
        self.index.contains_key(id)
    }

    pub fn node(&self, id: &UserId) -> Option<&UserNode> {
        self.index.get(id).map(|&ix| &self.graph[ix])
    }

    /// Users in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &UserNode> {
        self.graph.node_indices().map(|ix| &self.graph[ix])
    }

    /// Edges in insertion order, with their endpoint ids.
    pub fn edges(&self) -> impl Iterator<Item = (UserId, UserId, &InteractionEdge)> {
        self.graph.edge_indices().map(|ix| {
            // edge_endpoints is Some for every live edge index.
            let (source, target) = self
                .graph
                .edge_endpoints(ix)
                .map(|(s, t)| (self.graph[s].id, self.graph[t].id))
                .unwrap_or_else(|| unreachable!("edge index without endpoints"));
            (source, target, &self.graph[ix])
        })
    }

    /// Number of distinct users with an edge toward `id`.
    pub fn in_degree(&self, id: &UserId) -> usize {
        self.degree(id, Direction::Incoming)
    }

    /// Number of distinct users `id` has an edge toward.
    pub fn out_degree(&self, id: &UserId) -> usize {
        self.degree(id, Direction::Outgoing)
    }

    fn degree(&self, id: &UserId, direction: Direction) -> usize {
        self.index
            .get(id)
            .map(|&ix| self.graph.edges_directed(ix, direction).count())
            .unwrap_or(0)
    }

    /// Accumulated weight of the edge from `source` to `target`, 0 when
    /// the pair never interacted within the window.
    pub fn edge_weight(&self, source: &UserId, target: &UserId) -> u64 {
        let (Some(&s), Some(&t)) = (self.index.get(source), self.index.get(target)) else {
            return 0;
        };
        self.graph
            .find_edge(s, t)
            .map(|edge| self.graph[edge].weight)
            .unwrap_or(0)
    }

    /// The underlying graph, for read-only traversal by the analyzer.
    pub fn graph(&self) -> &DiGraph<UserNode, InteractionEdge> {
        &self.graph
    }

    /// Flattens the snapshot into its tabular form for export.
    pub fn to_table(&self) -> SnapshotTable {
        SnapshotTable {
            window: self.window.clone(),
            nodes: self.nodes().cloned().collect(),
            edges: self
                .edges()
                .map(|(source, target, edge)| EdgeRow {
                    source,
                    target,
                    edge: edge.clone(),
                })
                .collect(),
        }
    }
}

/// A snapshot flattened into explicit node and edge lists; the shape the
/// exporters and the results bundle work with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnapshotTable {
    pub window: TimeWindow,
    pub nodes: Vec<UserNode>,
    pub edges: Vec<EdgeRow>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use models::records::InteractionKind;

    fn window() -> TimeWindow {
        TimeWindow::new(
            Utc.with_ymd_and_hms(2017, 10, 16, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2017, 10, 17, 0, 0, 0).unwrap(),
        )
    }

    fn user(name: &str) -> UserId {
        UserId::new(name.to_string()).unwrap()
    }

    fn record(source: &str, target: &str, hour: u32, kind: InteractionKind) -> InteractionRecord {
        InteractionRecord::new(
            user(source),
            user(target),
            Utc.with_ymd_and_hms(2017, 10, 16, hour, 0, 0).unwrap(),
            kind,
        )
    }

    #[test]
    fn test_fold_creates_nodes_and_edge() {
        let mut snapshot = GraphSnapshot::new(window());
        snapshot.fold_record(&record("alice", "bob", 9, InteractionKind::Reply));

        assert_eq!(snapshot.node_count(), 2);
        assert_eq!(snapshot.edge_count(), 1);
        assert_eq!(snapshot.edge_weight(&user("alice"), &user("bob")), 1);
        assert!(snapshot.contains_user(&user("alice")));
    }

    #[test]
    fn test_repeated_pair_increments_weight() {
        let mut snapshot = GraphSnapshot::new(window());
        snapshot.fold_record(&record("alice", "bob", 9, InteractionKind::Reply));
        snapshot.fold_record(&record("alice", "bob", 10, InteractionKind::Retweet));

        assert_eq!(snapshot.node_count(), 2);
        assert_eq!(snapshot.edge_count(), 1);
        assert_eq!(snapshot.edge_weight(&user("alice"), &user("bob")), 2);

        let (_, _, edge) = snapshot.edges().next().unwrap();
        assert_eq!(edge.kinds.replies, 1);
        assert_eq!(edge.kinds.retweets, 1);
    }

    #[test]
    fn test_first_seen_is_first_record_timestamp() {
        let mut snapshot = GraphSnapshot::new(window());
        snapshot.fold_record(&record("alice", "bob", 9, InteractionKind::Reply));
        snapshot.fold_record(&record("bob", "alice", 11, InteractionKind::Mention));

        let bob = snapshot.node(&user("bob")).unwrap();
        assert_eq!(
            bob.first_seen,
            Utc.with_ymd_and_hms(2017, 10, 16, 9, 0, 0).unwrap()
        );
        assert_eq!(bob.received.replies, 1);
        assert_eq!(bob.sent.mentions, 1);
    }

    #[test]
    fn test_direction_matters() {
        let mut snapshot = GraphSnapshot::new(window());
        snapshot.fold_record(&record("alice", "bob", 9, InteractionKind::Mention));
        snapshot.fold_record(&record("bob", "alice", 10, InteractionKind::Mention));

        assert_eq!(snapshot.edge_count(), 2);
        assert_eq!(snapshot.in_degree(&user("alice")), 1);
        assert_eq!(snapshot.out_degree(&user("alice")), 1);
    }

    #[test]
    fn test_table_form_preserves_insertion_order() {
        let mut snapshot = GraphSnapshot::new(window());
        snapshot.fold_record(&record("alice", "bob", 9, InteractionKind::Reply));
        snapshot.fold_record(&record("bob", "carol", 10, InteractionKind::Mention));

        let table = snapshot.to_table();
        let names: Vec<&str> = table.nodes.iter().map(|n| n.id.as_ref()).collect();
        assert_eq!(names, vec!["alice", "bob", "carol"]);
        assert_eq!(table.edges.len(), 2);
        assert_eq!(table.edges[0].source.as_ref(), "alice");
    }
}
