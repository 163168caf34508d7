// models/src/nodes.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identifiers::UserId;
use crate::records::{InteractionKind, KindCounts};

/// A user appearing in a snapshot.
///
/// Created lazily the first time the id shows up as source or target
/// within a window, then mutated additively as further records are folded
/// in. Never deleted within a window.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserNode {
    /// Stable identity of the account.
    pub id: UserId,

    /// Timestamp of the first record that introduced this user to the
    /// snapshot, as source or target.
    pub first_seen: DateTime<Utc>,

    /// Interactions this user initiated, by kind.
    pub sent: KindCounts,

    /// Interactions directed at this user, by kind.
    pub received: KindCounts,
}

impl UserNode {
    /// Creates a node for a user first seen at the given time.
    pub fn new(id: UserId, first_seen: DateTime<Utc>) -> Self {
        Self {
            id,
            first_seen,
            sent: KindCounts::new(),
            received: KindCounts::new(),
        }
    }

    /// Counts one outgoing interaction of the given kind.
    pub fn record_sent(&mut self, kind: InteractionKind) {
        self.sent.record(kind);
    }

    /// Counts one incoming interaction of the given kind.
    pub fn record_received(&mut self, kind: InteractionKind) {
        self.received.record(kind);
    }

    /// Total interactions this user took part in, either way.
    pub fn activity(&self) -> u64 {
        self.sent.total() + self.received.total()
    }
}
