// models/src/records.rs

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{ValidationError, ValidationResult};
use crate::identifiers::UserId;

/// The kind of interaction one tweet establishes between two users.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    Reply,
    Mention,
    Retweet,
}

impl InteractionKind {
    /// All kinds, in a fixed order used for tabular output columns.
    pub const ALL: [InteractionKind; 3] = [
        InteractionKind::Reply,
        InteractionKind::Mention,
        InteractionKind::Retweet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionKind::Reply => "reply",
            InteractionKind::Mention => "mention",
            InteractionKind::Retweet => "retweet",
        }
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InteractionKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> ValidationResult<Self> {
        match s {
            "reply" => Ok(InteractionKind::Reply),
            "mention" => Ok(InteractionKind::Mention),
            "retweet" => Ok(InteractionKind::Retweet),
            other => Err(ValidationError::UnknownInteractionKind(other.to_string())),
        }
    }
}

/// Per-kind interaction counters, accumulated additively.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct KindCounts {
    pub replies: u64,
    pub mentions: u64,
    pub retweets: u64,
}

impl KindCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one interaction of the given kind.
    pub fn record(&mut self, kind: InteractionKind) {
        match kind {
            InteractionKind::Reply => self.replies += 1,
            InteractionKind::Mention => self.mentions += 1,
            InteractionKind::Retweet => self.retweets += 1,
        }
    }

    pub fn get(&self, kind: InteractionKind) -> u64 {
        match kind {
            InteractionKind::Reply => self.replies,
            InteractionKind::Mention => self.mentions,
            InteractionKind::Retweet => self.retweets,
        }
    }

    pub fn total(&self) -> u64 {
        self.replies + self.mentions + self.retweets
    }
}

/// One extracted tweet-derived relation between two users.
///
/// Records are immutable once extracted; the builder only reads them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InteractionRecord {
    /// The user who authored the tweet.
    pub source: UserId,

    /// The user the tweet replies to, mentions or retweets.
    pub target: UserId,

    /// Creation time of the tweet.
    pub timestamp: DateTime<Utc>,

    /// What the tweet does to the target.
    pub kind: InteractionKind,

    /// Lower-cased hashtags found in the tweet text.
    pub hashtags: Vec<String>,

    /// Sentiment score carried over from the source dataset, when present.
    pub sentiment: Option<f64>,
}

impl InteractionRecord {
    pub fn new(
        source: UserId,
        target: UserId,
        timestamp: DateTime<Utc>,
        kind: InteractionKind,
    ) -> Self {
        Self {
            source,
            target,
            timestamp,
            kind,
            hashtags: Vec::new(),
            sentiment: None,
        }
    }

    pub fn with_hashtags(mut self, hashtags: Vec<String>) -> Self {
        self.hashtags = hashtags;
        self
    }

    pub fn with_sentiment(mut self, sentiment: f64) -> Self {
        self.sentiment = Some(sentiment);
        self
    }
}
