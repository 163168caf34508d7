// lib/src/store.rs
//
// In-memory tabular store of extracted interaction records. Append-only
// while an ingest runs, read-only input to the builder afterwards.

use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::warn;

use models::errors::{GraphError, GraphResult, ValidationError};
use models::identifiers::UserId;
use models::records::{InteractionKind, InteractionRecord};

/// Timestamp layouts accepted from the raw dataset, tried in order.
const TIMESTAMP_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d",
];

/// Parses a raw timestamp string into UTC, trying the known dataset
/// layouts and RFC 3339.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, ValidationError> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    for format in TIMESTAMP_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(parsed.and_utc());
        }
        if let Ok(parsed) = chrono::NaiveDate::parse_from_str(raw, format) {
            return Ok(parsed.and_time(chrono::NaiveTime::MIN).and_utc());
        }
    }
    Err(ValidationError::InvalidTimestamp(raw.to_string()))
}

/// One unvalidated row of the extracted tabular dataset.
#[derive(Clone, Debug)]
pub struct RawInteractionRow {
    pub source: String,
    pub target: String,
    pub timestamp: String,
    pub kind: String,
}

impl RawInteractionRow {
    /// Validates the row into an `InteractionRecord`.
    ///
    /// # Errors
    /// Returns `GraphError::MalformedRecord` when the source or target id
    /// is missing or invalid, or when the timestamp or kind cannot be
    /// parsed.
    pub fn parse(&self) -> GraphResult<InteractionRecord> {
        let source = UserId::new(self.source.trim().to_string())
            .map_err(|e| GraphError::MalformedRecord(format!("bad source id: {}", e)))?;
        let target = UserId::new(self.target.trim().to_string())
            .map_err(|e| GraphError::MalformedRecord(format!("bad target id: {}", e)))?;
        let timestamp = parse_timestamp(&self.timestamp)
            .map_err(|e| GraphError::MalformedRecord(e.to_string()))?;
        let kind: InteractionKind = self
            .kind
            .parse()
            .map_err(|e: ValidationError| GraphError::MalformedRecord(e.to_string()))?;
        Ok(InteractionRecord::new(source, target, timestamp, kind))
    }
}

/// Ordered store of validated interaction records, plus the running count
/// of malformed rows skipped to produce it.
///
/// Iteration order is source order; the builder relies on it for
/// deterministic rebuilds.
#[derive(Clone, Debug, Default)]
pub struct RecordStore {
    records: Vec<InteractionRecord>,
    defect_count: u64,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingests raw rows, skipping malformed ones with a counted total.
    ///
    /// Skip-with-count keeps the pipeline resilient to dirty input; every
    /// skip is logged and reflected in `defect_count`, never silently
    /// dropped.
    pub fn ingest_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = RawInteractionRow>,
    {
        let mut store = Self::new();
        for row in rows {
            match row.parse() {
                Ok(record) => store.push(record),
                Err(err) => store.note_defect(&err),
            }
        }
        store
    }

    /// Appends an already validated record.
    pub fn push(&mut self, record: InteractionRecord) {
        self.records.push(record);
    }

    /// Counts one malformed input row.
    pub fn note_defect(&mut self, err: &GraphError) {
        self.defect_count += 1;
        warn!(defects = self.defect_count, "skipping record: {}", err);
    }

    pub fn records(&self) -> &[InteractionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of malformed rows skipped while filling the store.
    pub fn defect_count(&self) -> u64 {
        self.defect_count
    }

    /// Earliest and latest record timestamps, when any record exists.
    /// Handy for deriving default window bounds for a whole-period run.
    pub fn time_span(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let first = self.records.iter().map(|r| r.timestamp).min()?;
        let last = self.records.iter().map(|r| r.timestamp).max()?;
        Some((first, last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(source: &str, target: &str, timestamp: &str, kind: &str) -> RawInteractionRow {
        RawInteractionRow {
            source: source.to_string(),
            target: target.to_string(),
            timestamp: timestamp.to_string(),
            kind: kind.to_string(),
        }
    }

    #[test]
    fn test_ingest_keeps_source_order() {
        let store = RecordStore::ingest_rows(vec![
            row("alice", "bob", "2017-10-16 10:00:00", "reply"),
            row("bob", "carol", "2017-10-16 09:00:00", "mention"),
        ]);

        assert_eq!(store.len(), 2);
        assert_eq!(store.defect_count(), 0);
        // Not re-sorted by timestamp.
        assert_eq!(store.records()[0].source.as_ref(), "alice");
        assert_eq!(store.records()[1].source.as_ref(), "bob");
    }

    #[test]
    fn test_empty_source_id_skipped_and_counted() {
        let store = RecordStore::ingest_rows(vec![
            row("", "bob", "2017-10-16 10:00:00", "reply"),
            row("alice", "bob", "2017-10-16 10:05:00", "reply"),
        ]);

        assert_eq!(store.len(), 1);
        assert_eq!(store.defect_count(), 1);
    }

    #[test]
    fn test_bad_timestamp_and_kind_counted() {
        let store = RecordStore::ingest_rows(vec![
            row("alice", "bob", "not a date", "reply"),
            row("alice", "bob", "2017-10-16 10:00:00", "quote"),
        ]);

        assert_eq!(store.len(), 0);
        assert_eq!(store.defect_count(), 2);
    }

    #[test]
    fn test_parse_timestamp_layouts() {
        assert!(parse_timestamp("2017-10-16 10:00:00").is_ok());
        assert!(parse_timestamp("2017-10-16T10:00:00").is_ok());
        assert!(parse_timestamp("2017-10-16").is_ok());
        assert!(parse_timestamp("2017-10-16T10:00:00+02:00").is_ok());
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_time_span() {
        let store = RecordStore::ingest_rows(vec![
            row("alice", "bob", "2017-10-18 10:00:00", "reply"),
            row("bob", "carol", "2017-10-16 09:00:00", "mention"),
            row("carol", "alice", "2017-10-20 09:00:00", "retweet"),
        ]);

        let (first, last) = store.time_span().unwrap();
        assert_eq!(first, parse_timestamp("2017-10-16 09:00:00").unwrap());
        assert_eq!(last, parse_timestamp("2017-10-20 09:00:00").unwrap());
    }
}
