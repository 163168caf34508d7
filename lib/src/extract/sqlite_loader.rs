// lib/src/extract/sqlite_loader.rs
//
// Reads the study's pre-collected SQLite database and turns each tweet
// into zero or more interaction records: a reply to the replied-to user,
// a retweet of the `RT @...:` head, and a mention per remaining `@`
// reference. Malformed rows are skipped with a counted total.

use std::path::Path;

use rusqlite::{Connection, OpenFlags};
use tracing::info;

use models::errors::{GraphError, GraphResult};
use models::identifiers::UserId;
use models::records::{InteractionKind, InteractionRecord};

use crate::extract::tweet_parser::parse_tweet_text;
use crate::store::{parse_timestamp, RecordStore};

const TWEETS_QUERY: &str =
    "SELECT screenName, created, text, replyToSN, sentiment_score FROM tweets";

/// Loads interaction records from the tweets database at `dbpath`.
///
/// # Errors
/// Returns `GraphError::Extraction` when the path does not point to a
/// readable `.sqlite` file or the database cannot be queried. Row-level
/// defects never fail the load; they are skipped and counted in the
/// returned store.
pub fn load_interactions(dbpath: &Path) -> GraphResult<RecordStore> {
    if !dbpath.is_file() {
        return Err(GraphError::Extraction(format!(
            "no such file: '{}'",
            dbpath.display()
        )));
    }
    if dbpath.extension().and_then(|ext| ext.to_str()) != Some("sqlite") {
        return Err(GraphError::Extraction(format!(
            "'{}' should point to a .sqlite file",
            dbpath.display()
        )));
    }

    let connection = Connection::open_with_flags(dbpath, OpenFlags::SQLITE_OPEN_READ_ONLY)
        .map_err(|err| GraphError::Extraction(format!("cannot open database: {}", err)))?;
    load_from_connection(&connection)
}

/// Loads interaction records from an already opened tweets database.
pub fn load_from_connection(connection: &Connection) -> GraphResult<RecordStore> {
    let mut statement = connection
        .prepare(TWEETS_QUERY)
        .map_err(|err| GraphError::Extraction(format!("cannot query tweets table: {}", err)))?;
    let mut rows = statement
        .query([])
        .map_err(|err| GraphError::Extraction(format!("cannot query tweets table: {}", err)))?;

    let mut store = RecordStore::new();
    loop {
        let row = match rows.next() {
            Ok(Some(row)) => row,
            Ok(None) => break,
            Err(err) => {
                return Err(GraphError::Extraction(format!(
                    "error while reading tweets: {}",
                    err
                )))
            }
        };

        let screen_name: Option<String> = row.get(0).unwrap_or(None);
        let created: Option<String> = row.get(1).unwrap_or(None);
        let text: Option<String> = row.get(2).unwrap_or(None);
        let reply_to: Option<String> = row.get(3).unwrap_or(None);
        let sentiment: Option<f64> = row.get(4).unwrap_or(None);

        match tweet_records(screen_name, created, text, reply_to, sentiment) {
            Ok(records) => {
                for record in records {
                    store.push(record);
                }
            }
            Err(err) => store.note_defect(&err),
        }
    }

    info!(
        records = store.len(),
        defects = store.defect_count(),
        "loaded interaction records from sqlite"
    );
    Ok(store)
}

/// Turns one tweets-table row into its interaction records.
fn tweet_records(
    screen_name: Option<String>,
    created: Option<String>,
    text: Option<String>,
    reply_to: Option<String>,
    sentiment: Option<f64>,
) -> GraphResult<Vec<InteractionRecord>> {
    let source = screen_name
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| GraphError::MalformedRecord("tweet without screenName".to_string()))?;
    let source = UserId::new(source.trim().to_string())
        .map_err(|err| GraphError::MalformedRecord(format!("bad screenName: {}", err)))?;

    let created = created
        .ok_or_else(|| GraphError::MalformedRecord("tweet without creation time".to_string()))?;
    let timestamp = parse_timestamp(&created)
        .map_err(|err| GraphError::MalformedRecord(err.to_string()))?;

    let parsed = parse_tweet_text(text.as_deref().unwrap_or(""));

    let mut targets: Vec<(String, InteractionKind)> = Vec::new();
    if let Some(reply) = reply_to.filter(|name| !name.trim().is_empty()) {
        targets.push((reply.trim().to_string(), InteractionKind::Reply));
    }
    if let Some(retweeted) = parsed.retweet_of {
        targets.push((retweeted, InteractionKind::Retweet));
    }
    for mention in parsed.mentions {
        targets.push((mention, InteractionKind::Mention));
    }

    let mut records = Vec::with_capacity(targets.len());
    for (target, kind) in targets {
        let target = UserId::new(target)
            .map_err(|err| GraphError::MalformedRecord(format!("bad target id: {}", err)))?;
        let mut record = InteractionRecord::new(source, target, timestamp, kind)
            .with_hashtags(parsed.hashtags.clone());
        record.sentiment = sentiment;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_database() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        connection
            .execute_batch(
                "CREATE TABLE tweets (
                     screenName TEXT,
                     created TEXT,
                     text TEXT,
                     replyToSN TEXT,
                     sentiment_score REAL
                 );",
            )
            .unwrap();
        connection
    }

    fn insert(
        connection: &Connection,
        screen_name: Option<&str>,
        created: &str,
        text: &str,
        reply_to: Option<&str>,
        sentiment: Option<f64>,
    ) {
        connection
            .execute(
                "INSERT INTO tweets VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![screen_name, created, text, reply_to, sentiment],
            )
            .unwrap();
    }

    #[test]
    fn test_load_builds_records_per_interaction() {
        let connection = test_database();
        insert(
            &connection,
            Some("alice"),
            "2017-10-16 10:00:00",
            "RT @tarana: thank you @alyssa #MeToo",
            None,
            Some(0.6),
        );

        let store = load_from_connection(&connection).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.defect_count(), 0);

        let retweet = &store.records()[0];
        assert_eq!(retweet.kind, InteractionKind::Retweet);
        assert_eq!(retweet.target.as_ref(), "tarana");
        assert_eq!(retweet.hashtags, vec!["metoo"]);
        assert_eq!(retweet.sentiment, Some(0.6));

        let mention = &store.records()[1];
        assert_eq!(mention.kind, InteractionKind::Mention);
        assert_eq!(mention.target.as_ref(), "alyssa");
    }

    #[test]
    fn test_reply_column_becomes_reply_record() {
        let connection = test_database();
        insert(
            &connection,
            Some("bob"),
            "2017-10-17 08:30:00",
            "completely agree",
            Some("alice"),
            None,
        );

        let store = load_from_connection(&connection).unwrap();
        assert_eq!(store.len(), 1);
        let reply = &store.records()[0];
        assert_eq!(reply.kind, InteractionKind::Reply);
        assert_eq!(reply.source.as_ref(), "bob");
        assert_eq!(reply.target.as_ref(), "alice");
        assert_eq!(reply.sentiment, None);
    }

    #[test]
    fn test_tweet_without_interactions_yields_nothing() {
        let connection = test_database();
        insert(
            &connection,
            Some("carol"),
            "2017-10-17 09:00:00",
            "no tags here",
            None,
            None,
        );

        let store = load_from_connection(&connection).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.defect_count(), 0);
    }

    #[test]
    fn test_malformed_rows_skipped_and_counted() {
        let connection = test_database();
        insert(&connection, None, "2017-10-17 09:00:00", "hi @bob", None, None);
        insert(&connection, Some("dana"), "whenever", "hi @bob", None, None);
        insert(
            &connection,
            Some("erin"),
            "2017-10-17 10:00:00",
            "hello @bob",
            None,
            None,
        );

        let store = load_from_connection(&connection).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.defect_count(), 2);
    }

    #[test]
    fn test_missing_file_rejected() {
        let missing = Path::new("/definitely/not/here.sqlite");
        assert!(matches!(
            load_interactions(missing),
            Err(GraphError::Extraction(_))
        ));
    }

    #[test]
    fn test_non_sqlite_extension_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tweets.db");
        std::fs::write(&path, b"").unwrap();
        assert!(matches!(
            load_interactions(&path),
            Err(GraphError::Extraction(_))
        ));
    }
}
