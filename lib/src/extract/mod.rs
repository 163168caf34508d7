// lib/src/extract/mod.rs

pub mod sqlite_loader;
pub mod tweet_parser;

pub use sqlite_loader::load_interactions;
pub use tweet_parser::{parse_tweet_text, ParsedTweet};
