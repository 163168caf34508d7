// lib/src/extract/tweet_parser.rs
//
// Tweet-text lookups: the retweet head, mentions and hashtags. Hashtags
// are lower-cased to reduce ambiguities in the collected data.

use once_cell::sync::Lazy;
use regex::Regex;

static RETWEET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^RT @(\w+):").expect("valid regex"));
static MENTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"@(\w+)").expect("valid regex"));
static HASHTAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"#(\w+)").expect("valid regex"));

/// Everything identified inside one tweet's text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedTweet {
    /// Screen name after a leading `RT @...:` marker, when present.
    pub retweet_of: Option<String>,

    /// Mentioned screen names, in text order, excluding the retweet head.
    pub mentions: Vec<String>,

    /// Lower-cased hashtags, in text order.
    pub hashtags: Vec<String>,
}

/// Looks up the retweet head, mentions and hashtags in a tweet's text.
pub fn parse_tweet_text(text: &str) -> ParsedTweet {
    let retweet_of = RETWEET_RE
        .captures(text)
        .map(|captures| captures[1].to_string());

    let mut mentions: Vec<String> = MENTION_RE
        .captures_iter(text)
        .map(|captures| captures[1].to_string())
        .collect();
    // The retweet head also matches the mention pattern; drop that first
    // occurrence so a retweet is not double-counted as a mention.
    if let Some(ref head) = retweet_of {
        if let Some(pos) = mentions.iter().position(|name| name == head) {
            mentions.remove(pos);
        }
    }

    let hashtags = HASHTAG_RE
        .captures_iter(text)
        .map(|captures| captures[1].to_lowercase())
        .collect();

    ParsedTweet {
        retweet_of,
        mentions,
        hashtags,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retweet_head() {
        let parsed = parse_tweet_text("RT @tarana: this moment matters #MeToo");
        assert_eq!(parsed.retweet_of.as_deref(), Some("tarana"));
        assert!(parsed.mentions.is_empty());
        assert_eq!(parsed.hashtags, vec!["metoo"]);
    }

    #[test]
    fn test_mentions_exclude_retweet_head() {
        let parsed = parse_tweet_text("RT @tarana: thank you @alyssa #metoo");
        assert_eq!(parsed.retweet_of.as_deref(), Some("tarana"));
        assert_eq!(parsed.mentions, vec!["alyssa"]);
    }

    #[test]
    fn test_mid_text_rt_is_not_a_retweet() {
        let parsed = parse_tweet_text("so true RT @tarana: believe survivors");
        assert_eq!(parsed.retweet_of, None);
        assert_eq!(parsed.mentions, vec!["tarana"]);
    }

    #[test]
    fn test_repeated_mention_of_head_kept_once_removed() {
        let parsed = parse_tweet_text("RT @tarana: speaking with @tarana tonight");
        assert_eq!(parsed.retweet_of.as_deref(), Some("tarana"));
        // Only the head occurrence is dropped.
        assert_eq!(parsed.mentions, vec!["tarana"]);
    }

    #[test]
    fn test_hashtags_lowercased_in_order() {
        let parsed = parse_tweet_text("#MeToo and #TimesUp both #metoo");
        assert_eq!(parsed.hashtags, vec!["metoo", "timesup", "metoo"]);
    }

    #[test]
    fn test_plain_text() {
        let parsed = parse_tweet_text("nothing to see here");
        assert_eq!(parsed, ParsedTweet::default());
    }
}
