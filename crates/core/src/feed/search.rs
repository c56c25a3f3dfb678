//! Client-side hashtag and text search over loaded tweets

use chirp_domain::Tweet;

/// Hashtags in `text`, lowercased, without `#`, first occurrence order
///
/// A tag starts at a `#` that is not preceded by a word character and runs
/// over letters, digits and `_`.
pub fn extract_hashtags(text: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    let mut chars = text.char_indices().peekable();
    let mut prev: Option<char> = None;

    while let Some((_, ch)) = chars.next() {
        if ch == '#' && !prev.is_some_and(is_tag_char) {
            let mut tag = String::new();
            while let Some(&(_, next)) = chars.peek() {
                if !is_tag_char(next) {
                    break;
                }
                tag.extend(next.to_lowercase());
                chars.next();
            }
            if !tag.is_empty() && !tags.contains(&tag) {
                tags.push(tag);
            }
            prev = Some('#');
            continue;
        }
        prev = Some(ch);
    }

    tags
}

fn is_tag_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Whether `tweet` matches a search query
///
/// A blank query matches everything. A query starting with `#` matches
/// tweets carrying that hashtag. Any other query matches content or
/// hashtags containing it. All comparisons ignore case.
pub fn matches_query(tweet: &Tweet, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }

    if let Some(tag) = query.strip_prefix('#') {
        let tag = tag.to_lowercase();
        if tag.is_empty() {
            return true;
        }
        return tweet.hashtags.iter().any(|t| t.to_lowercase() == tag)
            || extract_hashtags(&tweet.content).contains(&tag);
    }

    let needle = query.to_lowercase();
    tweet.content.to_lowercase().contains(&needle)
        || tweet.hashtags.iter().any(|t| t.to_lowercase().contains(&needle))
}

/// Tweets matching `query`, in their original order
pub fn filter_tweets(tweets: &[Tweet], query: &str) -> Vec<Tweet> {
    tweets.iter().filter(|tweet| matches_query(tweet, query)).cloned().collect()
}
