//! Reply thread flattening
//!
//! Turns a root tweet and its replies into display order: depth-first, each
//! reply directly under its parent, siblings oldest first.

use std::collections::{HashMap, HashSet};

use chirp_domain::Tweet;

/// One row of a flattened thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadEntry {
    pub tweet: Tweet,
    /// 0 for the root, 1 for direct replies, and so on
    pub depth: usize,
}

/// Flatten the thread rooted at `root_id`
///
/// `tweets` must contain the root. Tweets not connected to the root are
/// dropped; a duplicated id keeps its first occurrence. Returns an empty list
/// if the root is missing.
pub fn flatten_thread(root_id: &str, tweets: &[Tweet]) -> Vec<ThreadEntry> {
    let mut by_id: HashMap<&str, &Tweet> = HashMap::new();
    for tweet in tweets {
        by_id.entry(tweet.id.as_str()).or_insert(tweet);
    }
    let Some(root) = by_id.get(root_id).copied() else {
        return Vec::new();
    };

    let mut children: HashMap<&str, Vec<&Tweet>> = HashMap::new();
    for tweet in by_id.values().copied() {
        if let Some(parent) = tweet.reply_to.as_deref() {
            children.entry(parent).or_default().push(tweet);
        }
    }
    for siblings in children.values_mut() {
        siblings.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
    }

    let mut entries = Vec::new();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut stack = vec![(root, 0usize)];

    while let Some((tweet, depth)) = stack.pop() {
        if !visited.insert(tweet.id.as_str()) {
            continue;
        }
        entries.push(ThreadEntry { tweet: tweet.clone(), depth });

        if let Some(replies) = children.get(tweet.id.as_str()) {
            // reversed so the oldest reply is popped first
            stack.extend(replies.iter().rev().map(|reply| (*reply, depth + 1)));
        }
    }

    entries
}
