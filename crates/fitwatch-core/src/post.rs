use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A forum post as returned by the fetcher, already validated and typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub title: String,
    /// Self-text of the post. Empty for link posts.
    pub body: String,
    pub score: i64,
    pub comment_count: i64,
    /// Channel (subreddit) the post was fetched from.
    pub channel: String,
    pub created_at: DateTime<Utc>,
    /// Absolute URL of the post.
    pub permalink: String,
}

impl Post {
    /// Engagement used to rank posts: score plus comment count.
    #[must_use]
    pub fn engagement(&self) -> i64 {
        self.score.saturating_add(self.comment_count)
    }

    /// The text the matcher searches: `title + " " + body`.
    #[must_use]
    pub fn searchable_text(&self) -> String {
        format!("{} {}", self.title, self.body)
    }
}
