use chrono::NaiveDate;
use fitwatch_core::Post;

/// A post that mentioned at least one keyword or competitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedPost {
    pub post: Post,
    /// Matched keywords, unique, in watchlist order.
    pub matched_keywords: Vec<String>,
    /// Matched competitor names, unique, in watchlist order.
    pub matched_competitors: Vec<String>,
}

impl MatchedPost {
    /// Keywords followed by competitors, for display.
    #[must_use]
    pub fn all_matches(&self) -> Vec<&str> {
        self.matched_keywords
            .iter()
            .chain(&self.matched_competitors)
            .map(String::as_str)
            .collect()
    }
}

/// One tally entry: how many matched posts mention `term`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mention {
    /// The raw watchlist string that was counted.
    pub term: String,
    /// Label shown in the report.
    pub label: String,
    pub count: usize,
}

/// A channel that could not be fetched during the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelFailure {
    pub channel: String,
    pub reason: String,
}

/// Aggregated result of one run, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub report_date: NaiveDate,
    pub channels: Vec<String>,
    /// Posts inside the time window, matched or not.
    pub scanned_posts: usize,
    /// Number of posts that matched at least one term.
    pub total_posts: usize,
    /// Descending by count; ties in watchlist order.
    pub competitor_mentions: Vec<Mention>,
    /// Descending by count; ties in watchlist order.
    pub keyword_mentions: Vec<Mention>,
    /// At most [`crate::aggregate::TOP_POSTS_LIMIT`] posts by engagement.
    pub top_posts: Vec<MatchedPost>,
    pub failed_channels: Vec<ChannelFailure>,
}

impl Report {
    /// `false` when the run found nothing to report.
    #[must_use]
    pub fn has_mentions(&self) -> bool {
        self.total_posts > 0
    }
}

/// Result of one delivery sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered(String),
    Skipped(String),
    Failed(String),
}

impl DeliveryOutcome {
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl std::fmt::Display for DeliveryOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Delivered(detail) => write!(f, "delivered ({detail})"),
            Self::Skipped(reason) => write!(f, "skipped ({reason})"),
            Self::Failed(reason) => write!(f, "failed ({reason})"),
        }
    }
}
