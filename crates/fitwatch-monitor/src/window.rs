//! Time-window filtering of fetched posts.

use chrono::{DateTime, Duration, Utc};
use fitwatch_core::Post;

/// Cutoff for a run that looks back `days_back` days from `now`.
///
/// Look-backs reaching past the earliest representable instant clamp to it,
/// so every post is inside the window.
#[must_use]
pub fn cutoff_from(now: DateTime<Utc>, days_back: u32) -> DateTime<Utc> {
    now.checked_sub_signed(Duration::days(i64::from(days_back)))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Drop posts created before `cutoff`. Order is preserved.
///
/// A post created exactly at the cutoff is kept.
#[must_use]
pub fn within_window(posts: Vec<Post>, cutoff: DateTime<Utc>) -> Vec<Post> {
    posts
        .into_iter()
        .filter(|post| post.created_at >= cutoff)
        .collect()
}
