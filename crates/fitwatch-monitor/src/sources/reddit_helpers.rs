//! Listing child validation and conversion into typed posts.

use chrono::{DateTime, Utc};
use fitwatch_core::Post;

use super::reddit::Child;
use crate::error::ChildError;

const PERMALINK_HOST: &str = "https://reddit.com";

/// Validate one raw listing child and convert it into a [`Post`].
///
/// # Errors
///
/// Returns [`ChildError::Malformed`] when a required field is missing or has
/// the wrong type, and [`ChildError::TimestampOutOfRange`] for an unusable
/// `created_utc`.
pub(super) fn child_to_post(child: serde_json::Value, channel: &str) -> Result<Post, ChildError> {
    let child: Child = serde_json::from_value(child)?;
    let data = child.data;

    let created_at = epoch_to_utc(data.created_utc)
        .ok_or(ChildError::TimestampOutOfRange(data.created_utc))?;

    Ok(Post {
        title: data.title,
        body: clean_body(data.selftext.as_deref()),
        score: data.score,
        comment_count: data.num_comments,
        channel: channel.to_string(),
        created_at,
        permalink: absolute_permalink(&data.permalink),
    })
}

/// Reddit reports `created_utc` as float seconds; sub-second precision is dropped.
fn epoch_to_utc(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    let whole = secs.trunc() as i64;
    DateTime::from_timestamp(whole, 0)
}

fn clean_body(selftext: Option<&str>) -> String {
    match selftext {
        Some(body) if body != "[deleted]" && body != "[removed]" => body.to_string(),
        _ => String::new(),
    }
}

fn absolute_permalink(permalink: &str) -> String {
    if permalink.starts_with("http://") || permalink.starts_with("https://") {
        permalink.to_string()
    } else {
        format!("{PERMALINK_HOST}{permalink}")
    }
}
