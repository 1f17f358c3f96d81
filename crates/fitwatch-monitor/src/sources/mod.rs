//! Forum sources.

mod reddit;
mod reddit_helpers;

pub use reddit::RedditClient;

use std::time::Duration;

use fitwatch_core::Post;

use crate::types::ChannelFailure;

/// Everything fetched in one pass over the configured channels.
#[derive(Debug, Default)]
pub struct ChannelBatch {
    pub posts: Vec<Post>,
    pub failures: Vec<ChannelFailure>,
}

/// Fetch every channel in order, one at a time.
///
/// A failing channel is logged, recorded in [`ChannelBatch::failures`] and
/// contributes no posts; the remaining channels are still fetched.
/// `delay` is slept between consecutive channels, not after the last.
pub async fn collect_posts(
    client: &RedditClient,
    channels: &[String],
    limit: u32,
    delay: Duration,
) -> ChannelBatch {
    let mut batch = ChannelBatch::default();

    for (index, channel) in channels.iter().enumerate() {
        if index > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match client.fetch_channel(channel, limit).await {
            Ok(posts) => {
                tracing::info!(channel = %channel, count = posts.len(), "fetched channel");
                batch.posts.extend(posts);
            }
            Err(e) => {
                tracing::warn!(
                    channel = %channel,
                    source = "reddit",
                    error = %e,
                    "channel fetch failed; continuing with remaining channels"
                );
                batch.failures.push(ChannelFailure {
                    channel: channel.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    batch
}
