//! Forum mention monitor for fitwatch.
//!
//! Fetches the newest posts from the configured Reddit channels, keeps the
//! ones inside the look-back window, matches them against the keyword and
//! competitor watchlist, aggregates mention counts and delivers an HTML
//! report to disk and/or email.

pub mod aggregate;
pub mod delivery;
pub mod error;
pub mod matcher;
pub mod pipeline;
pub mod render;
pub mod sources;
pub mod types;
pub mod window;

pub use error::{ChildError, DeliveryError, FetchError};
pub use matcher::match_post;
pub use pipeline::{analyze, run_report, RunOptions, RunSummary};
pub use sources::RedditClient;
pub use types::{ChannelFailure, DeliveryOutcome, MatchedPost, Mention, Report};
