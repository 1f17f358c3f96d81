//! Report pipeline orchestration.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use fitwatch_core::{AppConfig, EmailSettings, Post, Watchlist};

use crate::aggregate::build_report;
use crate::delivery::{deliver_email, deliver_file};
use crate::matcher::match_posts;
use crate::render::{email_subject, render_html};
use crate::sources::{collect_posts, RedditClient};
use crate::types::{ChannelFailure, DeliveryOutcome, Report};
use crate::window::{cutoff_from, within_window};

/// Knobs for one run. Usually built from [`AppConfig`] and then adjusted by CLI flags.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub days_back: u32,
    pub limit_per_channel: u32,
    pub request_delay: Duration,
    pub output_dir: PathBuf,
    pub report_prefix: String,
    pub write_file: bool,
    pub send_email: bool,
}

impl RunOptions {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            days_back: config.days_back,
            limit_per_channel: config.limit_per_channel,
            request_delay: Duration::from_millis(config.request_delay_ms),
            output_dir: config.output_dir.clone(),
            report_prefix: config.report_prefix.clone(),
            write_file: true,
            send_email: true,
        }
    }
}

/// What a run produced and how each sink fared.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub report: Report,
    pub html: String,
    pub file: DeliveryOutcome,
    pub email: DeliveryOutcome,
}

impl RunSummary {
    /// `true` when an enabled sink tried to deliver and failed.
    #[must_use]
    pub fn delivery_failed(&self) -> bool {
        self.file.is_failure() || self.email.is_failure()
    }
}

/// Filter, match and aggregate already-fetched posts.
///
/// `now` anchors the time window; `report_date` is the date printed on the
/// report and used in the file name.
#[must_use]
pub fn analyze(
    posts: Vec<Post>,
    watchlist: &Watchlist,
    days_back: u32,
    now: DateTime<Utc>,
    report_date: NaiveDate,
    failed_channels: Vec<ChannelFailure>,
) -> Report {
    let recent = within_window(posts, cutoff_from(now, days_back));
    let matched = match_posts(&recent, watchlist);

    tracing::info!(
        scanned = recent.len(),
        matched = matched.len(),
        failed_channels = failed_channels.len(),
        "aggregating matches"
    );

    build_report(report_date, watchlist, recent.len(), &matched, failed_channels)
}

/// Run the whole pipeline once.
///
/// 1. Fetch each channel in turn (failures are recorded, not fatal).
/// 2. Drop posts outside the time window.
/// 3. Match and aggregate.
/// 4. Render HTML.
/// 5. Deliver to file and email independently.
///
/// An empty result still produces and delivers an empty report.
pub async fn run_report(
    client: &RedditClient,
    watchlist: &Watchlist,
    email: &EmailSettings,
    options: &RunOptions,
    now: DateTime<Utc>,
    report_date: NaiveDate,
) -> RunSummary {
    tracing::info!(
        channels = watchlist.channels().len(),
        days_back = options.days_back,
        limit = options.limit_per_channel,
        "searching channels"
    );

    let batch = collect_posts(
        client,
        watchlist.channels(),
        options.limit_per_channel,
        options.request_delay,
    )
    .await;

    let report = analyze(
        batch.posts,
        watchlist,
        options.days_back,
        now,
        report_date,
        batch.failures,
    );

    if !report.has_mentions() {
        tracing::warn!("no relevant posts found in window; delivering empty report");
    }

    let html = render_html(&report);
    let subject = email_subject(&report);

    let file = if options.write_file {
        deliver_file(
            &options.output_dir,
            &options.report_prefix,
            report.report_date,
            &html,
        )
        .await
    } else {
        DeliveryOutcome::Skipped("file output disabled".to_string())
    };

    let email = if options.send_email {
        deliver_email(email, &subject, &html).await
    } else {
        DeliveryOutcome::Skipped("email disabled".to_string())
    };

    RunSummary {
        report,
        html,
        file,
        email,
    }
}
