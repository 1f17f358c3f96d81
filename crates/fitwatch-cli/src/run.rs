//! `run` command handler.

use std::path::PathBuf;

use chrono::{Local, Utc};
use clap::Args;
use fitwatch_core::{load_watchlist, AppConfig, Watchlist};
use fitwatch_monitor::{run_report, RedditClient, RunOptions, RunSummary};

/// Flags for `run`. Anything left unset falls back to the environment config.
#[derive(Debug, Default, Args)]
pub struct RunArgs {
    /// Look back this many days instead of FITWATCH_DAYS_BACK
    #[arg(long)]
    pub days: Option<u32>,

    /// Posts to request per channel instead of FITWATCH_LIMIT_PER_CHANNEL
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub limit: Option<u32>,

    /// Channel to monitor; repeat to monitor several. Replaces the watchlist channels.
    #[arg(long = "channel")]
    pub channels: Vec<String>,

    /// Directory for the HTML report instead of FITWATCH_OUTPUT_DIR
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Do not write the HTML report to disk
    #[arg(long)]
    pub no_file: bool,

    /// Do not send the report by email
    #[arg(long)]
    pub no_email: bool,
}

/// Resolve the watchlist for a run, applying `--channel` overrides.
pub(crate) fn resolve_watchlist(config: &AppConfig, args: &RunArgs) -> anyhow::Result<Watchlist> {
    let watchlist = load_watchlist(config.watchlist_path.as_deref())?;
    if args.channels.is_empty() {
        Ok(watchlist)
    } else {
        Ok(watchlist.with_channels(&args.channels)?)
    }
}

/// Merge CLI flags over the config-derived run options.
pub(crate) fn resolve_options(config: &AppConfig, args: &RunArgs) -> RunOptions {
    let mut options = RunOptions::from_config(config);
    if let Some(days) = args.days {
        options.days_back = days;
    }
    if let Some(limit) = args.limit {
        options.limit_per_channel = limit;
    }
    if let Some(dir) = &args.output_dir {
        options.output_dir.clone_from(dir);
    }
    options.write_file = !args.no_file;
    options.send_email = !args.no_email;
    options
}

/// Run the monitor once and print a short summary.
///
/// # Errors
///
/// Returns an error if the watchlist is invalid, the Reddit client cannot be
/// constructed, or a delivery sink failed. Channel failures are only reported,
/// and a failed sink never stops the other one from running.
pub(crate) async fn run_command(config: &AppConfig, args: &RunArgs) -> anyhow::Result<()> {
    let watchlist = resolve_watchlist(config, args)?;
    let options = resolve_options(config, args);

    tracing::info!(
        channels = ?watchlist.channels(),
        keywords = watchlist.keywords().len(),
        competitors = watchlist.competitors().len(),
        "starting report run"
    );

    let client = RedditClient::connect(config).await?;
    let summary = run_report(
        &client,
        &watchlist,
        &config.email,
        &options,
        Utc::now(),
        Local::now().date_naive(),
    )
    .await;

    print_summary(&summary);
    if summary.delivery_failed() {
        anyhow::bail!("report was generated but at least one delivery failed");
    }
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    let report = &summary.report;
    println!(
        "report {}: {} relevant posts out of {} scanned across {} channel(s)",
        report.report_date.format("%Y-%m-%d"),
        report.total_posts,
        report.scanned_posts,
        report.channels.len()
    );
    for failure in &report.failed_channels {
        println!("  r/{}: failed ({})", failure.channel, failure.reason);
    }
    println!("  file:  {}", summary.file);
    println!("  email: {}", summary.email);
}
