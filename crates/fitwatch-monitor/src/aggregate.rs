//! Tallying matched posts into report rankings.

use chrono::NaiveDate;
use fitwatch_core::Watchlist;

use crate::types::{ChannelFailure, MatchedPost, Mention, Report};

/// Maximum number of posts listed in a report.
pub const TOP_POSTS_LIMIT: usize = 10;

/// Count, for each term in `terms`, how many posts `select` says mention it.
///
/// Zero counts are omitted. The result is sorted by count descending; the
/// sort is stable so ties keep the order of `terms`.
fn tally<F>(terms: &[String], posts: &[MatchedPost], select: F) -> Vec<(String, usize)>
where
    F: Fn(&MatchedPost) -> &[String],
{
    let mut counts: Vec<(String, usize)> = terms
        .iter()
        .map(|term| {
            let count = posts
                .iter()
                .filter(|post| select(post).contains(term))
                .count();
            (term.clone(), count)
        })
        .filter(|(_, count)| *count > 0)
        .collect();

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Per-keyword mention counts, labelled with the raw keyword.
#[must_use]
pub fn keyword_mentions(keywords: &[String], posts: &[MatchedPost]) -> Vec<Mention> {
    tally(keywords, posts, |p| p.matched_keywords.as_slice())
        .into_iter()
        .map(|(term, count)| Mention {
            label: term.clone(),
            term,
            count,
        })
        .collect()
}

/// Per-competitor mention counts, labelled in title case.
#[must_use]
pub fn competitor_mentions(competitors: &[String], posts: &[MatchedPost]) -> Vec<Mention> {
    tally(competitors, posts, |p| p.matched_competitors.as_slice())
        .into_iter()
        .map(|(term, count)| Mention {
            label: title_case(&term),
            term,
            count,
        })
        .collect()
}

/// The most engaging posts, highest `score + comment_count` first.
///
/// Stable: equal engagement keeps input order.
#[must_use]
pub fn top_posts(posts: &[MatchedPost], limit: usize) -> Vec<MatchedPost> {
    let mut ranked: Vec<MatchedPost> = posts.to_vec();
    ranked.sort_by_key(|p| std::cmp::Reverse(p.post.engagement()));
    ranked.truncate(limit);
    ranked
}

/// Capitalize the first letter of every alphabetic run and lowercase the rest.
///
/// `"x-endurance"` becomes `"X-Endurance"`, `"my protein"` becomes `"My Protein"`.
#[must_use]
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut prev_alpha = false;
    for ch in input.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

/// Assemble the report for one run.
#[must_use]
pub fn build_report(
    report_date: NaiveDate,
    watchlist: &Watchlist,
    scanned_posts: usize,
    matched: &[MatchedPost],
    failed_channels: Vec<ChannelFailure>,
) -> Report {
    Report {
        report_date,
        channels: watchlist.channels().to_vec(),
        scanned_posts,
        total_posts: matched.len(),
        competitor_mentions: competitor_mentions(watchlist.competitors(), matched),
        keyword_mentions: keyword_mentions(watchlist.keywords(), matched),
        top_posts: top_posts(matched, TOP_POSTS_LIMIT),
        failed_channels,
    }
}
