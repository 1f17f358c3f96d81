//! HTML rendering of a [`Report`].

use crate::types::{Mention, Report};

/// Number of keywords shown in the "Top Keywords" section.
pub const TOP_KEYWORDS_SHOWN: usize = 10;

const REPORT_TITLE: &str = "Reddit Fitness Monitor";
const SUBJECT_PREFIX: &str = "Reddit Fitness Report";

const STYLE: &str = r"
        body { font-family: Arial, sans-serif; margin: 40px; background-color: #f5f6fa; }
        .container { max-width: 1000px; margin: 0 auto; }
        h1 { color: #2c3e50; text-align: center; }
        .section { background: white; margin: 20px 0; padding: 20px; border-radius: 10px; }
        .post { border-left: 4px solid #3498db; padding: 10px; margin: 10px 0; background: #f8f9fa; }
        .warning { color: #c0392b; }
";

/// Escape text for use in HTML element content and double-quoted attributes.
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Email subject line for a report.
#[must_use]
pub fn email_subject(report: &Report) -> String {
    if report.has_mentions() {
        format!("{SUBJECT_PREFIX} - {}", report.report_date.format("%Y-%m-%d"))
    } else {
        format!("{SUBJECT_PREFIX} - No Posts Found")
    }
}

fn push_mentions(html: &mut String, mentions: &[Mention], empty_message: &str) {
    if mentions.is_empty() {
        html.push_str(&format!("            <p>{empty_message}</p>\n"));
        return;
    }
    for mention in mentions {
        html.push_str(&format!(
            "            <p><strong>{}:</strong> {} mentions</p>\n",
            escape_html(&mention.label),
            mention.count
        ));
    }
}

/// Render the full HTML document.
#[must_use]
pub fn render_html(report: &Report) -> String {
    let date = report.report_date.format("%Y-%m-%d").to_string();
    let channels = report
        .channels
        .iter()
        .map(|c| escape_html(c))
        .collect::<Vec<_>>()
        .join(", ");

    let mut html = String::from("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str("    <meta charset=\"utf-8\">\n");
    html.push_str(&format!("    <title>{REPORT_TITLE} - {date}</title>\n"));
    html.push_str(&format!("    <style>{STYLE}    </style>\n"));
    html.push_str("</head>\n<body>\n<div class=\"container\">\n");
    html.push_str(&format!("    <h1>{REPORT_TITLE} Report</h1>\n"));

    html.push_str("    <div class=\"section\">\n        <h2>Summary</h2>\n");
    html.push_str(&format!(
        "        <p><strong>Report Date:</strong> {date}</p>\n"
    ));
    html.push_str(&format!(
        "        <p><strong>Posts Found:</strong> {}</p>\n",
        report.total_posts
    ));
    html.push_str(&format!(
        "        <p><strong>Posts Scanned:</strong> {}</p>\n",
        report.scanned_posts
    ));
    html.push_str(&format!(
        "        <p><strong>Subreddits Monitored:</strong> {channels}</p>\n"
    ));
    if !report.failed_channels.is_empty() {
        let failed = report
            .failed_channels
            .iter()
            .map(|f| format!("r/{} ({})", escape_html(&f.channel), escape_html(&f.reason)))
            .collect::<Vec<_>>()
            .join(", ");
        html.push_str(&format!(
            "        <p class=\"warning\"><strong>Failed to fetch:</strong> {failed}</p>\n"
        ));
    }
    html.push_str("    </div>\n");

    html.push_str("    <div class=\"section\">\n        <h2>Target Competitor Mentions</h2>\n");
    push_mentions(
        &mut html,
        &report.competitor_mentions,
        "No competitor mentions found this week.",
    );
    html.push_str("    </div>\n");

    html.push_str("    <div class=\"section\">\n        <h2>Top Keywords</h2>\n");
    let shown = report.keyword_mentions.len().min(TOP_KEYWORDS_SHOWN);
    push_mentions(
        &mut html,
        &report.keyword_mentions[..shown],
        "No keyword mentions found this week.",
    );
    html.push_str("    </div>\n");

    html.push_str("    <div class=\"section\">\n        <h2>Sample Posts</h2>\n");
    if report.top_posts.is_empty() {
        html.push_str("        <p>No relevant posts found this week.</p>\n");
    }
    for matched in &report.top_posts {
        let post = &matched.post;
        let matches = matched
            .all_matches()
            .into_iter()
            .map(escape_html)
            .collect::<Vec<_>>()
            .join(", ");
        html.push_str("        <div class=\"post\">\n");
        html.push_str(&format!(
            "            <h4><a href=\"{}\" target=\"_blank\">{}</a></h4>\n",
            escape_html(&post.permalink),
            escape_html(&post.title)
        ));
        html.push_str(&format!(
            "            <p>r/{} | score {} | {} comments</p>\n",
            escape_html(&post.channel),
            post.score,
            post.comment_count
        ));
        html.push_str(&format!(
            "            <p><strong>Matches:</strong> {matches}</p>\n"
        ));
        html.push_str("        </div>\n");
    }
    html.push_str("    </div>\n");

    html.push_str("</div>\n</body>\n</html>\n");
    html
}
