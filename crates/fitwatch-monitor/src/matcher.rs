//! Keyword and competitor matching over a single post.
//!
//! Matching is plain case-insensitive substring containment against
//! `title + " " + body`. It is not word-bounded: `"esn"` matches inside
//! `"Chesney's"`.

use fitwatch_core::{Post, Watchlist};

use crate::types::MatchedPost;

/// Return the phrases from `phrases` that occur in `haystack`.
///
/// `haystack` must already be lowercase. Output keeps the order of `phrases`.
fn matching_phrases(haystack: &str, phrases: &[String]) -> Vec<String> {
    phrases
        .iter()
        .filter(|phrase| haystack.contains(phrase.to_lowercase().as_str()))
        .cloned()
        .collect()
}

/// Match one post against the watchlist.
///
/// Returns `None` when neither list matched.
#[must_use]
pub fn match_post(post: &Post, watchlist: &Watchlist) -> Option<MatchedPost> {
    match_post_against(post, watchlist.keywords(), watchlist.competitors())
}

/// Match one post against explicit keyword and competitor lists.
#[must_use]
pub fn match_post_against(
    post: &Post,
    keywords: &[String],
    competitors: &[String],
) -> Option<MatchedPost> {
    let haystack = post.searchable_text().to_lowercase();
    let matched_keywords = matching_phrases(&haystack, keywords);
    let matched_competitors = matching_phrases(&haystack, competitors);

    if matched_keywords.is_empty() && matched_competitors.is_empty() {
        return None;
    }

    Some(MatchedPost {
        post: post.clone(),
        matched_keywords,
        matched_competitors,
    })
}

/// Match every post, keeping only the relevant ones in input order.
#[must_use]
pub fn match_posts(posts: &[Post], watchlist: &Watchlist) -> Vec<MatchedPost> {
    posts
        .iter()
        .filter_map(|post| match_post(post, watchlist))
        .collect()
}
