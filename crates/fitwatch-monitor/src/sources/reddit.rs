//! Reddit listing fetcher.
//!
//! Reads `/r/{channel}/new.json` either from the public JSON endpoint or,
//! when app-only OAuth is enabled, from `oauth.reddit.com` with a bearer token
//! obtained once via the client-credentials grant.

use std::time::Duration;

use fitwatch_core::{AppConfig, Post};
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::FetchError;

use super::reddit_helpers::child_to_post;

const PUBLIC_BASE_URL: &str = "https://www.reddit.com";
const OAUTH_BASE_URL: &str = "https://oauth.reddit.com";
const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";

/// Reddit OAuth token response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Reddit listing envelope.
///
/// Children are kept as raw JSON so each post is validated on its own and a
/// single malformed child does not discard the whole page.
#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    children: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub(super) struct Child {
    pub(super) data: PostData,
}

/// Fields read from each listing child. Everything but `selftext` is required.
#[derive(Debug, Deserialize)]
pub(super) struct PostData {
    pub(super) title: String,
    #[serde(default)]
    pub(super) selftext: Option<String>,
    pub(super) score: i64,
    pub(super) num_comments: i64,
    pub(super) created_utc: f64,
    pub(super) permalink: String,
}

/// Explicitly constructed Reddit client; one per run.
pub struct RedditClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl RedditClient {
    /// Creates a client for the production Reddit endpoints.
    ///
    /// With `config.reddit_oauth` set, exchanges the client credentials for a
    /// token before returning.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the HTTP client cannot be built or the
    /// token request fails at the transport level, and [`FetchError::Auth`] if
    /// the token exchange is rejected.
    pub async fn connect(config: &AppConfig) -> Result<Self, FetchError> {
        if config.reddit_oauth {
            Self::build(config, OAUTH_BASE_URL, Some(TOKEN_URL)).await
        } else {
            Self::build(config, PUBLIC_BASE_URL, None).await
        }
    }

    /// Creates a client pointed at `base_url` (for testing with wiremock).
    ///
    /// In OAuth mode the token endpoint is `{base_url}/api/v1/access_token`.
    ///
    /// # Errors
    ///
    /// Same as [`RedditClient::connect`], plus [`FetchError::InvalidBaseUrl`]
    /// if `base_url` does not parse.
    pub async fn connect_with_base_url(
        config: &AppConfig,
        base_url: &str,
    ) -> Result<Self, FetchError> {
        let token_url = format!("{}/api/v1/access_token", base_url.trim_end_matches('/'));
        let token_url = config.reddit_oauth.then_some(token_url.as_str());
        Self::build(config, base_url, token_url).await
    }

    async fn build(
        config: &AppConfig,
        base_url: &str,
        token_url: Option<&str>,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(config.reddit_user_agent.as_str())
            .build()?;

        let normalised = base_url.trim_end_matches('/');
        let base_url = Url::parse(normalised).map_err(|e| FetchError::InvalidBaseUrl {
            base_url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        let token = match token_url {
            Some(url) => Some(
                Self::fetch_token(
                    &client,
                    url,
                    &config.reddit_client_id,
                    &config.reddit_client_secret,
                )
                .await?,
            ),
            None => None,
        };

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    async fn fetch_token(
        client: &Client,
        token_url: &str,
        client_id: &str,
        client_secret: &str,
    ) -> Result<String, FetchError> {
        let response = client
            .post(token_url)
            .basic_auth(client_id, Some(client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Auth(format!(
                "token exchange failed with status {}",
                response.status()
            )));
        }

        let token_resp: TokenResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Auth(format!("token parse error: {e}")))?;

        tracing::debug!("obtained Reddit app-only token");
        Ok(token_resp.access_token)
    }

    /// Whether listings are read with a bearer token.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Listing URL for `channel`, without query parameters.
    #[must_use]
    pub fn listing_url(&self, channel: &str) -> String {
        format!(
            "{}/r/{channel}/new.json",
            self.base_url.as_str().trim_end_matches('/')
        )
    }

    /// Fetch the newest `limit` posts of one channel.
    ///
    /// Children that fail validation are logged and skipped.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Http`] on transport failure.
    /// - [`FetchError::UnexpectedStatus`] for any non-2xx response.
    /// - [`FetchError::Deserialize`] if the listing envelope is malformed.
    pub async fn fetch_channel(&self, channel: &str, limit: u32) -> Result<Vec<Post>, FetchError> {
        let url = self.listing_url(channel);
        tracing::debug!(channel, url = %url, limit, "fetching channel listing");

        let mut request = self.client.get(&url).query(&[("limit", limit)]);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let listing: Listing =
            serde_json::from_str(&body).map_err(|e| FetchError::Deserialize {
                context: format!("r/{channel} listing"),
                source: e,
            })?;

        let total = listing.data.children.len();
        let posts: Vec<Post> = listing
            .data
            .children
            .into_iter()
            .enumerate()
            .filter_map(|(index, child)| match child_to_post(child, channel) {
                Ok(post) => Some(post),
                Err(reason) => {
                    tracing::debug!(channel, index, %reason, "skipping malformed listing child");
                    None
                }
            })
            .collect();

        if posts.len() < total {
            tracing::warn!(
                channel,
                skipped = total - posts.len(),
                total,
                "some listing children failed validation"
            );
        }

        Ok(posts)
    }
}
