use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const DEFAULT_KEYWORDS: &[&str] = &[
    "pre-workout",
    "preworkout",
    "pre workout",
    "hydration",
    "dehydration",
    "dehydrated",
    "electrolyte",
    "electrolytes",
    "sodium",
    "potassium",
    "lactic acid buffer",
    "lactate buffer",
    "buffering",
    "creatine",
    "beta alanine",
    "citrulline",
    "energy drink",
    "caffeine",
    "stimulant",
    "bcaa",
    "amino acids",
    "protein powder",
    "recovery drink",
    "post workout",
    "muscle cramps",
    "fatigue",
    "endurance",
    "beetroot",
    "cordyceps",
];

const DEFAULT_COMPETITORS: &[&str] = &[
    "puresport",
    "pure sport",
    "marchon",
    "xendurance",
    "x-endurance",
    "esn",
    "esn supplements",
    "myprotein",
    "my protein",
    "cadence",
    "cadence nutrition",
    "gold standard",
];

const DEFAULT_CHANNELS: &[&str] = &["fitness"];

/// Raw watchlist overrides as written in YAML. Absent keys keep the defaults.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WatchlistFile {
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
    #[serde(default)]
    pub competitors: Option<Vec<String>>,
    #[serde(default)]
    pub channels: Option<Vec<String>>,
}

/// The validated, normalized lists a run monitors.
///
/// Keywords and competitors are lowercase, trimmed and unique, in the order
/// they were first listed. That order is the tie-break for report rankings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Watchlist {
    keywords: Vec<String>,
    competitors: Vec<String>,
    channels: Vec<String>,
}

impl Default for Watchlist {
    fn default() -> Self {
        Self {
            keywords: normalize_phrases(DEFAULT_KEYWORDS.iter().copied()),
            competitors: normalize_phrases(DEFAULT_COMPETITORS.iter().copied()),
            channels: normalize_channels(DEFAULT_CHANNELS.iter().copied()),
        }
    }
}

impl Watchlist {
    /// Build a watchlist from explicit lists, normalizing and validating them.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if no channels remain, a channel
    /// name is malformed, or both phrase lists end up empty.
    pub fn new<K, C, H>(keywords: K, competitors: C, channels: H) -> Result<Self, ConfigError>
    where
        K: IntoIterator,
        K::Item: AsRef<str>,
        C: IntoIterator,
        C::Item: AsRef<str>,
        H: IntoIterator,
        H::Item: AsRef<str>,
    {
        let watchlist = Self {
            keywords: normalize_phrases(keywords),
            competitors: normalize_phrases(competitors),
            channels: normalize_channels(channels),
        };
        validate_watchlist(&watchlist)?;
        Ok(watchlist)
    }

    /// Apply YAML overrides on top of the built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if the merged lists are invalid.
    pub fn from_file(file: WatchlistFile) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Self::new(
            file.keywords.unwrap_or(defaults.keywords),
            file.competitors.unwrap_or(defaults.competitors),
            file.channels.unwrap_or(defaults.channels),
        )
    }

    /// Replace the channel list, e.g. from CLI flags.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if the new channel list is invalid.
    pub fn with_channels<H>(self, channels: H) -> Result<Self, ConfigError>
    where
        H: IntoIterator,
        H::Item: AsRef<str>,
    {
        Self::new(self.keywords, self.competitors, channels)
    }

    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    #[must_use]
    pub fn competitors(&self) -> &[String] {
        &self.competitors
    }

    #[must_use]
    pub fn channels(&self) -> &[String] {
        &self.channels
    }
}

/// Load the watchlist, reading YAML overrides from `path` when given.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_watchlist(path: Option<&Path>) -> Result<Watchlist, ConfigError> {
    let Some(path) = path else {
        return Ok(Watchlist::default());
    };

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::WatchlistFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: WatchlistFile = serde_yaml::from_str(&content)?;
    Watchlist::from_file(file)
}

fn normalize_phrases<I>(items: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .map(|item| item.as_ref().trim().to_lowercase())
        .filter(|item| !item.is_empty())
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

fn normalize_channels<I>(items: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .map(|item| {
            let trimmed = item.as_ref().trim();
            trimmed
                .strip_prefix("r/")
                .or_else(|| trimmed.strip_prefix("/r/"))
                .unwrap_or(trimmed)
                .to_string()
        })
        .filter(|item| !item.is_empty())
        .filter(|item| seen.insert(item.to_lowercase()))
        .collect()
}

fn validate_watchlist(watchlist: &Watchlist) -> Result<(), ConfigError> {
    if watchlist.channels.is_empty() {
        return Err(ConfigError::Validation(
            "at least one channel must be configured".to_string(),
        ));
    }

    for channel in &watchlist.channels {
        if !channel
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(ConfigError::Validation(format!(
                "invalid channel name '{channel}'; only letters, digits and '_' are allowed"
            )));
        }
    }

    if watchlist.keywords.is_empty() && watchlist.competitors.is_empty() {
        return Err(ConfigError::Validation(
            "keywords and competitors are both empty; nothing to match".to_string(),
        ));
    }

    Ok(())
}
