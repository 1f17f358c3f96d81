use thiserror::Error;

/// Errors from fetching one channel listing.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Reddit auth error: {0}")]
    Auth(String),

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

/// Why one listing child was skipped. Never fails the whole channel.
#[derive(Debug, Error)]
pub enum ChildError {
    #[error("malformed listing child: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("created_utc out of range: {0}")]
    TimestampOutOfRange(f64),
}

/// Errors from a single delivery sink.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("failed to write report to {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build email: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}
