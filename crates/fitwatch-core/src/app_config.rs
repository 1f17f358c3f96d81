use std::path::PathBuf;

/// SMTP delivery settings.
///
/// Sender, password and recipient are kept as `Option` so that an absent or
/// empty value means "email not configured" rather than a config error.
#[derive(Clone, Default)]
pub struct EmailSettings {
    pub from: Option<String>,
    pub password: Option<String>,
    pub to: Option<String>,
    pub smtp_server: String,
    pub smtp_port: u16,
}

impl EmailSettings {
    /// Returns `(from, password, to)` when all three are present and non-empty.
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &str, &str)> {
        fn non_empty(v: Option<&str>) -> Option<&str> {
            v.filter(|s| !s.trim().is_empty())
        }

        Some((
            non_empty(self.from.as_deref())?,
            non_empty(self.password.as_deref())?,
            non_empty(self.to.as_deref())?,
        ))
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.credentials().is_some()
    }
}

impl std::fmt::Debug for EmailSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailSettings")
            .field("from", &self.from)
            .field("password", &self.password.as_ref().map(|_| "[redacted]"))
            .field("to", &self.to)
            .field("smtp_server", &self.smtp_server)
            .field("smtp_port", &self.smtp_port)
            .finish()
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub reddit_client_id: String,
    pub reddit_client_secret: String,
    pub reddit_user_agent: String,
    pub reddit_oauth: bool,
    pub email: EmailSettings,
    pub log_level: String,
    pub days_back: u32,
    pub limit_per_channel: u32,
    pub request_delay_ms: u64,
    pub request_timeout_secs: u64,
    pub report_prefix: String,
    pub output_dir: PathBuf,
    pub watchlist_path: Option<PathBuf>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("reddit_client_id", &"[redacted]")
            .field("reddit_client_secret", &"[redacted]")
            .field("reddit_user_agent", &self.reddit_user_agent)
            .field("reddit_oauth", &self.reddit_oauth)
            .field("email", &self.email)
            .field("log_level", &self.log_level)
            .field("days_back", &self.days_back)
            .field("limit_per_channel", &self.limit_per_channel)
            .field("request_delay_ms", &self.request_delay_ms)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("report_prefix", &self.report_prefix)
            .field("output_dir", &self.output_dir)
            .field("watchlist_path", &self.watchlist_path)
            .finish()
    }
}
